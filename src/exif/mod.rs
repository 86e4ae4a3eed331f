//! Camera metadata translation for the symbolic host.
//!
//! Takes the flat tag id → raw value map of a decoded image and produces the
//! ordered, human-readable "RawExif" block the host inserts into its
//! expression tree. Name resolution goes through a small override table and
//! then the standard dictionary of the `exif` crate.

mod names;
mod translate;

pub use self::names::display_name;
pub use self::translate::{
    extract, ExifEntry, MetadataSource, MetadataUnavailable, RawExif, RawExifValue,
};
