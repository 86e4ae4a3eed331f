//! Translation of a raw EXIF tag map into host symbolic entries.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::names::display_name;
use crate::symbolic::{SymbolicHost, SymbolicValue};

/// Display name of the field that is rounded to a plain decimal instead of
/// being simplified as a rational.
const FOCAL_LENGTH: &str = "FocalLength";

/// A raw EXIF value in one of the four shapes the translator accepts.
///
/// EXIF carries Short, Long, Rational, Ascii and Byte values; rationals
/// arrive as numerator/denominator pairs, bytes as raw sequences, and the
/// integer widths collapse to one variant. Shapes outside these four are
/// unrepresentable here and thus skipped by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawExifValue {
    Rational(i64, i64),
    Bytes(Vec<u8>),
    Integer(i64),
    Text(String),
}

/// Capability interface over whatever decoded the image.
///
/// `raw_entries` either yields the full tag map or reports that metadata is
/// unavailable; implementations must not panic through this call.
pub trait MetadataSource {
    fn raw_entries(&self) -> Result<BTreeMap<u16, RawExifValue>, MetadataUnavailable>;
}

/// Uniform "no metadata available" signal from a [`MetadataSource`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetadataUnavailable;

impl std::fmt::Display for MetadataUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no metadata available")
    }
}

impl std::error::Error for MetadataUnavailable {}

/// One translated metadata entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExifEntry {
    pub name: String,
    pub value: SymbolicValue,
}

/// The "RawExif" block handed to the host's expression builder. Entries are
/// ordered by ascending original tag id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawExif {
    pub entries: Vec<ExifEntry>,
}

/// Translate the tag map of `source` into a [`RawExif`] block.
///
/// Returns `Ok(None)` when the source is absent, fails, or yields an empty
/// map. A non-empty map whose entries are all skipped still yields a block
/// with an empty entry list; only host simplification failures propagate.
pub fn extract<H: SymbolicHost>(
    source: Option<&dyn MetadataSource>,
    host: &mut H,
) -> Result<Option<RawExif>, H::Error> {
    let Some(source) = source else {
        return Ok(None);
    };
    let raw = match source.raw_entries() {
        Ok(raw) => raw,
        Err(MetadataUnavailable) => {
            debug!("metadata source failed, treating as no metadata");
            return Ok(None);
        }
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let mut entries = Vec::new();
    // BTreeMap iteration gives the ascending tag id order the host relies on.
    for (tag_id, raw_value) in &raw {
        let Some(name) = display_name(*tag_id) else {
            debug!("exif tag {tag_id} has no display name, skipped");
            continue;
        };
        let value = match raw_value {
            RawExifValue::Rational(numer, denom) => {
                if name == FOCAL_LENGTH {
                    SymbolicValue::Real(round_decimal(*numer, *denom))
                } else {
                    host.simplify_rational(*numer, *denom)?
                }
            }
            RawExifValue::Bytes(bytes) => SymbolicValue::Text(
                bytes
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            RawExifValue::Integer(i) => SymbolicValue::Integer(*i),
            RawExifValue::Text(s) => SymbolicValue::Text(s.clone()),
        };
        entries.push(ExifEntry { name, value });
    }
    debug!("translated {} of {} exif entries", entries.len(), raw.len());
    Ok(Some(RawExif { entries }))
}

/// Round `numer / denom` to two decimal places.
fn round_decimal(numer: i64, denom: i64) -> f64 {
    (numer as f64 / denom as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::ExactHost;

    struct MapSource(BTreeMap<u16, RawExifValue>);

    impl MetadataSource for MapSource {
        fn raw_entries(&self) -> Result<BTreeMap<u16, RawExifValue>, MetadataUnavailable> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn focal_length_rounds_to_two_decimals() {
        let mut map = BTreeMap::new();
        map.insert(37386, RawExifValue::Rational(100, 3));
        let block = extract(Some(&MapSource(map)), &mut ExactHost)
            .expect("exact host cannot fail on nonzero denominators")
            .expect("one translatable entry");
        assert_eq!(block.entries[0].name, "FocalLength");
        assert_eq!(block.entries[0].value, SymbolicValue::Real(33.33));
    }

    #[test]
    fn bytes_become_space_separated_decimals() {
        let mut map = BTreeMap::new();
        // 40960 FlashpixVersion is byte-valued in practice
        map.insert(40960, RawExifValue::Bytes(vec![48, 49, 48, 48]));
        let block = extract(Some(&MapSource(map)), &mut ExactHost)
            .expect("no rationals involved")
            .expect("one translatable entry");
        assert_eq!(block.entries[0].name, "FlashpixVersion");
        assert_eq!(
            block.entries[0].value,
            SymbolicValue::Text("48 49 48 48".into())
        );
    }

    #[test]
    fn host_failure_propagates() {
        let mut map = BTreeMap::new();
        map.insert(33434, RawExifValue::Rational(1, 0));
        let result = extract(Some(&MapSource(map)), &mut ExactHost);
        assert!(result.is_err());
    }
}
