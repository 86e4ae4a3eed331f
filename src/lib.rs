#![doc = include_str!("../README.md")]

pub mod buffer;
pub mod convolve;
pub mod exif;
pub mod symbolic;

// --- High-level re-exports -------------------------------------------------

// Pixel storage and format conversions.
pub use crate::buffer::{matrix_to_buffer, Buffer, FlipAxis, NestedPixels, PixelBuffer, PixelError};

// Frequency-domain convolution.
pub use crate::convolve::{convolve, ConvolveError, ConvolveOptions};

// Metadata translation.
pub use crate::exif::{extract, ExifEntry, MetadataSource, RawExif, RawExifValue};

// Host seam.
pub use crate::symbolic::{ExactHost, MatrixElement, SymbolicHost, SymbolicValue};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use pixel_bridge::prelude::*;
///
/// # fn main() -> Result<(), pixel_bridge::ConvolveError> {
/// let gray = Buffer::from_vec(2, 2, 1, vec![0u8, 64, 128, 255]);
/// let unit = PixelBuffer::U8(gray).to_float();
///
/// let signal = Buffer::from_vec(3, 3, 1, vec![0.5f64; 9]);
/// let kernel = Buffer::from_vec(1, 1, 1, vec![1.0f64]);
/// let out = convolve(&signal, &kernel, ConvolveOptions::default())?;
/// for (a, b) in out.data.iter().zip(signal.data.iter()) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// # let _ = unit;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::buffer::{Buffer, FlipAxis, PixelBuffer};
    pub use crate::convolve::{convolve, ConvolveOptions};
    pub use crate::exif::{extract, MetadataSource, RawExifValue};
    pub use crate::symbolic::{ExactHost, SymbolicValue};
}
