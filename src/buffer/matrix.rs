//! Conversions between buffers and the host's nested-sequence matrix form.

use log::debug;

use super::{Buffer, PixelError};
use crate::symbolic::MatrixElement;

/// Host-facing nested form of a buffer.
///
/// Single-channel buffers drop the channel dimension entirely; multi-channel
/// buffers keep channels innermost.
#[derive(Clone, Debug, PartialEq)]
pub enum NestedPixels {
    Planar(Vec<Vec<f64>>),
    Interleaved(Vec<Vec<Vec<f64>>>),
}

impl Buffer<f64> {
    /// Reshape into the host's nested-sequence form. Inverse of
    /// [`matrix_to_buffer`].
    pub fn to_nested(&self) -> NestedPixels {
        if self.channels == 1 {
            NestedPixels::Planar((0..self.h).map(|y| self.row(y).to_vec()).collect())
        } else {
            NestedPixels::Interleaved(
                (0..self.h)
                    .map(|y| {
                        self.row(y)
                            .chunks(self.channels)
                            .map(|px| px.to_vec())
                            .collect()
                    })
                    .collect(),
            )
        }
    }
}

/// Evaluate a host symbolic matrix into a dense f64 buffer.
///
/// Scalar elements produce a single-channel buffer; channel-vector elements a
/// k-channel buffer. Rows must be rectangular and channel counts uniform.
pub fn matrix_to_buffer(rows: &[Vec<MatrixElement>]) -> Result<Buffer<f64>, PixelError> {
    let h = rows.len();
    let w = rows.first().map_or(0, Vec::len);
    if h == 0 || w == 0 {
        return Err(PixelError::EmptyMatrix);
    }
    let channels = match &rows[0][0] {
        MatrixElement::Scalar(_) => 1,
        MatrixElement::Samples(s) => s.len(),
    };
    if channels == 0 {
        return Err(PixelError::EmptyMatrix);
    }

    let mut data = Vec::with_capacity(h * w * channels);
    for (y, matrix_row) in rows.iter().enumerate() {
        if matrix_row.len() != w {
            return Err(PixelError::RaggedMatrix {
                row: y,
                len: matrix_row.len(),
                expected: w,
            });
        }
        for (x, element) in matrix_row.iter().enumerate() {
            match element {
                MatrixElement::Scalar(value) => {
                    if channels != 1 {
                        return Err(PixelError::MixedChannelCount {
                            row: y,
                            col: x,
                            found: 1,
                            expected: channels,
                        });
                    }
                    data.push(value.round_to_float().ok_or(
                        PixelError::UnsupportedRepresentation { row: y, col: x },
                    )?);
                }
                MatrixElement::Samples(samples) => {
                    if samples.len() != channels {
                        return Err(PixelError::MixedChannelCount {
                            row: y,
                            col: x,
                            found: samples.len(),
                            expected: channels,
                        });
                    }
                    for value in samples {
                        data.push(value.round_to_float().ok_or(
                            PixelError::UnsupportedRepresentation { row: y, col: x },
                        )?);
                    }
                }
            }
        }
    }
    debug!("ingested host matrix as {h}x{w} buffer with {channels} channel(s)");
    Ok(Buffer::from_vec(h, w, channels, data))
}
