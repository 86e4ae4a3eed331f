//! Dense pixel buffers in row-major layout with channels innermost.
//!
//! `Buffer<T>` is the owned storage type; [`PixelBuffer`] wraps it in a tagged
//! union over the five element representations the crate supports, so that
//! representation dispatch is checked at compile time instead of at runtime.

mod convert;
mod matrix;

pub use self::convert::PixelBuffer;
pub use self::matrix::{matrix_to_buffer, NestedPixels};

use serde::{Deserialize, Serialize};

/// Axis along which [`Buffer::flipped`] reverses a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Reverse the order of rows (vertical flip).
    Rows,
    /// Reverse the order of columns (horizontal flip).
    Columns,
}

/// Owned height × width × channels sample array.
///
/// Samples are stored row-major with channels innermost; the sample at
/// `(y, x, c)` lives at index `(y * w + x) * channels + c`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Buffer<T> {
    /// Number of rows.
    pub h: usize,
    /// Number of columns.
    pub w: usize,
    /// Samples per pixel.
    pub channels: usize,
    /// Backing storage, `h * w * channels` samples.
    pub data: Vec<T>,
}

impl<T: Copy> Buffer<T> {
    /// Wrap an existing sample vector. The length must match the dimensions.
    pub fn from_vec(h: usize, w: usize, channels: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            h * w * channels,
            "buffer data length must equal h * w * channels"
        );
        Self {
            h,
            w,
            channels,
            data,
        }
    }

    #[inline]
    /// Convert (y, x, c) to a linear index into `data`.
    pub fn idx(&self, y: usize, x: usize, c: usize) -> usize {
        (y * self.w + x) * self.channels + c
    }

    #[inline]
    /// Get the sample at (y, x, c).
    pub fn get(&self, y: usize, x: usize, c: usize) -> T {
        self.data[self.idx(y, x, c)]
    }

    #[inline]
    /// Row `y` as a slice of `w * channels` samples.
    pub fn row(&self, y: usize) -> &[T] {
        let stride = self.w * self.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Apply `f` to every sample, producing a buffer of the same shape.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Buffer<U> {
        Buffer {
            h: self.h,
            w: self.w,
            channels: self.channels,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Return a copy reversed along `axis`. Pixels keep their channel order.
    pub fn flipped(&self, axis: FlipAxis) -> Self {
        let stride = self.w * self.channels;
        let mut data = Vec::with_capacity(self.data.len());
        match axis {
            FlipAxis::Rows => {
                for y in (0..self.h).rev() {
                    data.extend_from_slice(self.row(y));
                }
            }
            FlipAxis::Columns => {
                for y in 0..self.h {
                    let row = self.row(y);
                    for x in (0..self.w).rev() {
                        data.extend_from_slice(&row[x * self.channels..(x + 1) * self.channels]);
                    }
                }
            }
        }
        debug_assert_eq!(data.len(), self.h * stride);
        Self {
            h: self.h,
            w: self.w,
            channels: self.channels,
            data,
        }
    }
}

impl<T: Copy + Default> Buffer<T> {
    /// Construct a default-initialized buffer of size `h × w × channels`.
    pub fn new(h: usize, w: usize, channels: usize) -> Self {
        Self {
            h,
            w,
            channels,
            data: vec![T::default(); h * w * channels],
        }
    }
}

/// Failures while ingesting a host matrix into a buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelError {
    /// The matrix has no rows or no columns.
    EmptyMatrix,
    /// A row's length differs from the first row's.
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// An element's channel count differs from the first element's.
    MixedChannelCount {
        row: usize,
        col: usize,
        found: usize,
        expected: usize,
    },
    /// An element has no numeric value in the host representation.
    UnsupportedRepresentation { row: usize, col: usize },
}

impl std::fmt::Display for PixelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelError::EmptyMatrix => write!(f, "matrix has no elements"),
            PixelError::RaggedMatrix { row, len, expected } => {
                write!(f, "row {row} has {len} elements, expected {expected}")
            }
            PixelError::MixedChannelCount {
                row,
                col,
                found,
                expected,
            } => write!(
                f,
                "element ({row}, {col}) has {found} channels, expected {expected}"
            ),
            PixelError::UnsupportedRepresentation { row, col } => {
                write!(f, "element ({row}, {col}) has no numeric representation")
            }
        }
    }
}

impl std::error::Error for PixelError {}
