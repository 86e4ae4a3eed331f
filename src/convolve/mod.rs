//! Linear 2D convolution via the frequency domain.
//!
//! Direct spatial convolution is O(n·k); for large kernels the frequency
//! domain path is O(n log n). The signal is optionally extended by edge
//! replication first, so that kernel support near the border sees replicated
//! edge values instead of the zero wrap-around the plain FFT product implies.

mod fft;

use log::debug;
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use self::fft::Fft2;
use crate::buffer::Buffer;

/// Options for [`convolve`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConvolveOptions {
    /// Extend the signal by `kernel_extent / 2` replicated edge samples per
    /// side before transforming. Keeps the output the same size as the input
    /// (for odd kernels) and avoids darkened borders.
    pub edge_padding: bool,
}

impl Default for ConvolveOptions {
    fn default() -> Self {
        Self { edge_padding: true }
    }
}

/// Reasons why a convolution request is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvolveError {
    /// Signal has no rows or no columns.
    EmptySignal,
    /// Kernel exceeds the (padded) signal extent, or is empty.
    IncompatibleKernelShape {
        signal: [usize; 2],
        kernel: [usize; 2],
    },
    /// Kernels are single-plane; a multi-channel kernel is ambiguous.
    MultiChannelKernel { channels: usize },
}

impl std::fmt::Display for ConvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvolveError::EmptySignal => write!(f, "signal has no samples"),
            ConvolveError::IncompatibleKernelShape { signal, kernel } => write!(
                f,
                "kernel {}x{} does not fit signal {}x{}",
                kernel[0], kernel[1], signal[0], signal[1]
            ),
            ConvolveError::MultiChannelKernel { channels } => {
                write!(f, "kernel must have one channel, got {channels}")
            }
        }
    }
}

impl std::error::Error for ConvolveError {}

/// Geometry shared by every channel of one convolution.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ConvGeometry {
    pad_y: usize,
    pad_x: usize,
    /// Padded signal extent.
    ph: usize,
    pw: usize,
    /// Combined (full linear convolution) extent.
    fh: usize,
    fw: usize,
    /// Cropped output extent.
    rh: usize,
    rw: usize,
}

impl ConvGeometry {
    fn resolve(
        signal: &Buffer<f64>,
        kernel: &Buffer<f64>,
        edge_padding: bool,
    ) -> Result<Self, ConvolveError> {
        if kernel.channels != 1 {
            return Err(ConvolveError::MultiChannelKernel {
                channels: kernel.channels,
            });
        }
        if signal.h == 0 || signal.w == 0 || signal.channels == 0 {
            return Err(ConvolveError::EmptySignal);
        }
        let pad_y = kernel.h / 2;
        let pad_x = kernel.w / 2;
        let (ph, pw) = if edge_padding {
            (signal.h + 2 * pad_y, signal.w + 2 * pad_x)
        } else {
            (signal.h, signal.w)
        };
        if kernel.h == 0 || kernel.w == 0 || kernel.h > ph || kernel.w > pw {
            return Err(ConvolveError::IncompatibleKernelShape {
                signal: [ph, pw],
                kernel: [kernel.h, kernel.w],
            });
        }
        let fh = ph + kernel.h - 1;
        let fw = pw + kernel.w - 1;
        // excess = (combined - padded) / 2 + pad, removed from both ends;
        // for odd kernels with padding this restores the input extent.
        let excess_y = (fh - ph) / 2 + pad_y;
        let excess_x = (fw - pw) / 2 + pad_x;
        Ok(Self {
            pad_y,
            pad_x,
            ph,
            pw,
            fh,
            fw,
            rh: fh - 2 * excess_y,
            rw: fw - 2 * excess_x,
        })
    }
}

/// Convolve every channel of `signal` with a single-plane `kernel`.
///
/// The result is the linear convolution, exact up to floating-point rounding.
/// With edge padding and an odd-sized kernel the output has the signal's
/// shape; even kernel extents yield one extra sample in that dimension (the
/// half-sample skew inherent to even kernels).
pub fn convolve(
    signal: &Buffer<f64>,
    kernel: &Buffer<f64>,
    options: ConvolveOptions,
) -> Result<Buffer<f64>, ConvolveError> {
    let geometry = ConvGeometry::resolve(signal, kernel, options.edge_padding)?;
    debug!(
        "convolve {}x{}x{} with {}x{} kernel, combined {}x{}",
        signal.h, signal.w, signal.channels, kernel.h, kernel.w, geometry.fh, geometry.fw
    );

    let fft = Fft2::new(geometry.fh, geometry.fw);
    let mut kernel_spectrum = embed(&kernel.data, kernel.h, kernel.w, geometry.fh, geometry.fw);
    fft.forward(&mut kernel_spectrum);

    let planes: Vec<Vec<f64>> = (0..signal.channels)
        .map(|c| {
            signal
                .data
                .iter()
                .skip(c)
                .step_by(signal.channels)
                .copied()
                .collect()
        })
        .collect();

    let out_planes: Vec<Vec<f64>> = planes
        .par_iter()
        .map(|plane| {
            convolve_plane(
                plane,
                signal.h,
                signal.w,
                &kernel_spectrum,
                &fft,
                geometry,
                options.edge_padding,
            )
        })
        .collect();

    let channels = signal.channels;
    let mut data = vec![0.0; geometry.rh * geometry.rw * channels];
    for (c, plane) in out_planes.iter().enumerate() {
        for (i, &v) in plane.iter().enumerate() {
            data[i * channels + c] = v;
        }
    }
    Ok(Buffer::from_vec(geometry.rh, geometry.rw, channels, data))
}

/// Transform one plane, multiply by the kernel spectrum, transform back and
/// crop the excess border.
fn convolve_plane(
    plane: &[f64],
    h: usize,
    w: usize,
    kernel_spectrum: &[Complex<f64>],
    fft: &Fft2,
    geometry: ConvGeometry,
    edge_padding: bool,
) -> Vec<f64> {
    let padded = if edge_padding {
        edge_pad(plane, h, w, geometry.pad_y, geometry.pad_x)
    } else {
        plane.to_vec()
    };

    let mut spectrum = embed(&padded, geometry.ph, geometry.pw, geometry.fh, geometry.fw);
    fft.forward(&mut spectrum);
    for (a, b) in spectrum.iter_mut().zip(kernel_spectrum.iter()) {
        *a *= *b;
    }
    fft.inverse(&mut spectrum);

    let excess_y = (geometry.fh - geometry.rh) / 2;
    let excess_x = (geometry.fw - geometry.rw) / 2;
    let mut out = Vec::with_capacity(geometry.rh * geometry.rw);
    for y in 0..geometry.rh {
        let row = (y + excess_y) * geometry.fw;
        for x in 0..geometry.rw {
            out.push(spectrum[row + x + excess_x].re);
        }
    }
    out
}

/// Extend a plane on all sides by replicating its edge samples.
fn edge_pad(plane: &[f64], h: usize, w: usize, pad_y: usize, pad_x: usize) -> Vec<f64> {
    let (ph, pw) = (h + 2 * pad_y, w + 2 * pad_x);
    let mut out = Vec::with_capacity(ph * pw);
    for y in 0..ph {
        let sy = y.saturating_sub(pad_y).min(h - 1);
        for x in 0..pw {
            let sx = x.saturating_sub(pad_x).min(w - 1);
            out.push(plane[sy * w + sx]);
        }
    }
    out
}

/// Copy a plane into the top-left corner of a zeroed `fh × fw` complex grid.
fn embed(plane: &[f64], h: usize, w: usize, fh: usize, fw: usize) -> Vec<Complex<f64>> {
    let mut grid = vec![Complex::new(0.0, 0.0); fh * fw];
    for y in 0..h {
        for x in 0..w {
            grid[y * fw + x] = Complex::new(plane[y * w + x], 0.0);
        }
    }
    grid
}
