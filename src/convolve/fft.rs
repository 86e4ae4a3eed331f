//! Minimal 2D FFT on top of rustfft: row pass, transpose, column pass.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward/inverse 2D transform pair for a fixed `h × w` grid.
///
/// Plans are created once and shared across channels; `process` calls are
/// `&self`, so a single `Fft2` may serve parallel workers.
pub(crate) struct Fft2 {
    h: usize,
    w: usize,
    row_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl Fft2 {
    pub fn new(h: usize, w: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            h,
            w,
            row_forward: planner.plan_fft_forward(w),
            row_inverse: planner.plan_fft_inverse(w),
            col_forward: planner.plan_fft_forward(h),
            col_inverse: planner.plan_fft_inverse(h),
        }
    }

    /// In-place forward transform of a row-major `h × w` grid.
    pub fn forward(&self, grid: &mut Vec<Complex<f64>>) {
        debug_assert_eq!(grid.len(), self.h * self.w);
        self.row_forward.process(grid);
        let mut transposed = transpose(grid, self.h, self.w);
        self.col_forward.process(&mut transposed);
        *grid = transpose(&transposed, self.w, self.h);
    }

    /// In-place inverse transform, normalized by `1 / (h * w)`.
    pub fn inverse(&self, grid: &mut Vec<Complex<f64>>) {
        debug_assert_eq!(grid.len(), self.h * self.w);
        self.row_inverse.process(grid);
        let mut transposed = transpose(grid, self.h, self.w);
        self.col_inverse.process(&mut transposed);
        *grid = transpose(&transposed, self.w, self.h);
        let scale = 1.0 / (self.h * self.w) as f64;
        for v in grid.iter_mut() {
            *v *= scale;
        }
    }
}

fn transpose(src: &[Complex<f64>], rows: usize, cols: usize) -> Vec<Complex<f64>> {
    let mut dst = vec![Complex::new(0.0, 0.0); src.len()];
    for y in 0..rows {
        for x in 0..cols {
            dst[x * rows + y] = src[y * cols + x];
        }
    }
    dst
}
