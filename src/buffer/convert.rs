//! Rescaling between the float, 8-bit and 16-bit pixel representations.
//!
//! Float pixels are normalized to [0.0, 1.0]. Conversions to a narrower
//! integer representation clamp out-of-range values, never wrap.

use super::{Buffer, FlipAxis};

/// A pixel buffer in one of the five supported element representations.
///
/// Matching on this enum replaces runtime dtype dispatch; every conversion
/// below is total over the variants.
#[derive(Clone, Debug, PartialEq)]
pub enum PixelBuffer {
    F32(Buffer<f32>),
    F64(Buffer<f64>),
    U8(Buffer<u8>),
    U16(Buffer<u16>),
    Bool(Buffer<bool>),
}

impl PixelBuffer {
    /// (rows, columns, channels) of the wrapped buffer.
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            PixelBuffer::F32(b) => (b.h, b.w, b.channels),
            PixelBuffer::F64(b) => (b.h, b.w, b.channels),
            PixelBuffer::U8(b) => (b.h, b.w, b.channels),
            PixelBuffer::U16(b) => (b.h, b.w, b.channels),
            PixelBuffer::Bool(b) => (b.h, b.w, b.channels),
        }
    }

    /// Rescale to the unit float representation.
    ///
    /// Float buffers pass through unchanged (including f64 ones); integer and
    /// boolean buffers rescale into an f32 buffer in [0.0, 1.0].
    pub fn to_float(&self) -> PixelBuffer {
        match self {
            PixelBuffer::F32(b) => PixelBuffer::F32(b.clone()),
            PixelBuffer::F64(b) => PixelBuffer::F64(b.clone()),
            PixelBuffer::U8(b) => PixelBuffer::F32(b.map(|v| v as f32 / 255.0)),
            PixelBuffer::U16(b) => PixelBuffer::F32(b.map(|v| v as f32 / 65535.0)),
            PixelBuffer::Bool(b) => PixelBuffer::F32(b.map(|v| if v { 1.0 } else { 0.0 })),
        }
    }

    /// Rescale to the 8-bit representation.
    ///
    /// Floats are clamped to [0.0, 1.0], scaled by 255 and truncated; 16-bit
    /// samples are divided by 256 (truncating); booleans map to 0/255.
    pub fn to_u8(&self) -> Buffer<u8> {
        match self {
            PixelBuffer::F32(b) => b.map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8),
            PixelBuffer::F64(b) => b.map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8),
            PixelBuffer::U8(b) => b.clone(),
            PixelBuffer::U16(b) => b.map(|v| (v / 256) as u8),
            PixelBuffer::Bool(b) => b.map(|v| if v { 255 } else { 0 }),
        }
    }

    /// Rescale to the 16-bit representation.
    ///
    /// Floats are clamped to [0.0, 1.0], scaled by 65535 and truncated; 8-bit
    /// samples widen exactly by 256; booleans map to 0/65535.
    pub fn to_u16(&self) -> Buffer<u16> {
        match self {
            PixelBuffer::F32(b) => b.map(|v| (v.clamp(0.0, 1.0) * 65535.0) as u16),
            PixelBuffer::F64(b) => b.map(|v| (v.clamp(0.0, 1.0) * 65535.0) as u16),
            PixelBuffer::U8(b) => b.map(|v| v as u16 * 256),
            PixelBuffer::U16(b) => b.clone(),
            PixelBuffer::Bool(b) => b.map(|v| if v { 65535 } else { 0 }),
        }
    }

    /// Return a copy reversed along `axis`.
    pub fn flipped(&self, axis: FlipAxis) -> PixelBuffer {
        match self {
            PixelBuffer::F32(b) => PixelBuffer::F32(b.flipped(axis)),
            PixelBuffer::F64(b) => PixelBuffer::F64(b.flipped(axis)),
            PixelBuffer::U8(b) => PixelBuffer::U8(b.flipped(axis)),
            PixelBuffer::U16(b) => PixelBuffer::U16(b.flipped(axis)),
            PixelBuffer::Bool(b) => PixelBuffer::Bool(b.flipped(axis)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_float_round_trip_is_exact_for_all_values() {
        let src = Buffer::from_vec(16, 16, 1, (0u16..256).map(|v| v as u8).collect());
        let float = PixelBuffer::U8(src.clone()).to_float();
        assert_eq!(float.to_u8(), src);
    }

    #[test]
    fn u16_float_round_trip_stays_within_one_step() {
        // The f32 path truncates, so a 16-bit round trip may land one step
        // low; anything further off would be a scaling bug.
        let values: Vec<u16> = (0..256).map(|v| v * 257).collect();
        let src = Buffer::from_vec(16, 16, 1, values);
        let back = PixelBuffer::U16(src.clone()).to_float().to_u16();
        for (a, b) in src.data.iter().zip(back.data.iter()) {
            assert!(a.abs_diff(*b) <= 1, "u16 round trip drifted: {a} -> {b}");
        }
    }

    #[test]
    fn float_buffers_pass_through_unchanged() {
        let f32_buf = Buffer::from_vec(1, 2, 1, vec![0.25f32, 0.75]);
        assert_eq!(
            PixelBuffer::F32(f32_buf.clone()).to_float(),
            PixelBuffer::F32(f32_buf)
        );
        let f64_buf = Buffer::from_vec(1, 2, 1, vec![0.25f64, 0.75]);
        assert_eq!(
            PixelBuffer::F64(f64_buf.clone()).to_float(),
            PixelBuffer::F64(f64_buf)
        );
    }

    #[test]
    fn out_of_range_floats_clamp_not_wrap() {
        let buf = Buffer::from_vec(1, 3, 1, vec![-0.5f32, 0.5, 1.5]);
        let bytes = PixelBuffer::F32(buf.clone()).to_u8();
        assert_eq!(bytes.data, vec![0, 127, 255]);
        let words = PixelBuffer::F32(buf).to_u16();
        assert_eq!(words.data, vec![0, 32767, 65535]);
    }

    #[test]
    fn u16_to_u8_truncates() {
        let buf = Buffer::from_vec(1, 3, 1, vec![0u16, 511, 65535]);
        assert_eq!(PixelBuffer::U16(buf).to_u8().data, vec![0, 1, 255]);
    }

    #[test]
    fn u8_to_u16_widens_exactly() {
        let buf = Buffer::from_vec(1, 3, 1, vec![0u8, 1, 255]);
        assert_eq!(PixelBuffer::U8(buf).to_u16().data, vec![0, 256, 65280]);
    }

    #[test]
    fn bool_maps_to_full_scale() {
        let buf = Buffer::from_vec(1, 2, 1, vec![false, true]);
        let as_float = PixelBuffer::Bool(buf.clone()).to_float();
        assert_eq!(
            as_float,
            PixelBuffer::F32(Buffer::from_vec(1, 2, 1, vec![0.0, 1.0]))
        );
        assert_eq!(PixelBuffer::Bool(buf.clone()).to_u8().data, vec![0, 255]);
        assert_eq!(PixelBuffer::Bool(buf).to_u16().data, vec![0, 65535]);
    }
}
