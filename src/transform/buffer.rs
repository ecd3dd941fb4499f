//! Numeric buffers flowing through the transform steps.

use ndarray::Array3;

use crate::image::ElementType;

/// An HWC array in one of the element types a transform can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    U8(Array3<u8>),
    F32(Array3<f32>),
}

impl Buffer {
    /// Shape as (height, width, channels).
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            Self::U8(a) => a.dim(),
            Self::F32(a) => a.dim(),
        }
    }

    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::U8(_) => ElementType::U8,
            Self::F32(_) => ElementType::F32,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(a) => a.len(),
            Self::F32(a) => a.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the flattened dump in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_type().width()
    }

    /// Flatten row-major into raw bytes, f32 elements in native byte order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::U8(a) => a.iter().copied().collect(),
            Self::F32(a) => a.iter().flat_map(|v| v.to_ne_bytes()).collect(),
        }
    }

    /// Convert to an f32 array, widening u8 values without scaling.
    #[must_use]
    pub fn into_f32(self) -> Array3<f32> {
        match self {
            Self::U8(a) => a.mapv(f32::from),
            Self::F32(a) => a,
        }
    }
}

/// Format a shape tuple the way the dumpers print it, e.g. `(224, 224, 3)`.
#[must_use]
pub fn shape_display((height, width, channels): (usize, usize, usize)) -> String {
    format!("({height}, {width}, {channels})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_matches_bytes() {
        let u8_buf = Buffer::U8(Array3::zeros((2, 3, 3)));
        let f32_buf = Buffer::F32(Array3::zeros((2, 3, 3)));

        assert_eq!(u8_buf.byte_len(), 18);
        assert_eq!(u8_buf.to_bytes().len(), 18);
        assert_eq!(f32_buf.byte_len(), 72);
        assert_eq!(f32_buf.to_bytes().len(), 72);
    }

    #[test]
    fn test_to_bytes_row_major() {
        let a = Array3::from_shape_fn((2, 2, 1), |(y, x, _)| (y * 10 + x) as u8);
        assert_eq!(Buffer::U8(a).to_bytes(), vec![0, 1, 10, 11]);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(shape_display((224, 224, 3)), "(224, 224, 3)");
    }
}
