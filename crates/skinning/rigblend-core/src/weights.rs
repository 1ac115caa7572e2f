//! Flat influence-weight buffer with a fixed per-vertex stride.
//!
//! Row r holds vertex r's weights for every influence, in influence order.
//! The layout matches what skin deformers exchange in batched get/set calls,
//! so a buffer moves between host and core without reshaping.

use serde::{Deserialize, Serialize};

use crate::error::BlendError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightBuffer {
    data: Vec<f64>,
    stride: usize,
}

impl WeightBuffer {
    /// Wrap a host-provided flat buffer. `expected_rows` is the selection
    /// length; the buffer must hold exactly one stride per row.
    pub fn from_flat(
        data: Vec<f64>,
        stride: usize,
        expected_rows: usize,
    ) -> Result<Self, BlendError> {
        let expected = expected_rows * stride;
        if stride == 0 || data.len() != expected {
            return Err(BlendError::WeightCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, stride })
    }

    /// An all-zero buffer of the given shape.
    pub fn zeroed(rows: usize, stride: usize) -> Self {
        Self {
            data: vec![0.0; rows * stride],
            stride,
        }
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn rows(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride
        }
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.stride..(r + 1) * self.stride]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        &mut self.data[r * self.stride..(r + 1) * self.stride]
    }

    #[inline]
    pub fn row_sum(&self, r: usize) -> f64 {
        self.row(r).iter().sum()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_flat(self) -> Vec<f64> {
        self.data
    }

    /// Scale row r so it sums to 1.0. Returns false when the row sum is too
    /// close to zero to divide by; the row is left untouched in that case.
    pub fn normalize_row(&mut self, r: usize, epsilon: f64) -> bool {
        let sum = self.row_sum(r);
        if sum.abs() <= epsilon {
            return false;
        }
        for w in self.row_mut(r) {
            *w /= sum;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_checks() {
        let buf = WeightBuffer::from_flat(vec![0.5; 6], 2, 3).unwrap();
        assert_eq!(buf.rows(), 3);
        assert_eq!(buf.stride(), 2);
        assert_eq!(buf.row(1), &[0.5, 0.5]);

        let err = WeightBuffer::from_flat(vec![0.5; 5], 2, 3).unwrap_err();
        assert_eq!(
            err,
            BlendError::WeightCountMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn normalize_row_divides_by_sum() {
        let mut buf = WeightBuffer::from_flat(vec![2.0, 6.0], 2, 1).unwrap();
        assert!(buf.normalize_row(0, 1e-12));
        assert_eq!(buf.row(0), &[0.25, 0.75]);
    }

    #[test]
    fn normalize_zero_row_refuses() {
        let mut buf = WeightBuffer::zeroed(1, 3);
        assert!(!buf.normalize_row(0, 1e-12));
        assert_eq!(buf.row(0), &[0.0, 0.0, 0.0]);
    }
}
