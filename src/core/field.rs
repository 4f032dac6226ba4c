//! Dense 2-D scalar fields exchanged with the driver.
//!
//! The driver hands the engine a source intensity field and an obstacle
//! mask as `ScalarField`s; the engine hands back rasterized value/mass
//! snapshots in the same shape. File I/O stays on the driver side.

use crate::error::SolverError;
use crate::math::Real;

/// Row-major `width x height` scalar buffer, indexed `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<Real>,
}

impl ScalarField {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<Real>) -> Result<Self, SolverError> {
        if data.len() != width * height {
            return Err(SolverError::ShapeMismatch {
                expected: width * height,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Real {
        self.data[y * self.width + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, value: Real) {
        self.data[y * self.width + x] = value;
    }

    pub fn data(&self) -> &[Real] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Iterate `(x, y, value)` over every sample.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, usize, Real)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    /// Clip values to `[thr_min, thr_max]` and rescale into `[0, 1]`.
    pub fn normalize_range(&mut self, thr_min: Real, thr_max: Real) {
        let span = thr_max - thr_min;
        for v in &mut self.data {
            *v = (v.clamp(thr_min, thr_max) - thr_min) / span;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = ScalarField::from_vec(4, 4, vec![0.0; 15]).unwrap_err();
        assert_eq!(
            err,
            SolverError::ShapeMismatch {
                expected: 16,
                got: 15
            }
        );
    }

    #[test]
    fn indexing_is_row_major() {
        let mut field = ScalarField::zeros(3, 2);
        field.set(2, 1, 9.0);
        assert_eq!(field.data()[5], 9.0);
        assert_eq!(field.get(2, 1), 9.0);
    }

    #[test]
    fn normalize_range_clips_and_rescales() {
        let mut field = ScalarField::from_vec(2, 2, vec![100.0, 200.0, 350.0, 600.0]).unwrap();
        field.normalize_range(200.0, 500.0);
        assert_relative_eq!(field.get(0, 0), 0.0);
        assert_relative_eq!(field.get(1, 0), 0.0);
        assert_relative_eq!(field.get(0, 1), 0.5);
        assert_relative_eq!(field.get(1, 1), 1.0);
    }
}
