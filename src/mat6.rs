use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ensure_finite, Error, Result};
use crate::vec6::{Vec6, DIMENSIONS};

pub const ELEMENTS: usize = DIMENSIONS * DIMENSIONS;

/// Linear map on [`Vec6`].
///
/// Stored column-major (like OpenGL): row `i`, column `j` lives at
/// `values[j * 6 + i]`. This is also the layout of the serialized array.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Mat6 {
    values: [f64; ELEMENTS],
}

impl Default for Mat6 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat6 {
    pub const ZERO: Self = Self { values: [0.0; ELEMENTS] };

    pub const fn identity() -> Self {
        let mut values = [0.0; ELEMENTS];
        let mut i = 0;
        while i < DIMENSIONS {
            values[i * DIMENSIONS + i] = 1.0;
            i += 1;
        }
        Self { values }
    }

    pub const fn from_column_major(values: [f64; ELEMENTS]) -> Self {
        Self { values }
    }

    /// Builds a matrix from untrusted column-major data.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; ELEMENTS] = values
            .try_into()
            .map_err(|_| Error::InvalidMatrixLength(values.len()))?;
        ensure_finite(&values)?;
        Ok(Self { values })
    }

    pub fn to_array(&self) -> [f64; ELEMENTS] {
        self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[[row, col]]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[[row, col]] = value;
    }

    pub fn column(&self, col: usize) -> Vec6 {
        let mut output = Vec6::ZERO;
        for row in 0..DIMENSIONS {
            output[row] = self[[row, col]];
        }
        output
    }

    pub fn transpose(&self) -> Mat6 {
        let mut output = Mat6::ZERO;
        for i in 0..DIMENSIONS {
            for j in 0..DIMENSIONS {
                output[[j, i]] = self[[i, j]];
            }
        }
        output
    }

    pub fn multiply(&self, other: &Mat6) -> Mat6 {
        let mut output = Mat6::ZERO;
        for i in 0..DIMENSIONS {
            for j in 0..DIMENSIONS {
                let mut sum = 0.0;
                for k in 0..DIMENSIONS {
                    sum += self[[i, k]] * other[[k, j]];
                }
                output[[i, j]] = sum;
            }
        }
        output
    }

    pub fn multiply_vec(&self, v: &Vec6) -> Vec6 {
        let mut output = Vec6::ZERO;
        for i in 0..DIMENSIONS {
            for j in 0..DIMENSIONS {
                output[i] += self[[i, j]] * v[j];
            }
        }
        output
    }

    /// Computes `Mᵗ·v`. Only a substitute for `M⁻¹·v` when `M` is orthonormal,
    /// which holds for every orientation matrix the camera produces.
    pub fn multiply_transpose_vec(&self, v: &Vec6) -> Vec6 {
        let mut output = Vec6::ZERO;
        for j in 0..DIMENSIONS {
            let mut sum = 0.0;
            for i in 0..DIMENSIONS {
                sum += self[[i, j]] * v[i];
            }
            output[j] = sum;
        }
        output
    }

    /// Per-element interpolation. Intermediate results are generally not rotations.
    pub fn lerp(&self, other: &Mat6, t: f64) -> Mat6 {
        let mut values = [0.0; ELEMENTS];
        for (i, value) in values.iter_mut().enumerate() {
            *value = self.values[i] + (other.values[i] - self.values[i]) * t;
        }
        Mat6 { values }
    }

    pub fn max_abs_diff(&self, other: &Mat6) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl core::ops::Index<[usize; 2]> for Mat6 {
    type Output = f64;
    fn index(&self, index: [usize; 2]) -> &Self::Output {
        assert!(
            index[0] < DIMENSIONS && index[1] < DIMENSIONS,
            "invalid Mat6 index {index:?}"
        );
        &self.values[index[1] * DIMENSIONS + index[0]]
    }
}

impl core::ops::IndexMut<[usize; 2]> for Mat6 {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut Self::Output {
        assert!(
            index[0] < DIMENSIONS && index[1] < DIMENSIONS,
            "invalid Mat6 index {index:?}"
        );
        &mut self.values[index[1] * DIMENSIONS + index[0]]
    }
}

impl core::ops::Mul<Vec6> for Mat6 {
    type Output = Vec6;

    fn mul(self, rhs: Vec6) -> Self::Output {
        self.multiply_vec(&rhs)
    }
}

impl core::ops::Mul<Mat6> for Mat6 {
    type Output = Mat6;

    fn mul(self, rhs: Mat6) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Serialize for Mat6 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

impl<'de> Deserialize<'de> for Mat6 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Mat6::try_from_slice(&values).map_err(serde::de::Error::custom)
    }
}
