use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ensure_finite, Error, Result};

pub const DIMENSIONS: usize = 6;

pub const X_INDEX: usize = 0;
pub const Y_INDEX: usize = 1;
pub const Z_INDEX: usize = 2;
pub const W_INDEX: usize = 3;
pub const V_INDEX: usize = 4;
pub const U_INDEX: usize = 5;

/// A point or direction in the six-dimensional parameter space.
///
/// Components are conventionally labelled x, y, z, w, v, u: (x, y) is the
/// Mandelbrot plane, (z, w) the Julia seed and (v, u) the exponent.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[repr(transparent)]
pub struct Vec6 {
    values: [f64; DIMENSIONS],
}

impl Vec6 {
    pub const ZERO: Self = Self { values: [0.0; DIMENSIONS] };

    pub const X: Self = Self::axis(X_INDEX, 1.0);
    pub const Y: Self = Self::axis(Y_INDEX, 1.0);
    pub const Z: Self = Self::axis(Z_INDEX, 1.0);
    pub const W: Self = Self::axis(W_INDEX, 1.0);
    pub const V: Self = Self::axis(V_INDEX, 1.0);
    pub const U: Self = Self::axis(U_INDEX, 1.0);

    pub const NEG_X: Self = Self::axis(X_INDEX, -1.0);
    pub const NEG_Y: Self = Self::axis(Y_INDEX, -1.0);
    pub const NEG_Z: Self = Self::axis(Z_INDEX, -1.0);
    pub const NEG_W: Self = Self::axis(W_INDEX, -1.0);
    pub const NEG_V: Self = Self::axis(V_INDEX, -1.0);
    pub const NEG_U: Self = Self::axis(U_INDEX, -1.0);

    const fn axis(index: usize, sign: f64) -> Self {
        let mut values = [0.0; DIMENSIONS];
        values[index] = sign;
        Self { values }
    }

    pub const fn new(x: f64, y: f64, z: f64, w: f64, v: f64, u: f64) -> Self {
        Self { values: [x, y, z, w, v, u] }
    }

    pub const fn from_array(values: [f64; DIMENSIONS]) -> Self {
        Self { values }
    }

    /// Builds a vector from untrusted data, rejecting wrong lengths and
    /// non-finite components.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; DIMENSIONS] = values
            .try_into()
            .map_err(|_| Error::InvalidVectorLength(values.len()))?;
        ensure_finite(&values)?;
        Ok(Self { values })
    }

    /// Unit basis vector for an axis index. Panics for indices outside `0..6`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < DIMENSIONS, "invalid Vec6 axis index {index}");
        Self::axis(index, 1.0)
    }

    pub fn x(&self) -> f64 {
        self[X_INDEX]
    }
    pub fn y(&self) -> f64 {
        self[Y_INDEX]
    }
    pub fn z(&self) -> f64 {
        self[Z_INDEX]
    }
    pub fn w(&self) -> f64 {
        self[W_INDEX]
    }
    pub fn v(&self) -> f64 {
        self[V_INDEX]
    }
    pub fn u(&self) -> f64 {
        self[U_INDEX]
    }

    pub fn to_array(&self) -> [f64; DIMENSIONS] {
        self.values
    }

    pub fn to_f32_array(&self) -> [f32; DIMENSIONS] {
        self.values.map(|v| v as f32)
    }

    pub fn dot(&self, other: &Vec6) -> f64 {
        let mut output = 0.0;
        for i in 0..DIMENSIONS {
            output += self.values[i] * other.values[i];
        }
        output
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(&self) -> Vec6 {
        let length = self.length();
        if length == 0.0 {
            return Vec6::ZERO;
        }
        self.scale(1.0 / length)
    }

    pub fn scale(&self, scalar: f64) -> Vec6 {
        Vec6 { values: self.values.map(|v| v * scalar) }
    }

    /// Component-wise affine interpolation. `t` is not clamped.
    pub fn lerp(&self, other: &Vec6, t: f64) -> Vec6 {
        let mut output = Vec6::ZERO;
        for i in 0..DIMENSIONS {
            output[i] = self.values[i] + (other.values[i] - self.values[i]) * t;
        }
        output
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

impl core::ops::Index<usize> for Vec6 {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl core::ops::IndexMut<usize> for Vec6 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

impl core::ops::Add<Vec6> for Vec6 {
    type Output = Vec6;

    fn add(self, rhs: Vec6) -> Self::Output {
        let mut output = Vec6::ZERO;
        for i in 0..DIMENSIONS {
            output[i] = self.values[i] + rhs.values[i];
        }
        output
    }
}

impl core::ops::Sub<Vec6> for Vec6 {
    type Output = Vec6;

    fn sub(self, rhs: Vec6) -> Self::Output {
        let mut output = Vec6::ZERO;
        for i in 0..DIMENSIONS {
            output[i] = self.values[i] - rhs.values[i];
        }
        output
    }
}

impl core::ops::Mul<f64> for Vec6 {
    type Output = Vec6;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl core::ops::Div<f64> for Vec6 {
    type Output = Vec6;

    fn div(self, rhs: f64) -> Self::Output {
        Vec6 { values: self.values.map(|v| v / rhs) }
    }
}

impl core::ops::Neg for Vec6 {
    type Output = Vec6;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl From<[f64; DIMENSIONS]> for Vec6 {
    fn from(values: [f64; DIMENSIONS]) -> Self {
        Self { values }
    }
}

impl TryFrom<&[f64]> for Vec6 {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::try_from_slice(values)
    }
}

impl Serialize for Vec6 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

impl<'de> Deserialize<'de> for Vec6 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Vec6::try_from_slice(&values).map_err(serde::de::Error::custom)
    }
}
