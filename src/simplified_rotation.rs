use std::cell::Cell;
use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::mat6::Mat6;
use crate::matrix_operations::plane_mapping_rotation;
use crate::plane_mapping::SimplifiedAxis;
use crate::vec6::{U_INDEX, V_INDEX, W_INDEX, X_INDEX, Y_INDEX, Z_INDEX};

/// Wraps an angle into `[-π, π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU itself.
    if wrapped >= PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Reduced orientation: three double-plane rotation angles.
///
/// Each angle drives one pair of planes (see [`SimplifiedAxis::mappings`]). The
/// pairs never share an axis with each other's partner, so a human can steer
/// each angle independently with a single input axis.
///
/// The reconstructed matrix is memoized per instance and keyed on the angle
/// values, so mutating the public fields invalidates it automatically.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifiedRotation {
    pub julia_wise: f64,
    pub exponent_wise: f64,
    pub julia_to_exponent_wise: f64,
    #[serde(skip)]
    memoized: Cell<Option<([f64; 3], Mat6)>>,
}

impl PartialEq for SimplifiedRotation {
    fn eq(&self, other: &Self) -> bool {
        self.angles() == other.angles()
    }
}

impl SimplifiedRotation {
    pub fn new(julia_wise: f64, exponent_wise: f64, julia_to_exponent_wise: f64) -> Self {
        Self {
            julia_wise,
            exponent_wise,
            julia_to_exponent_wise,
            memoized: Cell::new(None),
        }
    }

    pub fn angles(&self) -> [f64; 3] {
        [self.julia_wise, self.exponent_wise, self.julia_to_exponent_wise]
    }

    pub fn angle(&self, axis: SimplifiedAxis) -> f64 {
        match axis {
            SimplifiedAxis::JuliaWise => self.julia_wise,
            SimplifiedAxis::ExponentWise => self.exponent_wise,
            SimplifiedAxis::JuliaToExponentWise => self.julia_to_exponent_wise,
        }
    }

    pub fn angle_mut(&mut self, axis: SimplifiedAxis) -> &mut f64 {
        match axis {
            SimplifiedAxis::JuliaWise => &mut self.julia_wise,
            SimplifiedAxis::ExponentWise => &mut self.exponent_wise,
            SimplifiedAxis::JuliaToExponentWise => &mut self.julia_to_exponent_wise,
        }
    }

    /// Orientation matrix for these angles.
    ///
    /// Composition, applied right to left: julia-wise, then exponent-wise, then
    /// julia-to-exponent-wise.
    pub fn to_matrix(&self) -> Mat6 {
        let angles = self.angles();
        if let Some((cached_angles, matrix)) = self.memoized.get() {
            if cached_angles == angles {
                return matrix;
            }
        }

        let matrix = plane_mapping_rotation(Z_INDEX, W_INDEX, V_INDEX, U_INDEX, self.julia_to_exponent_wise)
            * plane_mapping_rotation(X_INDEX, Y_INDEX, V_INDEX, U_INDEX, self.exponent_wise)
            * plane_mapping_rotation(X_INDEX, Y_INDEX, Z_INDEX, W_INDEX, self.julia_wise);

        self.memoized.set(Some((angles, matrix)));
        matrix
    }

    /// Wraps every angle into `[-π, π)`.
    pub fn normalize(&mut self) {
        self.julia_wise = wrap_angle(self.julia_wise);
        self.exponent_wise = wrap_angle(self.exponent_wise);
        self.julia_to_exponent_wise = wrap_angle(self.julia_to_exponent_wise);
    }

    /// Raw per-angle interpolation. This does not take the shortest arc, so
    /// angles on opposite sides of ±π travel the long way around.
    pub fn lerp(&self, target: &SimplifiedRotation, t: f64) -> SimplifiedRotation {
        SimplifiedRotation::new(
            self.julia_wise + (target.julia_wise - self.julia_wise) * t,
            self.exponent_wise + (target.exponent_wise - self.exponent_wise) * t,
            self.julia_to_exponent_wise
                + (target.julia_to_exponent_wise - self.julia_to_exponent_wise) * t,
        )
    }

    #[cfg(test)]
    fn is_memoized(&self) -> bool {
        matches!(self.memoized.get(), Some((angles, _)) if angles == self.angles())
    }
}
