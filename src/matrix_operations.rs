use std::f64::consts::FRAC_PI_2;

use crate::mat6::Mat6;
use crate::vec6::{Vec6, DIMENSIONS};

/// Below this remainder length two directions are treated as parallel.
const DEGENERATE_PLANE_EPSILON: f64 = 1e-10;

/// Default margin used when snapping near-axis directions.
pub const CARDINAL_SNAP_THRESHOLD: f64 = 1e-5;

/// Elementary rotation by `angle` in the plane spanned by two coordinate axes,
/// turning `axis1` toward `axis2`.
pub fn rotation_from_axis_indices(axis1: usize, axis2: usize, angle: f64) -> Mat6 {
    let cos_theta = angle.cos();
    let sin_theta = angle.sin();
    let mut m = Mat6::identity();
    m[[axis1, axis1]] = cos_theta;
    m[[axis1, axis2]] = -sin_theta;
    m[[axis2, axis1]] = sin_theta;
    m[[axis2, axis2]] = cos_theta;
    m
}

/// Double-plane rotation carrying the `(from_a, from_b)` plane toward
/// `(to_a, to_b)`: `from_a` turns toward `to_a` and `from_b` toward `to_b`,
/// both by `angle`.
pub fn plane_mapping_rotation(
    from_a: usize,
    from_b: usize,
    to_a: usize,
    to_b: usize,
    angle: f64,
) -> Mat6 {
    rotation_from_axis_indices(from_a, to_a, angle) * rotation_from_axis_indices(from_b, to_b, angle)
}

/// Quarter-turn plane mapping, e.g. `(0, 1, 2, 3)` turns the Mandelbrot view
/// into the Julia view.
pub fn quarter_turn_plane_mapping(from_a: usize, from_b: usize, to_a: usize, to_b: usize) -> Mat6 {
    plane_mapping_rotation(from_a, from_b, to_a, to_b, FRAC_PI_2)
}

fn outer(a: &Vec6, b: &Vec6) -> Mat6 {
    let mut m = Mat6::ZERO;
    for i in 0..DIMENSIONS {
        for j in 0..DIMENSIONS {
            m[[i, j]] = a[i] * b[j];
        }
    }
    m
}

/// Rotation by `angle` in the plane spanned by two arbitrary directions,
/// turning `axis1` toward `axis2`.
///
/// `axis2` is orthonormalized against `axis1` first. Parallel directions span
/// no plane, so the identity is returned for them.
pub fn rotation_from_axes(axis1: &Vec6, axis2: &Vec6, angle: f64) -> Mat6 {
    let u1 = axis1.normalize();
    let remainder = *axis2 - u1 * axis2.dot(&u1);
    let remainder_length = remainder.length();
    if u1.is_zero() || remainder_length < DEGENERATE_PLANE_EPSILON {
        return Mat6::identity();
    }
    let u2 = remainder / remainder_length;

    let sin_theta = angle.sin();
    let cos_minus_one = angle.cos() - 1.0;
    let u2u1 = outer(&u2, &u1);
    let u1u2 = outer(&u1, &u2);
    let u1u1 = outer(&u1, &u1);
    let u2u2 = outer(&u2, &u2);

    let mut m = Mat6::identity();
    for i in 0..DIMENSIONS {
        for j in 0..DIMENSIONS {
            m[[i, j]] += sin_theta * (u2u1[[i, j]] - u1u2[[i, j]])
                + cos_minus_one * (u1u1[[i, j]] + u2u2[[i, j]]);
        }
    }
    m
}

/// Replaces a direction lying within `threshold` of a signed coordinate axis
/// with that exact axis. Axes are tested in x, y, z, w, v, u order.
pub fn snap_to_cardinal_direction(vec: Vec6, threshold: f64) -> Vec6 {
    for axis in 0..DIMENSIONS {
        if vec[axis] > 1.0 - threshold {
            return Vec6::from_index(axis);
        }
        if vec[axis] < -1.0 + threshold {
            return -Vec6::from_index(axis);
        }
    }
    vec
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_orthogonal(m: &Mat6) {
        let product = m.transpose() * *m;
        let error = product.max_abs_diff(&Mat6::identity());
        assert!(error < 1e-12, "MᵗM deviates from identity by {error}");
    }

    #[test]
    fn axis_rotation_turns_first_axis_toward_second() {
        for axis1 in 0..DIMENSIONS {
            for axis2 in 0..DIMENSIONS {
                if axis1 == axis2 {
                    continue;
                }
                for angle in [0.0, 0.3, -1.2, PI / 2.0, 2.5, PI] {
                    let m = rotation_from_axis_indices(axis1, axis2, angle);
                    let rotated = m * Vec6::from_index(axis1);
                    let expected =
                        Vec6::from_index(axis1) * angle.cos() + Vec6::from_index(axis2) * angle.sin();
                    assert!((rotated - expected).length() < 1e-12);
                    assert_orthogonal(&m);
                }
            }
        }
    }

    #[test]
    fn quarter_turn_maps_mandelbrot_plane_onto_julia_plane() {
        let m = quarter_turn_plane_mapping(0, 1, 2, 3);
        assert!((m * Vec6::X - Vec6::Z).length() < 1e-12);
        assert!((m * Vec6::Y - Vec6::W).length() < 1e-12);
        assert!((m * Vec6::V - Vec6::V).length() < 1e-12);
        assert_orthogonal(&m);
    }

    #[test]
    fn axes_rotation_matches_axis_indices_for_basis_vectors() {
        for angle in [0.1, -0.7, 1.9] {
            let general = rotation_from_axes(&Vec6::X, &Vec6::V, angle);
            let elementary = rotation_from_axis_indices(0, 4, angle);
            assert!(general.max_abs_diff(&elementary) < 1e-12);
        }
    }

    #[test]
    fn axes_rotation_orthonormalizes_second_direction() {
        let a = Vec6::new(1.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        let b = Vec6::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let m = rotation_from_axes(&a, &b, 0.8);
        assert_orthogonal(&m);
        // Directions outside the plane are untouched.
        assert!((m * Vec6::Z - Vec6::Z).length() < 1e-12);
        let rotated = m * a.normalize();
        assert!((rotated.dot(&a.normalize()) - 0.8f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn parallel_axes_yield_identity() {
        let a = Vec6::new(0.0, 2.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(rotation_from_axes(&a, &Vec6::Y, 1.0), Mat6::identity());
        assert_eq!(rotation_from_axes(&a, &(-a), 1.0), Mat6::identity());
        assert_eq!(rotation_from_axes(&Vec6::ZERO, &Vec6::Y, 1.0), Mat6::identity());
    }

    #[test]
    fn snapping_only_affects_near_axis_vectors() {
        let near = Vec6::new(0.0, 0.0, -0.999_999_9, 1e-4, 0.0, 0.0);
        assert_eq!(snap_to_cardinal_direction(near, CARDINAL_SNAP_THRESHOLD), Vec6::NEG_Z);
        let near_u = Vec6::new(1e-7, 0.0, 0.0, 0.0, 0.0, 0.999_999_99);
        assert_eq!(snap_to_cardinal_direction(near_u, CARDINAL_SNAP_THRESHOLD), Vec6::U);
        let diagonal = Vec6::new(0.7, 0.7, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(snap_to_cardinal_direction(diagonal, CARDINAL_SNAP_THRESHOLD), diagonal);
    }
}
