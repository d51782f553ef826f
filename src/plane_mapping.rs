use crate::vec6::{DIMENSIONS, U_INDEX, V_INDEX, W_INDEX, X_INDEX, Y_INDEX, Z_INDEX};

/// One elementary rotation plane, identified by a pair of axis indices.
/// Rotating by a positive angle turns `axis1` toward `axis2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaneMapping {
    pub axis1: usize,
    pub axis2: usize,
}

impl PlaneMapping {
    pub const fn new(axis1: usize, axis2: usize) -> Self {
        assert!(axis1 < DIMENSIONS && axis2 < DIMENSIONS && axis1 != axis2);
        Self { axis1, axis2 }
    }

    /// The simplified-rotation angle whose plane set contains this mapping, if any.
    pub fn simplified_axis(&self) -> Option<SimplifiedAxis> {
        SimplifiedAxis::ALL
            .into_iter()
            .find(|axis| axis.mappings().contains(self))
    }
}

/// Turns the Mandelbrot (x, y) view into the Julia (z, w) cross-section.
pub const MANDELBROT_TO_JULIA: [PlaneMapping; 2] = [
    PlaneMapping::new(X_INDEX, Z_INDEX),
    PlaneMapping::new(Y_INDEX, W_INDEX),
];

/// Turns the Mandelbrot (x, y) view into the exponent (v, u) cross-section.
pub const MANDELBROT_TO_EXPONENT: [PlaneMapping; 2] = [
    PlaneMapping::new(X_INDEX, V_INDEX),
    PlaneMapping::new(Y_INDEX, U_INDEX),
];

/// Turns the Julia (z, w) plane into the exponent (v, u) plane.
pub const JULIA_TO_EXPONENT: [PlaneMapping; 2] = [
    PlaneMapping::new(Z_INDEX, V_INDEX),
    PlaneMapping::new(W_INDEX, U_INDEX),
];

/// The three independently controllable angles of a simplified rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimplifiedAxis {
    JuliaWise,
    ExponentWise,
    JuliaToExponentWise,
}

impl SimplifiedAxis {
    pub const ALL: [SimplifiedAxis; 3] = [
        SimplifiedAxis::JuliaWise,
        SimplifiedAxis::ExponentWise,
        SimplifiedAxis::JuliaToExponentWise,
    ];

    pub fn mappings(self) -> &'static [PlaneMapping] {
        match self {
            SimplifiedAxis::JuliaWise => &MANDELBROT_TO_JULIA,
            SimplifiedAxis::ExponentWise => &MANDELBROT_TO_EXPONENT,
            SimplifiedAxis::JuliaToExponentWise => &JULIA_TO_EXPONENT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SimplifiedAxis::JuliaWise => "julia-wise",
            SimplifiedAxis::ExponentWise => "exponent-wise",
            SimplifiedAxis::JuliaToExponentWise => "julia-to-exponent-wise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_mapping_resolves_to_its_set() {
        for axis in SimplifiedAxis::ALL {
            for mapping in axis.mappings() {
                assert_eq!(mapping.simplified_axis(), Some(axis));
            }
        }
    }

    #[test]
    fn labels_are_distinct() {
        let [a, b, c] = SimplifiedAxis::ALL.map(SimplifiedAxis::label);
        assert!(a != b && b != c && a != c);
        assert_eq!(SimplifiedAxis::JuliaWise.label(), "julia-wise");
    }

    #[test]
    fn unnamed_and_reversed_planes_have_no_simplified_axis() {
        assert_eq!(PlaneMapping::new(X_INDEX, Y_INDEX).simplified_axis(), None);
        assert_eq!(PlaneMapping::new(Z_INDEX, X_INDEX).simplified_axis(), None);
    }
}
