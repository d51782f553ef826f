use crate::mat6::Mat6;
use crate::matrix_operations::quarter_turn_plane_mapping;
use crate::preset::{Orientation, Preset};
use crate::simplified_rotation::SimplifiedRotation;
use crate::vec6::{Vec6, U_INDEX, V_INDEX, W_INDEX, X_INDEX, Y_INDEX, Z_INDEX};

const HOME_POSITION: Vec6 = Vec6::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0);
const HOME_ZOOM: f64 = -2.2;

/// A preset with a display name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedPreset {
    pub name: &'static str,
    pub preset: Preset,
}

/// The classic Mandelbrot set: exponent 2, zero Julia seed.
pub fn mandelbrot() -> Preset {
    Preset::new(
        HOME_POSITION,
        HOME_ZOOM,
        Orientation::Simplified(SimplifiedRotation::default()),
    )
}

/// The (z, w) Julia cross-section through the home position.
pub fn julia() -> Preset {
    Preset::new(
        HOME_POSITION,
        HOME_ZOOM,
        Orientation::Matrix(quarter_turn_plane_mapping(X_INDEX, Y_INDEX, Z_INDEX, W_INDEX)),
    )
}

/// The (v, u) exponent cross-section through the home position.
pub fn exponent() -> Preset {
    Preset::new(
        HOME_POSITION,
        HOME_ZOOM,
        Orientation::Matrix(quarter_turn_plane_mapping(X_INDEX, Y_INDEX, V_INDEX, U_INDEX)),
    )
}

pub fn tim_burton() -> Preset {
    #[rustfmt::skip]
    const ORIENTATION: [f64; 36] = [
        0.15613827463660174, 0.0, -0.9724009672242185, 0.0, 0.1733701189216852, 0.0,
        0.0, 0.15613827463660174, 0.0, -0.9724009672242185, 0.0, 0.1733701189216852,
        0.2798190822074983, 0.0, 0.2118785401777537, 0.0, 0.936380673361382, 0.0,
        0.0, 0.2798190822074983, 0.0, 0.2118785401777537, 0.0, 0.936380673361382,
        -0.9472708801742349, 0.0, -0.09769259518283437, 0.0, 0.30517869588223917, 0.0,
        0.0, -0.9472708801742349, 0.0, -0.09769259518283437, 0.0, 0.30517869588223917,
    ];
    Preset::new(
        Vec6::new(-0.2, -0.358, 0.0, 0.0, 1.82, -0.15),
        -1.8752568045196396,
        Orientation::Matrix(Mat6::from_column_major(ORIENTATION)),
    )
}

pub fn built_in() -> Vec<NamedPreset> {
    vec![
        NamedPreset {
            name: "Mandelbrot Set",
            preset: mandelbrot(),
        },
        NamedPreset {
            name: "Julia Set",
            preset: julia(),
        },
        NamedPreset {
            name: "Exponent Set",
            preset: exponent(),
        },
        NamedPreset {
            name: "Tim Burton Set",
            preset: tim_burton(),
        },
    ]
}

/// Looks up a built-in preset by name, ignoring case and a trailing " set".
pub fn find(name: &str) -> Option<Preset> {
    let wanted = name.trim().to_lowercase();
    let wanted = wanted.strip_suffix(" set").unwrap_or(&wanted);
    built_in().into_iter().find_map(|named| {
        let lowered = named.name.to_lowercase();
        let short = lowered.strip_suffix(" set").unwrap_or(&lowered);
        (short == wanted).then_some(named.preset)
    })
}
