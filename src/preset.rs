use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::camera::{lerp, MandelbrotCamera};
use crate::error::{ensure_finite, Error, Result};
use crate::mat6::Mat6;
use crate::simplified_rotation::SimplifiedRotation;
use crate::vec6::Vec6;

/// How a preset stores its orientation.
#[derive(Clone, Debug, PartialEq)]
pub enum Orientation {
    Simplified(SimplifiedRotation),
    Matrix(Mat6),
}

impl Orientation {
    pub fn to_matrix(&self) -> Mat6 {
        match self {
            Orientation::Simplified(rotation) => rotation.to_matrix(),
            Orientation::Matrix(matrix) => *matrix,
        }
    }
}

/// Serializable snapshot of a camera view.
///
/// Fields left as `None` are not touched when the preset is applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PresetJson", into = "PresetJson")]
pub struct Preset {
    pub position: Vec6,
    pub zoom: f64,
    pub orientation: Option<Orientation>,
    pub bailout_radius: Option<f64>,
    pub smoothing_enabled: Option<bool>,
    pub smoothing_radius: Option<f64>,
}

impl Preset {
    /// Preset with only a position, zoom and orientation.
    pub fn new(position: Vec6, zoom: f64, orientation: Orientation) -> Self {
        Self {
            position,
            zoom,
            orientation: Some(orientation),
            bailout_radius: None,
            smoothing_enabled: None,
            smoothing_radius: None,
        }
    }

    pub fn from_camera(camera: &MandelbrotCamera) -> Self {
        let orientation = if camera.simplified_rotation_active {
            Orientation::Simplified(camera.simplified_rotation.clone())
        } else {
            Orientation::Matrix(camera.orientation_matrix)
        };
        Self {
            position: camera.position,
            zoom: camera.zoom,
            orientation: Some(orientation),
            bailout_radius: Some(camera.bailout_radius),
            smoothing_enabled: Some(camera.smoothing_enabled),
            smoothing_radius: Some(camera.smoothing_radius),
        }
    }

    pub fn apply(&self, camera: &mut MandelbrotCamera) {
        camera.position = self.position;
        camera.zoom = self.zoom;

        match &self.orientation {
            Some(Orientation::Simplified(rotation)) => {
                camera.simplified_rotation = rotation.clone();
                camera.simplified_rotation_active = true;
                camera.orientation_matrix = rotation.to_matrix();
            }
            Some(Orientation::Matrix(matrix)) => {
                camera.orientation_matrix = *matrix;
                camera.simplified_rotation_active = false;
            }
            None => {}
        }

        if let Some(bailout_radius) = self.bailout_radius {
            camera.bailout_radius = bailout_radius;
        }
        if let Some(smoothing_enabled) = self.smoothing_enabled {
            camera.smoothing_enabled = smoothing_enabled;
        }
        if let Some(smoothing_radius) = self.smoothing_radius {
            camera.smoothing_radius = smoothing_radius;
        }

        camera.refresh_derived();
    }

    /// Whether the camera currently shows exactly this preset.
    pub fn is_applied(&self, camera: &MandelbrotCamera) -> bool {
        let orientation_matches = match &self.orientation {
            Some(Orientation::Simplified(rotation)) => {
                camera.simplified_rotation_active && camera.simplified_rotation == *rotation
            }
            Some(Orientation::Matrix(matrix)) => {
                !camera.simplified_rotation_active && camera.orientation_matrix == *matrix
            }
            None => true,
        };

        camera.position == self.position
            && camera.zoom == self.zoom
            && orientation_matches
            && self.bailout_radius.map_or(true, |r| camera.bailout_radius == r)
            && self.smoothing_enabled.map_or(true, |s| camera.smoothing_enabled == s)
            && self.smoothing_radius.map_or(true, |r| camera.smoothing_radius == r)
    }

    /// Interpolates toward `target`. At `t >= 1` the result is `target`
    /// itself. Two simplified orientations interpolate by angle; any other
    /// pair falls back to per-element matrix interpolation, which is not
    /// orthogonal between the endpoints.
    pub fn lerp(&self, target: &Preset, t: f64) -> Preset {
        if t >= 1.0 {
            return target.clone();
        }

        let orientation = match (&self.orientation, &target.orientation) {
            (Some(Orientation::Simplified(a)), Some(Orientation::Simplified(b))) => {
                Some(Orientation::Simplified(a.lerp(b, t)))
            }
            (Some(a), Some(b)) => Some(Orientation::Matrix(a.to_matrix().lerp(&b.to_matrix(), t))),
            (start, _) => start.clone(),
        };

        let bailout_radius = match (self.bailout_radius, target.bailout_radius) {
            (Some(a), Some(b)) => {
                let r = lerp(a, b, t);
                // inf - inf is NaN; both endpoints at infinity stay there.
                Some(if r.is_finite() && r != 0.0 { r } else { f64::INFINITY })
            }
            (start, _) => start,
        };

        let smoothing_radius = match (self.smoothing_radius, target.smoothing_radius) {
            (Some(a), Some(b)) => Some(lerp(a, b, t)),
            (start, _) => start,
        };

        Preset {
            position: self.position.lerp(&target.position, t),
            zoom: lerp(self.zoom, target.zoom, t),
            orientation,
            bailout_radius,
            smoothing_enabled: self.smoothing_enabled,
            smoothing_radius,
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a preset, reporting malformed fields with a typed error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: PresetJson = serde_json::from_str(json)?;
        Preset::try_from(raw)
    }
}

/// Bailout radius on the wire: a positive number, or `"Infinity"`.
pub(crate) mod bailout_radius {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use crate::error::{Error, Result};

    const INFINITY: &str = "Infinity";

    pub fn to_value(radius: f64) -> Value {
        if radius.is_infinite() {
            Value::String(INFINITY.to_owned())
        } else {
            Value::from(radius)
        }
    }

    pub fn from_value(value: &Value) -> Result<f64> {
        let radius = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(s) if s == INFINITY => Some(f64::INFINITY),
            _ => None,
        };
        match radius {
            Some(r) if r > 0.0 => Ok(r),
            _ => Err(Error::InvalidBailoutRadius(value.to_string())),
        }
    }

    pub fn serialize<S: Serializer>(radius: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        to_value(*radius).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Keeps an explicit `null` apart from a missing field, so `try_from` can
/// reject it with the field's own error.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Optional field that may be left out but not set to `null`.
fn non_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresetJson {
    position: Vec6,
    zoom: f64,
    #[serde(
        default,
        alias = "escapeRadius",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    bailout_radius: Option<Value>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    smoothing_enabled: Option<bool>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    smoothing_radius: Option<f64>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    orientation_matrix: Option<Mat6>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    simplified_rotation: Option<Value>,
}

impl TryFrom<PresetJson> for Preset {
    type Error = Error;

    fn try_from(raw: PresetJson) -> Result<Self> {
        ensure_finite(&[raw.zoom])?;

        let simplified_rotation = raw
            .simplified_rotation
            .map(|value| {
                if !value.is_object() {
                    return Err(Error::InvalidSimplifiedRotation(format!(
                        "expected an object, got {value}"
                    )));
                }
                serde_json::from_value::<SimplifiedRotation>(value)
                    .map_err(|e| Error::InvalidSimplifiedRotation(e.to_string()))
            })
            .transpose()?;

        let orientation = match (raw.orientation_matrix, simplified_rotation) {
            (Some(_), Some(_)) => return Err(Error::ConflictingOrientation),
            (Some(matrix), None) => Some(Orientation::Matrix(matrix)),
            (None, Some(rotation)) => Some(Orientation::Simplified(rotation)),
            (None, None) => None,
        };

        let bailout_radius = raw
            .bailout_radius
            .as_ref()
            .map(bailout_radius::from_value)
            .transpose()?;

        if let Some(radius) = raw.smoothing_radius {
            ensure_finite(&[radius])?;
        }

        Ok(Preset {
            position: raw.position,
            zoom: raw.zoom,
            orientation,
            bailout_radius,
            smoothing_enabled: raw.smoothing_enabled,
            smoothing_radius: raw.smoothing_radius,
        })
    }
}

impl From<Preset> for PresetJson {
    fn from(preset: Preset) -> Self {
        let (orientation_matrix, simplified_rotation) = match preset.orientation {
            Some(Orientation::Matrix(matrix)) => (Some(matrix), None),
            Some(Orientation::Simplified(rotation)) => (
                None,
                Some(serde_json::json!({
                    "juliaWise": rotation.julia_wise,
                    "exponentWise": rotation.exponent_wise,
                    "juliaToExponentWise": rotation.julia_to_exponent_wise,
                })),
            ),
            None => (None, None),
        };
        PresetJson {
            position: preset.position,
            zoom: preset.zoom,
            bailout_radius: preset.bailout_radius.map(bailout_radius::to_value),
            smoothing_enabled: preset.smoothing_enabled,
            smoothing_radius: preset.smoothing_radius,
            orientation_matrix,
            simplified_rotation,
        }
    }
}
