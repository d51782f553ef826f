use serde::{Deserialize, Serialize};

use crate::camera::MandelbrotCamera;
use crate::preset::Preset;

/// Something that drives the camera for a while, updated once per frame after
/// the kinematic integration and dropped once it reports completion.
pub trait CameraBehavior {
    fn update(&mut self, camera: &mut MandelbrotCamera, delta_time: f64);
    fn should_remove(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutBezier,
    EaseInOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOutBezier => t * t * (3.0 - 2.0 * t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Eases the camera from one preset to another over a fixed duration.
pub struct PresetTransition {
    start: Preset,
    end: Preset,
    duration: f64,
    elapsed: f64,
    easing: Easing,
    finished: bool,
}

impl PresetTransition {
    pub fn new(start: Preset, end: Preset, duration: f64, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            easing,
            finished: false,
        }
    }

    /// Linear progress through the transition, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

impl CameraBehavior for PresetTransition {
    fn update(&mut self, camera: &mut MandelbrotCamera, delta_time: f64) {
        if self.finished {
            return;
        }
        self.elapsed += delta_time;
        let t = self.easing.apply(self.progress());
        if t >= 1.0 {
            self.end.apply(camera);
            self.finished = true;
            log::debug!("transition finished after {:.3}s", self.elapsed);
        } else {
            self.start.lerp(&self.end, t).apply(camera);
        }
    }

    fn should_remove(&self) -> bool {
        self.finished
    }
}
