use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::{IndicatorSetting, MandelbrotCamera, MAX_SPEED_SCALE, MIN_SPEED_SCALE};
use crate::error::Result;
use crate::preset::bailout_radius;
use crate::vec6::Vec6;

const SETTINGS_SCHEMA_VERSION: u32 = 1;
const SETTINGS_FILE_NAME: &str = "settings.json";
const SETTINGS_APP_DIR: &str = "hexabrot";

const DEFAULT_INDICATOR_SIZE: f64 = 0.0025;
const DEFAULT_SMOOTHING_RADIUS: f64 = 2.0;
const SPRING_SCALE_MIN: f64 = 0.05;
const SPRING_SCALE_MAX: f64 = 20.0;
const ITERATIONS_CEILING: u32 = 100_000;

/// User tunables persisted between sessions. Camera pose is not part of it;
/// that lives in presets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraSettings {
    pub schema_version: u32,
    pub speed_scale: f64,
    pub spring_scale: f64,
    pub move_on_local_axes: bool,
    pub rotate_on_local_axes: bool,
    pub z_indicator_size: f64,
    pub e_indicator_size: f64,
    pub z_indicator_setting: IndicatorSetting,
    pub e_indicator_setting: IndicatorSetting,
    pub iterations_base: f64,
    pub iterations_per_zoom: f64,
    pub iterations_min: u32,
    pub iterations_max: u32,
    #[serde(with = "bailout_radius")]
    pub bailout_radius: f64,
    pub smoothing_enabled: bool,
    pub smoothing_radius: f64,
    pub animation_offset: Vec6,
    pub animation_progress: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            speed_scale: 1.0,
            spring_scale: 1.0,
            move_on_local_axes: true,
            rotate_on_local_axes: false,
            z_indicator_size: DEFAULT_INDICATOR_SIZE,
            e_indicator_size: DEFAULT_INDICATOR_SIZE,
            z_indicator_setting: IndicatorSetting::WhenToolSelected,
            e_indicator_setting: IndicatorSetting::WhenToolSelected,
            iterations_base: 100.0,
            iterations_per_zoom: 50.0,
            iterations_min: 100,
            iterations_max: 5000,
            bailout_radius: f64::INFINITY,
            smoothing_enabled: false,
            smoothing_radius: DEFAULT_SMOOTHING_RADIUS,
            animation_offset: Vec6::new(0.1, 0.1, 0.0, 0.0, 0.0, 0.0),
            animation_progress: 0.0,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl CameraSettings {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.schema_version = SETTINGS_SCHEMA_VERSION;
        self.speed_scale = positive_or(self.speed_scale, defaults.speed_scale)
            .clamp(MIN_SPEED_SCALE, MAX_SPEED_SCALE);
        self.spring_scale = positive_or(self.spring_scale, defaults.spring_scale)
            .clamp(SPRING_SCALE_MIN, SPRING_SCALE_MAX);
        self.z_indicator_size = if self.z_indicator_size.is_finite() {
            self.z_indicator_size.max(0.0)
        } else {
            defaults.z_indicator_size
        };
        self.e_indicator_size = if self.e_indicator_size.is_finite() {
            self.e_indicator_size.max(0.0)
        } else {
            defaults.e_indicator_size
        };
        if !self.iterations_base.is_finite() {
            self.iterations_base = defaults.iterations_base;
        }
        if !self.iterations_per_zoom.is_finite() {
            self.iterations_per_zoom = defaults.iterations_per_zoom;
        }
        self.iterations_min = self.iterations_min.clamp(1, ITERATIONS_CEILING);
        self.iterations_max = self
            .iterations_max
            .clamp(self.iterations_min, ITERATIONS_CEILING);
        self.bailout_radius = positive_or(self.bailout_radius, f64::INFINITY);
        self.smoothing_radius = positive_or(self.smoothing_radius, defaults.smoothing_radius);
        self.animation_progress = if self.animation_progress.is_finite() {
            self.animation_progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    pub fn from_camera(camera: &MandelbrotCamera) -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            speed_scale: camera.speed_scale,
            spring_scale: camera.spring_scale,
            move_on_local_axes: camera.move_on_local_axes,
            rotate_on_local_axes: camera.rotate_on_local_axes,
            z_indicator_size: camera.z_indicator_size,
            e_indicator_size: camera.e_indicator_size,
            z_indicator_setting: camera.z_indicator_setting,
            e_indicator_setting: camera.e_indicator_setting,
            iterations_base: camera.iterations_base,
            iterations_per_zoom: camera.iterations_per_zoom,
            iterations_min: camera.iterations_min,
            iterations_max: camera.iterations_max,
            bailout_radius: camera.bailout_radius,
            smoothing_enabled: camera.smoothing_enabled,
            smoothing_radius: camera.smoothing_radius,
            animation_offset: camera.animation_offset,
            animation_progress: camera.animation_progress,
        }
        .sanitized()
    }

    pub fn apply_to(&self, camera: &mut MandelbrotCamera) {
        let settings = self.clone().sanitized();
        camera.speed_scale = settings.speed_scale;
        camera.spring_scale = settings.spring_scale;
        camera.move_on_local_axes = settings.move_on_local_axes;
        camera.rotate_on_local_axes = settings.rotate_on_local_axes;
        camera.z_indicator_size = settings.z_indicator_size;
        camera.e_indicator_size = settings.e_indicator_size;
        camera.z_indicator_setting = settings.z_indicator_setting;
        camera.e_indicator_setting = settings.e_indicator_setting;
        camera.iterations_base = settings.iterations_base;
        camera.iterations_per_zoom = settings.iterations_per_zoom;
        camera.iterations_min = settings.iterations_min;
        camera.iterations_max = settings.iterations_max;
        camera.bailout_radius = settings.bailout_radius;
        camera.smoothing_enabled = settings.smoothing_enabled;
        camera.smoothing_radius = settings.smoothing_radius;
        camera.animation_offset = settings.animation_offset;
        camera.animation_progress = settings.animation_progress;
    }
}

/// Environment variable that points the settings file somewhere else.
pub const SETTINGS_PATH_ENV: &str = "HEXABROT_SETTINGS";

impl CameraSettings {
    /// Where settings live when the host names no file: `$HEXABROT_SETTINGS`,
    /// else `hexabrot/settings.json` under the user's config directory, else
    /// the working directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        match config_dir() {
            Some(base) => base.join(SETTINGS_APP_DIR).join(SETTINGS_FILE_NAME),
            None => PathBuf::from(SETTINGS_FILE_NAME),
        }
    }

    /// Reads and sanitizes settings. Returns `None` when the file is missing
    /// or unusable, including files written by a newer schema.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::debug!("No camera settings at {}", path.display());
                return None;
            }
            Err(error) => {
                log::warn!("Could not read camera settings {}: {error}", path.display());
                return None;
            }
        };

        let settings: CameraSettings = match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(error) => {
                log::warn!("Ignoring malformed camera settings {}: {error}", path.display());
                return None;
            }
        };
        if settings.schema_version > SETTINGS_SCHEMA_VERSION {
            log::warn!(
                "Ignoring camera settings {} with schema {} (this build reads up to {})",
                path.display(),
                settings.schema_version,
                SETTINGS_SCHEMA_VERSION
            );
            return None;
        }
        Some(settings.sanitized())
    }

    /// Writes sanitized settings through a sibling temp file, so a crash
    /// mid-write leaves the previous file intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&self.clone().sanitized())?;
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, path)?;
        log::debug!("Saved camera settings to {}", path.display());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn config_dir() -> Option<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            None
        } else if #[cfg(target_os = "windows")] {
            env_path("APPDATA")
        } else if #[cfg(target_os = "macos")] {
            env_path("HOME").map(|home| home.join("Library/Application Support"))
        } else {
            env_path("XDG_CONFIG_HOME").or_else(|| env_path("HOME").map(|home| home.join(".config")))
        }
    }
}
