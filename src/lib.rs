pub mod behavior;
pub mod camera;
pub mod error;
pub mod input;
pub mod mat6;
pub mod matrix_operations;
pub mod plane_mapping;
pub mod preset;
pub mod presets;
pub mod settings;
pub mod simplified_rotation;
pub mod uniforms;
pub mod vec6;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use behavior::{CameraBehavior, Easing, PresetTransition};
pub use camera::{FrameClock, IndicatorSetting, MandelbrotCamera, RotationVelocity};
pub use error::{Error, Result};
pub use input::{InputMode, KeyCommand, KeyFlags, KeyboardState, MovementIntent};
pub use mat6::Mat6;
pub use plane_mapping::{PlaneMapping, SimplifiedAxis};
pub use preset::{Orientation, Preset};
pub use settings::CameraSettings;
pub use simplified_rotation::SimplifiedRotation;
pub use uniforms::FrameUniforms;
pub use vec6::Vec6;

/// Sets up logging for the current platform. Calling it more than once is
/// harmless.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let _ = console_log::init_with_level(log::Level::Debug);
        } else {
            let _ = env_logger::try_init();
        }
    }
}
