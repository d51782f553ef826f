use wasm_bindgen::prelude::*;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::behavior::Easing;
use crate::camera::MandelbrotCamera;
use crate::input::{InputMode, KeyboardState};
use crate::preset::Preset;
use crate::uniforms::FrameUniforms;

#[wasm_bindgen(start)]
pub fn start() {
    crate::init_logging();
}

/// DOM `KeyboardEvent.code` values for the keys the camera listens to.
fn key_code_from_dom(code: &str) -> Option<KeyCode> {
    Some(match code {
        "KeyA" => KeyCode::KeyA,
        "KeyD" => KeyCode::KeyD,
        "KeyW" => KeyCode::KeyW,
        "KeyS" => KeyCode::KeyS,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "Space" => KeyCode::Space,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "BracketLeft" => KeyCode::BracketLeft,
        "BracketRight" => KeyCode::BracketRight,
        _ => return None,
    })
}

/// Browser-facing handle around one camera and its keyboard state.
#[wasm_bindgen]
pub struct WasmCamera {
    camera: MandelbrotCamera,
    keyboard: KeyboardState,
}

#[wasm_bindgen]
impl WasmCamera {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCamera {
        WasmCamera {
            camera: MandelbrotCamera::new(),
            keyboard: KeyboardState::new(),
        }
    }

    /// Feeds a key transition. Returns whether the key is one the camera uses,
    /// so the page can suppress its default action.
    pub fn key_event(&mut self, code: &str, pressed: bool, repeat: bool) -> bool {
        let Some(key) = key_code_from_dom(code) else {
            return false;
        };
        let key = PhysicalKey::Code(key);
        if let Some(command) = self.keyboard.handle_physical_key(key, pressed, repeat) {
            self.camera.handle_command(command);
        }
        true
    }

    /// Drops every held key, e.g. when the canvas loses focus.
    pub fn release_keys(&mut self) {
        self.keyboard.release_all();
    }

    pub fn select_mode(&mut self, id: usize) {
        if let Some(mode) = InputMode::from_id(id) {
            self.camera.select_input_mode(mode);
        }
    }

    pub fn mode(&self) -> usize {
        self.camera.input_mode.id()
    }

    pub fn mode_label(&self) -> String {
        self.camera.input_mode.label().to_owned()
    }

    /// Advances one frame; `time_ms` is a `requestAnimationFrame` timestamp.
    pub fn update(&mut self, time_ms: f64) {
        let intent = self.keyboard.intent();
        self.camera.update(&intent, time_ms);
    }

    /// Advances one frame on the camera's own clock, for hosts without a
    /// frame timestamp.
    pub fn tick(&mut self) {
        let intent = self.keyboard.intent();
        self.camera.update_now(&intent);
    }

    pub fn uniforms(&self) -> Vec<f32> {
        FrameUniforms::from_camera(&self.camera).as_f32_slice().to_vec()
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn speed_scale(&self) -> f64 {
        self.camera.speed_scale
    }

    pub fn preset_json(&self) -> Result<String, JsError> {
        Ok(Preset::from_camera(&self.camera).to_json_string()?)
    }

    pub fn apply_preset_json(&mut self, json: &str) -> Result<(), JsError> {
        let preset = Preset::from_json_str(json)?;
        preset.apply(&mut self.camera);
        self.camera.clear_velocities();
        Ok(())
    }

    pub fn transition_to_json(&mut self, json: &str, duration_seconds: f64) -> Result<(), JsError> {
        let preset = Preset::from_json_str(json)?;
        self.camera
            .transition_to(preset, duration_seconds, Easing::EaseInOutBezier);
        Ok(())
    }
}

impl Default for WasmCamera {
    fn default() -> Self {
        Self::new()
    }
}
