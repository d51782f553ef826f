use cgmath::{InnerSpace, Vector2, Zero};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::plane_mapping::{
    PlaneMapping, JULIA_TO_EXPONENT, MANDELBROT_TO_EXPONENT, MANDELBROT_TO_JULIA,
};
use crate::vec6::Vec6;

const ROTATE_SPEED: f64 = 0.2;
const ROTATIONAL_VELOCITY_LERP: f64 = 10.0;

/// Tuning for one input mode: which axes the four movement keys drive, which
/// plane set the secondary keys rotate, and how fast everything responds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputModeOptions {
    pub horizontal_axis: Vec6,
    pub vertical_axis: Vec6,
    pub rotation_plane_mappings: &'static [PlaneMapping],
    pub move_speed: f64,
    pub velocity_lerp: f64,
    pub rotate_speed: f64,
    pub rotational_velocity_lerp: f64,
    pub zoom_speed: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Pan the Mandelbrot plane, zoom with the secondary keys.
    #[default]
    Regular,
    /// Pan the Julia seed, rotate toward the Julia cross-section.
    JuliaWise,
    /// Pan the exponent, rotate toward the exponent cross-section.
    ExponentWise,
    /// Pan the exponent, rotate the Julia plane into the exponent plane.
    JuliaToExponentWise,
}

impl InputMode {
    pub const ALL: [InputMode; 4] = [
        InputMode::Regular,
        InputMode::JuliaWise,
        InputMode::ExponentWise,
        InputMode::JuliaToExponentWise,
    ];

    pub fn options(self) -> InputModeOptions {
        match self {
            InputMode::Regular => InputModeOptions {
                horizontal_axis: Vec6::X,
                vertical_axis: Vec6::Y,
                rotation_plane_mappings: &[],
                move_speed: 0.6,
                velocity_lerp: 5.0,
                rotate_speed: ROTATE_SPEED,
                rotational_velocity_lerp: ROTATIONAL_VELOCITY_LERP,
                zoom_speed: -2.0,
            },
            InputMode::JuliaWise => InputModeOptions {
                horizontal_axis: Vec6::Z,
                vertical_axis: Vec6::W,
                rotation_plane_mappings: &MANDELBROT_TO_JULIA,
                move_speed: 0.3,
                velocity_lerp: 10.0,
                rotate_speed: ROTATE_SPEED,
                rotational_velocity_lerp: ROTATIONAL_VELOCITY_LERP,
                zoom_speed: 0.0,
            },
            InputMode::ExponentWise => InputModeOptions {
                horizontal_axis: Vec6::V,
                vertical_axis: Vec6::U,
                rotation_plane_mappings: &MANDELBROT_TO_EXPONENT,
                move_speed: 0.3,
                velocity_lerp: 10.0,
                rotate_speed: ROTATE_SPEED,
                rotational_velocity_lerp: ROTATIONAL_VELOCITY_LERP,
                zoom_speed: 0.0,
            },
            InputMode::JuliaToExponentWise => InputModeOptions {
                horizontal_axis: Vec6::V,
                vertical_axis: Vec6::U,
                rotation_plane_mappings: &JULIA_TO_EXPONENT,
                move_speed: 0.3,
                velocity_lerp: 10.0,
                rotate_speed: ROTATE_SPEED,
                rotational_velocity_lerp: ROTATIONAL_VELOCITY_LERP,
                zoom_speed: 0.0,
            },
        }
    }

    /// Mode bound to the digit keys 1-4, counted from zero.
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn id(self) -> usize {
        match self {
            InputMode::Regular => 0,
            InputMode::JuliaWise => 1,
            InputMode::ExponentWise => 2,
            InputMode::JuliaToExponentWise => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            InputMode::Regular => InputMode::JuliaWise,
            InputMode::JuliaWise => InputMode::ExponentWise,
            InputMode::ExponentWise => InputMode::JuliaToExponentWise,
            InputMode::JuliaToExponentWise => InputMode::Regular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Regular => "REGULAR",
            InputMode::JuliaWise => "JULIA",
            InputMode::ExponentWise => "EXPONENT",
            InputMode::JuliaToExponentWise => "JULIA→EXP",
        }
    }

    /// Whether movement currently pans the Julia seed plane.
    pub fn can_move_julia(self) -> bool {
        let options = self.options();
        options.horizontal_axis == Vec6::Z && options.vertical_axis == Vec6::W
    }

    /// Whether movement currently pans the exponent plane.
    pub fn can_move_exponent(self) -> bool {
        let options = self.options();
        options.horizontal_axis == Vec6::V && options.vertical_axis == Vec6::U
    }
}

/// Held state of the six movement keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sneak: bool,
    pub jump: bool,
}

/// Per-frame movement request consumed by the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementIntent {
    /// Unit-length or zero.
    pub move_direction: Vector2<f64>,
    /// -1, 0 or 1.
    pub secondary_movement: f64,
}

impl Default for MovementIntent {
    fn default() -> Self {
        Self::NONE
    }
}

impl MovementIntent {
    pub const NONE: Self = Self {
        move_direction: Vector2 { x: 0.0, y: 0.0 },
        secondary_movement: 0.0,
    };

    /// Builds an intent, normalizing a non-zero direction and clamping the
    /// secondary axis to `[-1, 1]`.
    pub fn new(move_direction: Vector2<f64>, secondary_movement: f64) -> Self {
        let move_direction = if move_direction.is_zero() {
            move_direction
        } else {
            move_direction.normalize()
        };
        Self {
            move_direction,
            secondary_movement: secondary_movement.clamp(-1.0, 1.0),
        }
    }

    pub fn from_keys(keys: &KeyFlags) -> Self {
        let mut move_direction = Vector2::new(0.0, 0.0);
        let mut secondary_movement = 0.0;

        if keys.left {
            move_direction.x -= 1.0;
        }
        if keys.right {
            move_direction.x += 1.0;
        }
        if keys.up {
            move_direction.y += 1.0;
        }
        if keys.down {
            move_direction.y -= 1.0;
        }
        if keys.sneak {
            secondary_movement -= 1.0;
        }
        if keys.jump {
            secondary_movement += 1.0;
        }

        Self::new(move_direction, secondary_movement)
    }

    pub fn is_idle(&self) -> bool {
        self.move_direction.is_zero() && self.secondary_movement == 0.0
    }
}

/// One-shot requests raised by key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    SelectMode(InputMode),
    HalveSpeed,
    DoubleSpeed,
}

/// Tracks held keys from window events and turns presses into commands.
///
/// Whether a text field currently has focus is the host's concern; it should
/// simply not forward those events.
#[derive(Clone, Debug, Default)]
pub struct KeyboardState {
    keys: KeyFlags,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> KeyFlags {
        self.keys
    }

    pub fn intent(&self) -> MovementIntent {
        MovementIntent::from_keys(&self.keys)
    }

    pub fn release_all(&mut self) {
        self.keys = KeyFlags::default();
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<KeyCommand> {
        self.handle_physical_key(event.physical_key, event.state.is_pressed(), event.repeat)
    }

    /// Held keys follow every transition, auto-repeats included. Commands
    /// only fire on the initial press.
    pub fn handle_physical_key(
        &mut self,
        key: PhysicalKey,
        pressed: bool,
        repeat: bool,
    ) -> Option<KeyCommand> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let command = self.handle_key(code, pressed);
        if repeat {
            return None;
        }
        command
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) -> Option<KeyCommand> {
        match code {
            KeyCode::KeyA | KeyCode::ArrowLeft => self.keys.left = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.keys.right = pressed,
            KeyCode::KeyW | KeyCode::ArrowUp => self.keys.up = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.keys.down = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.keys.sneak = pressed,
            KeyCode::Space => self.keys.jump = pressed,
            _ if !pressed => {}
            KeyCode::Digit1 => return Some(KeyCommand::SelectMode(InputMode::Regular)),
            KeyCode::Digit2 => return Some(KeyCommand::SelectMode(InputMode::JuliaWise)),
            KeyCode::Digit3 => return Some(KeyCommand::SelectMode(InputMode::ExponentWise)),
            KeyCode::Digit4 => {
                return Some(KeyCommand::SelectMode(InputMode::JuliaToExponentWise))
            }
            KeyCode::BracketLeft => return Some(KeyCommand::HalveSpeed),
            KeyCode::BracketRight => return Some(KeyCommand::DoubleSpeed),
            _ => {}
        }
        None
    }
}
