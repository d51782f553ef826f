use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::behavior::{CameraBehavior, Easing, PresetTransition};
use crate::input::{InputMode, KeyCommand, MovementIntent};
use crate::mat6::Mat6;
use crate::matrix_operations::{
    rotation_from_axes, rotation_from_axis_indices, snap_to_cardinal_direction,
    CARDINAL_SNAP_THRESHOLD,
};
use crate::plane_mapping::PlaneMapping;
use crate::preset::Preset;
use crate::presets;
use crate::simplified_rotation::SimplifiedRotation;
use crate::vec6::Vec6;

/// Velocities below this magnitude are zeroed once their target is zero, so
/// an idle camera stops producing state changes.
pub const VELOCITY_DEADZONE: f64 = 0.02;
pub const MIN_SPEED_SCALE: f64 = 1.0 / 64.0;
pub const MAX_SPEED_SCALE: f64 = 64.0;

pub const RIGHT_VECTOR: Vec6 = Vec6::X;
pub const UP_VECTOR: Vec6 = Vec6::Y;

/// Frame-rate independent interpolation factor for an exponential approach
/// at `rate` per second.
pub fn exp_lerp_factor(rate: f64, delta_time: f64) -> f64 {
    if delta_time <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * delta_time).exp()
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// When a plane indicator is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorSetting {
    Always,
    Never,
    /// Only while the input mode pans the indicator's plane.
    #[default]
    WhenToolSelected,
}

/// Rotation speed together with the plane set it currently drives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationVelocity {
    pub plane_mappings: &'static [PlaneMapping],
    pub amount: f64,
}

/// Converts host timestamps into frame deltas. The first frame has a delta of 0.
#[derive(Clone, Debug)]
pub struct FrameClock {
    origin: Instant,
    last_time_ms: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_time_ms: None,
        }
    }

    /// Milliseconds since this clock was created.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Seconds since the previous timestamp. Timestamps running backwards
    /// yield 0 rather than a negative step.
    pub fn delta_seconds(&mut self, current_time_ms: f64) -> f64 {
        let delta = match self.last_time_ms {
            Some(last) => ((current_time_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_time_ms = Some(current_time_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last_time_ms = None;
    }
}

/// Live viewpoint into the six-dimensional fractal.
///
/// The orientation is authoritative either as `simplified_rotation` (when
/// `simplified_rotation_active`) or as `orientation_matrix`. The simplified
/// angles are still bookkept while the matrix is authoritative.
pub struct MandelbrotCamera {
    pub input_mode: InputMode,

    pub position: Vec6,
    pub relative_position: Vec6,
    pub velocity: Vec6,

    pub up_vector: Vec6,
    pub right_vector: Vec6,

    pub zoom: f64,
    pub zoom_level: f64,
    pub zoom_velocity: f64,
    pub rotation_velocity: RotationVelocity,

    pub z_indicator_size: f64,
    pub e_indicator_size: f64,
    pub z_indicator_setting: IndicatorSetting,
    pub e_indicator_setting: IndicatorSetting,

    pub speed_scale: f64,
    pub spring_scale: f64,

    pub animation_offset: Vec6,
    pub animation_progress: f64,

    pub iterations_base: f64,
    pub iterations_per_zoom: f64,
    pub iterations_min: u32,
    pub iterations_max: u32,
    pub bailout_radius: f64,

    pub smoothing_enabled: bool,
    pub smoothing_radius: f64,

    pub orientation_matrix: Mat6,
    pub move_on_local_axes: bool,
    pub rotate_on_local_axes: bool,

    pub simplified_rotation_active: bool,
    pub simplified_rotation: SimplifiedRotation,

    behaviors: Vec<Box<dyn CameraBehavior>>,
    clock: FrameClock,
}

impl Default for MandelbrotCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl MandelbrotCamera {
    /// Camera at the identity Mandelbrot view.
    pub fn new() -> Self {
        let mut camera = MandelbrotCamera {
            input_mode: InputMode::Regular,
            position: Vec6::ZERO,
            relative_position: Vec6::ZERO,
            velocity: Vec6::ZERO,
            up_vector: UP_VECTOR,
            right_vector: RIGHT_VECTOR,
            zoom: 0.0,
            zoom_level: 1.0,
            zoom_velocity: 0.0,
            rotation_velocity: RotationVelocity::default(),
            z_indicator_size: 0.0025,
            e_indicator_size: 0.0025,
            z_indicator_setting: IndicatorSetting::WhenToolSelected,
            e_indicator_setting: IndicatorSetting::WhenToolSelected,
            speed_scale: 1.0,
            spring_scale: 1.0,
            animation_offset: Vec6::new(0.1, 0.1, 0.0, 0.0, 0.0, 0.0),
            animation_progress: 0.0,
            iterations_base: 100.0,
            iterations_per_zoom: 50.0,
            iterations_min: 100,
            iterations_max: 5000,
            bailout_radius: f64::INFINITY,
            smoothing_enabled: false,
            smoothing_radius: 2.0,
            orientation_matrix: Mat6::identity(),
            move_on_local_axes: true,
            rotate_on_local_axes: false,
            simplified_rotation_active: true,
            simplified_rotation: SimplifiedRotation::default(),
            behaviors: Vec::new(),
            clock: FrameClock::new(),
        };
        presets::mandelbrot().apply(&mut camera);
        camera
    }

    /// Camera initialized from an arbitrary preset.
    pub fn from_preset(preset: &Preset) -> Self {
        let mut camera = Self::new();
        preset.apply(&mut camera);
        camera
    }

    pub fn z_indicator_effective_size(&self) -> f64 {
        self.indicator_effective_size(
            self.z_indicator_size,
            self.z_indicator_setting,
            self.input_mode.can_move_julia(),
        )
    }

    pub fn e_indicator_effective_size(&self) -> f64 {
        self.indicator_effective_size(
            self.e_indicator_size,
            self.e_indicator_setting,
            self.input_mode.can_move_exponent(),
        )
    }

    fn indicator_effective_size(
        &self,
        indicator_size: f64,
        setting: IndicatorSetting,
        can_move_plane: bool,
    ) -> f64 {
        match setting {
            IndicatorSetting::Never => 0.0,
            IndicatorSetting::WhenToolSelected if !can_move_plane => 0.0,
            _ => indicator_size / self.zoom_level,
        }
    }

    /// Iteration budget that grows with magnification.
    pub fn max_iterations_computed(&self) -> u32 {
        let value = (self.iterations_base + self.zoom * self.iterations_per_zoom).round();
        value
            .min(self.iterations_max as f64)
            .max(self.iterations_min as f64) as u32
    }

    pub fn bailout_radius_squared(&self) -> f64 {
        self.bailout_radius * self.bailout_radius
    }

    /// Position handed to the renderer, including the animation offset.
    pub fn render_position(&self) -> Vec6 {
        self.position + self.animation_offset * self.animation_progress
    }

    pub fn select_input_mode(&mut self, mode: InputMode) {
        if self.input_mode != mode {
            log::debug!("input mode {} -> {}", self.input_mode.label(), mode.label());
            self.input_mode = mode;
        }
    }

    /// Multiplies the user speed scale, keeping it within sane bounds.
    pub fn adjust_speed_scale(&mut self, factor: f64) {
        self.speed_scale = (self.speed_scale * factor).clamp(MIN_SPEED_SCALE, MAX_SPEED_SCALE);
        log::debug!("speed scale {}", self.speed_scale);
    }

    pub fn halve_speed(&mut self) {
        self.adjust_speed_scale(0.5);
    }

    pub fn double_speed(&mut self) {
        self.adjust_speed_scale(2.0);
    }

    pub fn handle_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::SelectMode(mode) => self.select_input_mode(mode),
            KeyCommand::HalveSpeed => self.halve_speed(),
            KeyCommand::DoubleSpeed => self.double_speed(),
        }
    }

    pub fn add_behavior(&mut self, behavior: Box<dyn CameraBehavior>) {
        self.behaviors.push(behavior);
    }

    pub fn active_behaviors(&self) -> usize {
        self.behaviors.len()
    }

    /// Animates from the current state to `target` over `duration` seconds.
    pub fn transition_to(&mut self, target: Preset, duration: f64, easing: Easing) {
        let start = Preset::from_camera(self);
        log::debug!("starting {duration}s transition ({easing:?})");
        self.add_behavior(Box::new(PresetTransition::new(start, target, duration, easing)));
    }

    pub fn clear_velocities(&mut self) {
        self.velocity = Vec6::ZERO;
        self.zoom_velocity = 0.0;
        self.rotation_velocity.amount = 0.0;
    }

    /// Rotates the orientation by every mapping in `mappings`.
    ///
    /// Each mapping turns by the full `amount`; the matching simplified angles
    /// receive `amount / mappings.len()` each, so a two-plane set advances its
    /// angle by `amount` in total. Local rotations use the orientation as it
    /// was before this batch, so mappings in one call do not compound.
    pub fn rotate_by_plane_mappings(&mut self, mappings: &[PlaneMapping], amount: f64, local: bool) {
        if amount == 0.0 || mappings.is_empty() {
            return;
        }

        let normalized_amount = amount / mappings.len() as f64;
        let old_matrix = self.orientation_matrix;
        for mapping in mappings {
            let rotation = if local {
                rotation_from_axes(
                    &(old_matrix * Vec6::from_index(mapping.axis1)),
                    &(old_matrix * Vec6::from_index(mapping.axis2)),
                    amount,
                )
            } else {
                rotation_from_axis_indices(mapping.axis1, mapping.axis2, amount)
            };
            self.orientation_matrix = rotation * self.orientation_matrix;

            if let Some(axis) = mapping.simplified_axis() {
                *self.simplified_rotation.angle_mut(axis) += normalized_amount;
            }
        }
    }

    fn resolve_movement_axis(&self, axis: Vec6) -> Vec6 {
        let axis = if self.move_on_local_axes {
            self.orientation_matrix * axis
        } else {
            axis
        };
        snap_to_cardinal_direction(axis, CARDINAL_SNAP_THRESHOLD)
    }

    /// Advances one frame using a host timestamp in milliseconds.
    pub fn update(&mut self, intent: &MovementIntent, current_time_ms: f64) {
        let delta_time = self.clock.delta_seconds(current_time_ms);
        self.step(intent, delta_time);
    }

    /// Advances one frame using the camera's own clock.
    pub fn update_now(&mut self, intent: &MovementIntent) {
        let now = self.clock.now_ms();
        self.update(intent, now);
    }

    /// Advances one frame by an explicit step in seconds.
    pub fn update_with_delta(&mut self, intent: &MovementIntent, delta_time: f64) {
        self.step(intent, delta_time.max(0.0));
    }

    fn step(&mut self, intent: &MovementIntent, delta_time: f64) {
        let options = self.input_mode.options();
        let move_direction = intent.move_direction;

        let horizontal_axis = self.resolve_movement_axis(options.horizontal_axis);
        let vertical_axis = self.resolve_movement_axis(options.vertical_axis);

        let target_velocity = (horizontal_axis * move_direction.x
            + vertical_axis * move_direction.y)
            * (options.move_speed * self.speed_scale);
        let target_zoom_velocity = intent.secondary_movement * options.zoom_speed * self.speed_scale;
        let target_rotation_amount =
            intent.secondary_movement * options.rotate_speed * self.speed_scale;

        // Accelerate towards the targets.
        let velocity_factor = exp_lerp_factor(options.velocity_lerp / self.spring_scale, delta_time);
        let rotation_factor =
            exp_lerp_factor(options.rotational_velocity_lerp / self.spring_scale, delta_time);
        self.velocity = self.velocity.lerp(&target_velocity, velocity_factor);
        self.zoom_velocity = lerp(self.zoom_velocity, target_zoom_velocity, velocity_factor);
        self.rotation_velocity = RotationVelocity {
            plane_mappings: options.rotation_plane_mappings,
            amount: lerp(self.rotation_velocity.amount, target_rotation_amount, rotation_factor),
        };

        // Integrate. Movement is divided by the zoom level so the on-screen
        // speed stays constant at any magnification.
        self.zoom += self.zoom_velocity * delta_time;
        self.zoom_level = self.zoom.exp2();
        self.position = self.position + self.velocity * (delta_time / self.zoom_level);

        let rotation = self.rotation_velocity;
        self.rotate_by_plane_mappings(
            rotation.plane_mappings,
            rotation.amount * delta_time,
            self.rotate_on_local_axes,
        );

        if self.velocity.length() < VELOCITY_DEADZONE && target_velocity.is_zero() {
            self.velocity = Vec6::ZERO;
        }
        if self.zoom_velocity.abs() < VELOCITY_DEADZONE && target_zoom_velocity == 0.0 {
            self.zoom_velocity = 0.0;
        }
        if self.rotation_velocity.amount.abs() < VELOCITY_DEADZONE && target_rotation_amount == 0.0
        {
            self.rotation_velocity.amount = 0.0;
        }

        self.run_behaviors(delta_time);

        if self.simplified_rotation_active {
            self.simplified_rotation.normalize();
            self.orientation_matrix = self.simplified_rotation.to_matrix();
        }

        self.refresh_derived();
    }

    fn run_behaviors(&mut self, delta_time: f64) {
        if self.behaviors.is_empty() {
            return;
        }
        let mut behaviors = std::mem::take(&mut self.behaviors);
        for behavior in behaviors.iter_mut() {
            behavior.update(self, delta_time);
        }
        behaviors.retain(|behavior| !behavior.should_remove());
        // Behaviours may have queued new ones while running.
        behaviors.append(&mut self.behaviors);
        self.behaviors = behaviors;
    }

    /// Recomputes the right/up vectors, the zoom level and the camera-local
    /// position from the current orientation.
    pub fn refresh_derived(&mut self) {
        self.zoom_level = self.zoom.exp2();
        self.right_vector =
            snap_to_cardinal_direction(self.orientation_matrix * RIGHT_VECTOR, CARDINAL_SNAP_THRESHOLD);
        self.up_vector =
            snap_to_cardinal_direction(self.orientation_matrix * UP_VECTOR, CARDINAL_SNAP_THRESHOLD);
        self.relative_position = self.orientation_matrix.multiply_transpose_vec(&self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane_mapping::{MANDELBROT_TO_EXPONENT, MANDELBROT_TO_JULIA};
    use cgmath::Vector2;
    use std::f64::consts::PI;

    fn moving_right() -> MovementIntent {
        MovementIntent::new(Vector2::new(1.0, 0.0), 0.0)
    }

    #[test]
    fn starts_at_the_mandelbrot_preset() {
        let camera = MandelbrotCamera::new();
        assert_eq!(camera.position, Vec6::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0));
        assert_eq!(camera.zoom, -2.2);
        assert_eq!(camera.orientation_matrix, Mat6::identity());
        assert!(camera.simplified_rotation_active);
        assert_eq!(camera.right_vector, Vec6::X);
        assert_eq!(camera.up_vector, Vec6::Y);
    }

    #[test]
    fn one_second_of_movement_matches_closed_form() {
        let mut camera = MandelbrotCamera::new();
        camera.update_with_delta(&moving_right(), 1.0);

        let expected_velocity = (1.0 - (-5.0f64).exp()) * 0.6;
        assert!((camera.velocity.x() - expected_velocity).abs() < 1e-9);
        for axis in 1..6 {
            assert_eq!(camera.velocity[axis], 0.0);
        }
        let expected_x = camera.velocity.x() * 1.0 / camera.zoom.exp2();
        assert!((camera.position.x() - expected_x).abs() < 1e-9);
        assert_eq!(camera.zoom, -2.2);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut camera = MandelbrotCamera::new();
        camera.update_with_delta(&moving_right(), 0.0);
        assert!(camera.velocity.is_zero());
        assert_eq!(camera.position, Vec6::new(0.0, 0.0, 0.0, 0.0, 2.0, 0.0));
        assert!(camera.position.x().is_finite());
    }

    #[test]
    fn first_timestamp_is_a_zero_step() {
        let mut camera = MandelbrotCamera::new();
        camera.update(&moving_right(), 5000.0);
        assert!(camera.velocity.is_zero());
        camera.update(&moving_right(), 5500.0);
        let expected = (1.0 - (-5.0f64 * 0.5).exp()) * 0.6;
        assert!((camera.velocity.x() - expected).abs() < 1e-12);
    }

    #[test]
    fn small_velocity_snaps_to_zero_without_input() {
        let mut camera = MandelbrotCamera::new();
        camera.velocity = Vec6::new(0.019, 0.0, 0.0, 0.0, 0.0, 0.0);
        camera.zoom_velocity = 0.019;
        camera.update_with_delta(&MovementIntent::NONE, 1.0 / 60.0);
        assert_eq!(camera.velocity, Vec6::ZERO);
        assert_eq!(camera.zoom_velocity, 0.0);
    }

    #[test]
    fn small_rotation_velocity_snaps_to_zero_without_input() {
        let mut camera = MandelbrotCamera::new();
        camera.select_input_mode(InputMode::JuliaWise);
        camera.rotation_velocity.amount = 0.019;
        camera.update_with_delta(&MovementIntent::NONE, 1.0 / 60.0);
        assert_eq!(camera.rotation_velocity.amount, 0.0);

        let mut turning = MandelbrotCamera::new();
        turning.select_input_mode(InputMode::JuliaWise);
        let intent = MovementIntent::new(Vector2::new(0.0, 0.0), 1.0);
        turning.update_with_delta(&intent, 1e-4);
        let amount = turning.rotation_velocity.amount;
        assert!(amount > 0.0 && amount < VELOCITY_DEADZONE);
    }

    #[test]
    fn deadzone_ignores_velocity_with_live_target() {
        let mut camera = MandelbrotCamera::new();
        camera.update_with_delta(&moving_right(), 1e-4);
        assert!(camera.velocity.length() < VELOCITY_DEADZONE);
        assert!(!camera.velocity.is_zero());
    }

    #[test]
    fn spring_scale_slows_acceleration() {
        let mut stiff = MandelbrotCamera::new();
        let mut springy = MandelbrotCamera::new();
        springy.spring_scale = 4.0;
        stiff.update_with_delta(&moving_right(), 0.1);
        springy.update_with_delta(&moving_right(), 0.1);
        assert!(springy.velocity.x() < stiff.velocity.x());
        let expected = (1.0 - (-5.0f64 / 4.0 * 0.1).exp()) * 0.6;
        assert!((springy.velocity.x() - expected).abs() < 1e-12);
    }

    #[test]
    fn jump_zooms_out_in_regular_mode() {
        let mut camera = MandelbrotCamera::new();
        let intent = MovementIntent::new(Vector2::new(0.0, 0.0), 1.0);
        camera.update_with_delta(&intent, 0.5);
        assert!(camera.zoom_velocity < 0.0);
        assert!(camera.zoom < -2.2);
        assert_eq!(camera.zoom_level, camera.zoom.exp2());
    }

    #[test]
    fn julia_wise_mapping_quarter_turn_maps_x_to_z() {
        let mut camera = MandelbrotCamera::new();
        camera.rotate_by_plane_mappings(&MANDELBROT_TO_JULIA, PI / 2.0, false);
        let image = camera.orientation_matrix * Vec6::X;
        assert!((image - Vec6::Z).length() < 1e-12);
        assert!((camera.simplified_rotation.julia_wise - PI / 2.0).abs() < 1e-15);
        let rebuilt = camera.simplified_rotation.to_matrix();
        assert!(rebuilt.max_abs_diff(&camera.orientation_matrix) < 1e-12);
    }

    #[test]
    fn local_single_mapping_matches_global_from_identity() {
        let mapping = [MANDELBROT_TO_EXPONENT[0]];
        let mut global = MandelbrotCamera::new();
        let mut local = MandelbrotCamera::new();
        global.rotate_by_plane_mappings(&mapping, 0.7, false);
        local.rotate_by_plane_mappings(&mapping, 0.7, true);
        assert!(global.orientation_matrix.max_abs_diff(&local.orientation_matrix) < 1e-12);
        assert_eq!(global.simplified_rotation, local.simplified_rotation);
    }

    #[test]
    fn local_rotation_follows_the_rotated_frame() {
        let mut camera = MandelbrotCamera::new();
        camera.rotate_by_plane_mappings(&MANDELBROT_TO_JULIA, PI / 2.0, false);
        let before = camera.orientation_matrix;
        camera.rotate_by_plane_mappings(&MANDELBROT_TO_EXPONENT, 0.4, true);
        // The local X axis (world Z) turns toward the local V axis (world V).
        let local_x = camera.orientation_matrix * Vec6::X;
        let expected = (before * Vec6::X) * 0.4f64.cos() + (before * Vec6::V) * 0.4f64.sin();
        assert!((local_x - expected).length() < 1e-12);
    }

    #[test]
    fn zero_amount_or_empty_set_is_a_no_op() {
        let mut camera = MandelbrotCamera::new();
        camera.rotate_by_plane_mappings(&MANDELBROT_TO_JULIA, 0.0, false);
        camera.rotate_by_plane_mappings(&[], 1.0, false);
        assert_eq!(camera.orientation_matrix, Mat6::identity());
        assert_eq!(camera.simplified_rotation, SimplifiedRotation::default());
    }

    #[test]
    fn secondary_input_rotates_in_julia_mode() {
        let mut camera = MandelbrotCamera::new();
        camera.select_input_mode(InputMode::JuliaWise);
        let intent = MovementIntent::new(Vector2::new(0.0, 0.0), 1.0);
        for _ in 0..60 {
            camera.update_with_delta(&intent, 1.0 / 60.0);
        }
        assert!(camera.simplified_rotation.julia_wise > 0.0);
        assert_eq!(camera.simplified_rotation.exponent_wise, 0.0);
        assert_eq!(camera.orientation_matrix, camera.simplified_rotation.to_matrix());
        assert_eq!(camera.zoom, -2.2);
    }

    #[test]
    fn local_movement_axes_follow_orientation() {
        let mut camera = MandelbrotCamera::new();
        camera.simplified_rotation = SimplifiedRotation::new(PI / 2.0, 0.0, 0.0);
        camera.update_with_delta(&MovementIntent::NONE, 0.0);
        assert_eq!(camera.right_vector, Vec6::Z);
        assert_eq!(camera.up_vector, Vec6::W);

        camera.update_with_delta(&moving_right(), 0.25);
        assert!(camera.velocity.z() > 0.0);
        assert_eq!(camera.velocity.x(), 0.0);

        let mut world = MandelbrotCamera::new();
        world.move_on_local_axes = false;
        world.simplified_rotation = SimplifiedRotation::new(PI / 2.0, 0.0, 0.0);
        world.update_with_delta(&moving_right(), 0.25);
        assert!(world.velocity.x() > 0.0);
        assert_eq!(world.velocity.z(), 0.0);
    }

    #[test]
    fn relative_position_is_position_in_camera_frame() {
        let mut camera = MandelbrotCamera::new();
        camera.simplified_rotation = SimplifiedRotation::new(0.3, -0.8, 1.1);
        camera.update_with_delta(&MovementIntent::NONE, 0.0);
        let back = camera.orientation_matrix * camera.relative_position;
        assert!((back - camera.position).length() < 1e-12);
    }

    #[test]
    fn raw_matrix_mode_keeps_accumulated_rotation() {
        let mut camera = MandelbrotCamera::new();
        camera.simplified_rotation_active = false;
        camera.select_input_mode(InputMode::ExponentWise);
        camera.rotate_on_local_axes = true;
        let intent = MovementIntent::new(Vector2::new(0.0, 0.0), 1.0);
        for _ in 0..30 {
            camera.update_with_delta(&intent, 1.0 / 30.0);
        }
        let m = camera.orientation_matrix;
        assert_ne!(m, Mat6::identity());
        assert!((m.transpose() * m).max_abs_diff(&Mat6::identity()) < 1e-9);
    }

    #[test]
    fn indicators_follow_policy_and_zoom() {
        let mut camera = MandelbrotCamera::new();
        assert_eq!(camera.z_indicator_effective_size(), 0.0);
        camera.select_input_mode(InputMode::JuliaWise);
        let expected = 0.0025 / camera.zoom_level;
        assert_eq!(camera.z_indicator_effective_size(), expected);
        assert_eq!(camera.e_indicator_effective_size(), 0.0);
        camera.e_indicator_setting = IndicatorSetting::Always;
        assert_eq!(camera.e_indicator_effective_size(), expected);
        camera.z_indicator_setting = IndicatorSetting::Never;
        assert_eq!(camera.z_indicator_effective_size(), 0.0);
    }

    #[test]
    fn iteration_budget_is_clamped() {
        let mut camera = MandelbrotCamera::new();
        camera.zoom = 10.0;
        assert_eq!(camera.max_iterations_computed(), 600);
        camera.zoom = -2.2;
        assert_eq!(camera.max_iterations_computed(), 100);
        camera.zoom = 1000.0;
        assert_eq!(camera.max_iterations_computed(), 5000);
    }

    #[test]
    fn speed_commands_are_clamped() {
        let mut camera = MandelbrotCamera::new();
        camera.handle_command(KeyCommand::DoubleSpeed);
        assert_eq!(camera.speed_scale, 2.0);
        for _ in 0..20 {
            camera.handle_command(KeyCommand::HalveSpeed);
        }
        assert_eq!(camera.speed_scale, MIN_SPEED_SCALE);
        camera.handle_command(KeyCommand::SelectMode(InputMode::ExponentWise));
        assert_eq!(camera.input_mode, InputMode::ExponentWise);
    }

    #[test]
    fn own_clock_starts_with_a_zero_step() {
        let mut camera = MandelbrotCamera::new();
        camera.update_now(&moving_right());
        assert!(camera.velocity.is_zero());
        assert_eq!(camera.position, presets::mandelbrot().position);

        std::thread::sleep(std::time::Duration::from_millis(5));
        camera.update_now(&moving_right());
        assert!(camera.velocity.x() > 0.0);
    }

    #[test]
    fn clock_ignores_backwards_time() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta_seconds(100.0), 0.0);
        assert_eq!(clock.delta_seconds(350.0), 0.25);
        assert_eq!(clock.delta_seconds(300.0), 0.0);
        clock.reset();
        assert_eq!(clock.delta_seconds(1000.0), 0.0);
    }
}
