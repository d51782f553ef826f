use cgmath::Vector2;
use hexabrot::plane_mapping::MANDELBROT_TO_JULIA;
use hexabrot::{
    presets, Easing, FrameUniforms, InputMode, KeyFlags, Mat6, MandelbrotCamera, MovementIntent,
    Preset, SimplifiedRotation, Vec6,
};

fn assert_close(actual: f64, expected: f64, eps: f64, what: &str) {
    assert!(
        (actual - expected).abs() < eps,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn one_second_push_along_x() {
    let mut camera = MandelbrotCamera::new();
    let intent = MovementIntent::new(Vector2::new(1.0, 0.0), 0.0);
    camera.update_with_delta(&intent, 1.0);

    let velocity = (1.0 - (-5.0f64).exp()) * 0.6;
    assert_close(camera.velocity.x(), velocity, 1e-9, "velocity.x");
    assert_close(
        camera.position.x(),
        velocity / (-2.2f64).exp2(),
        1e-9,
        "position.x",
    );
    assert_eq!(camera.position.v(), 2.0);
}

#[test]
fn host_timestamps_drive_the_same_motion_as_explicit_deltas() {
    let intent = MovementIntent::from_keys(&KeyFlags {
        right: true,
        ..KeyFlags::default()
    });

    let mut timed = MandelbrotCamera::new();
    let mut stepped = MandelbrotCamera::new();
    timed.update(&intent, 1000.0);
    for frame in 1..=30 {
        timed.update(&intent, 1000.0 + frame as f64 * 20.0);
        stepped.update_with_delta(&intent, 0.02);
    }
    assert!((timed.position - stepped.position).length() < 1e-12);
}

#[test]
fn coasting_camera_comes_to_rest() {
    let mut camera = MandelbrotCamera::new();
    let push = MovementIntent::new(Vector2::new(0.0, 1.0), 1.0);
    for _ in 0..60 {
        camera.update_with_delta(&push, 1.0 / 60.0);
    }
    assert!(!camera.velocity.is_zero());
    assert!(camera.rotation_velocity.amount != 0.0);

    for _ in 0..240 {
        camera.update_with_delta(&MovementIntent::NONE, 1.0 / 60.0);
    }
    assert_eq!(camera.velocity, Vec6::ZERO);
    assert_eq!(camera.zoom_velocity, 0.0);
    assert_eq!(camera.rotation_velocity.amount, 0.0);

    let resting = camera.position;
    camera.update_with_delta(&MovementIntent::NONE, 1.0 / 60.0);
    assert_eq!(camera.position, resting);
}

#[test]
fn julia_rotation_quarter_turn() {
    let mut camera = MandelbrotCamera::new();
    camera.rotate_by_plane_mappings(&MANDELBROT_TO_JULIA, std::f64::consts::FRAC_PI_2, false);
    camera.update_with_delta(&MovementIntent::NONE, 0.0);
    assert_eq!(camera.right_vector, Vec6::Z);
    assert_eq!(camera.up_vector, Vec6::W);
}

#[test]
fn flying_in_julia_mode_then_saving_and_restoring() {
    let mut camera = MandelbrotCamera::new();
    camera.select_input_mode(InputMode::JuliaWise);
    let intent = MovementIntent::new(Vector2::new(1.0, 1.0), 1.0);
    for _ in 0..90 {
        camera.update_with_delta(&intent, 1.0 / 60.0);
    }
    assert!(camera.position.z() > 0.0 && camera.position.w() > 0.0);
    assert!(camera.simplified_rotation.julia_wise > 0.0);

    let json = Preset::from_camera(&camera).to_json_string().unwrap();
    let restored = Preset::from_json_str(&json).unwrap();

    let mut other = MandelbrotCamera::new();
    restored.apply(&mut other);
    assert!(restored.is_applied(&other));
    assert_eq!(other.orientation_matrix, camera.orientation_matrix);
    assert_eq!(other.relative_position, camera.relative_position);
}

#[test]
fn transition_lands_exactly_on_target() {
    let mut camera = MandelbrotCamera::new();
    let target = Preset::new(
        Vec6::new(-0.75, 0.1, 0.0, 0.0, 2.0, 0.0),
        4.0,
        hexabrot::Orientation::Simplified(SimplifiedRotation::new(0.5, 0.25, 0.0)),
    );
    camera.transition_to(target.clone(), 0.5, Easing::EaseInOutCubic);
    for _ in 0..40 {
        camera.update_with_delta(&MovementIntent::NONE, 1.0 / 60.0);
    }
    assert!(target.is_applied(&camera));
    assert_eq!(camera.active_behaviors(), 0);
}

#[test]
fn tim_burton_uniforms() {
    let camera = MandelbrotCamera::from_preset(&presets::tim_burton());
    assert!(!camera.simplified_rotation_active);
    let m = camera.orientation_matrix;
    assert!((m.transpose() * m).max_abs_diff(&Mat6::identity()) < 1e-9);

    let uniforms = FrameUniforms::from_camera(&camera);
    assert_eq!(uniforms.as_bytes().len(), 128);
    let right = m * Vec6::X;
    for axis in 0..6 {
        assert_close(uniforms.right_vector[axis] as f64, right[axis], 1e-6, "right");
    }
}
