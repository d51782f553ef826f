use bytemuck::{Pod, Zeroable};

use crate::camera::MandelbrotCamera;

/// Per-frame values handed to the fractal shader.
///
/// Layout matches a std140/std430 block of scalars and float arrays; every
/// field is 4-byte aligned so there is no implicit padding.
#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub position: [f32; 6],
    pub up_vector: [f32; 6],
    pub right_vector: [f32; 6],
    pub relative_position: [f32; 6],
    pub z_indicator_size: f32,
    pub e_indicator_size: f32,
    pub zoom_level: f32,
    pub bailout_radius_squared: f32,
    pub max_iterations: u32,
    pub smoothing_enabled: u32,
    pub smoothing_radius: f32,
    _padding: u32,
}

impl FrameUniforms {
    pub fn from_camera(camera: &MandelbrotCamera) -> Self {
        Self {
            position: camera.render_position().to_f32_array(),
            up_vector: camera.up_vector.to_f32_array(),
            right_vector: camera.right_vector.to_f32_array(),
            relative_position: camera.relative_position.to_f32_array(),
            z_indicator_size: camera.z_indicator_effective_size() as f32,
            e_indicator_size: camera.e_indicator_effective_size() as f32,
            zoom_level: camera.zoom_level as f32,
            bailout_radius_squared: camera.bailout_radius_squared() as f32,
            max_iterations: camera.max_iterations_computed(),
            smoothing_enabled: camera.smoothing_enabled as u32,
            smoothing_radius: camera.smoothing_radius as f32,
            _padding: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Flat float view for hosts that upload through a `Float32Array`. The
    /// integer fields are reinterpreted bit for bit.
    pub fn as_f32_slice(&self) -> &[f32] {
        bytemuck::cast_slice(self.as_bytes())
    }
}
