use bevy::prelude::*;
use bevy::render::render_resource::ShaderType;

/// Uniforms read by the portal surface shader
#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct PortalUniforms {
    pub time: f32,
    pub color_start: LinearRgba,
    pub color_end: LinearRgba,
}

impl PortalUniforms {
    pub fn new(color_start: impl Into<LinearRgba>, color_end: impl Into<LinearRgba>) -> Self {
        Self {
            time: 0.0,
            color_start: color_start.into(),
            color_end: color_end.into(),
        }
    }
}

/// Uniforms read by the firefly point shader
#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct FireflyUniforms {
    pub time: f32,
    pub pixel_ratio: f32,
    /// Point size in pixels before per-particle scale and perspective
    pub size: f32,
}

impl FireflyUniforms {
    pub fn new(pixel_ratio: f32, size: f32) -> Self {
        Self {
            time: 0.0,
            pixel_ratio,
            size,
        }
    }
}

/// Push the session's elapsed time into every animated uniform block.
///
/// This is the only automatic per-frame write; colours and sizes only change
/// through the debug panel.
pub fn advance_time(portal: &mut PortalUniforms, fireflies: &mut FireflyUniforms, elapsed: f32) {
    portal.time = elapsed;
    fireflies.time = elapsed;
}
