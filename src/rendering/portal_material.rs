use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::{AsBindGroup, ShaderRef};

use super::uniforms::PortalUniforms;

/// Animated swirl drawn on the portal opening
#[derive(AsBindGroup, Debug, Clone, Asset, TypePath)]
pub struct PortalMaterial {
    #[uniform(0)]
    pub uniforms: PortalUniforms,
}

impl Material for PortalMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/portal.wgsl".into()
    }
}

/// Plugin for the portal surface material
pub struct PortalMaterialPlugin;

impl Plugin for PortalMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PortalMaterial>::default());
    }
}
