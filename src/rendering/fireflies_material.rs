use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef};
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError, VertexFormat,
};

use super::uniforms::FireflyUniforms;

/// Per-particle scale factor in [0, 1)
pub const ATTRIBUTE_FIREFLY_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_FireflyScale", 902_381_114, VertexFormat::Float32);

/// Quad corner offset in [-0.5, 0.5]^2, expanded to screen space by the vertex shader
pub const ATTRIBUTE_FIREFLY_CORNER: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_FireflyCorner", 902_381_115, VertexFormat::Float32x2);

/// Additive glow sprites for the ambient firefly field
#[derive(AsBindGroup, Debug, Clone, Asset, TypePath)]
pub struct FirefliesMaterial {
    #[uniform(0)]
    pub uniforms: FireflyUniforms,
}

impl Material for FirefliesMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/fireflies.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/fireflies.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_FIREFLY_SCALE.at_shader_location(1),
            ATTRIBUTE_FIREFLY_CORNER.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Quads are built facing the camera, winding is irrelevant
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

/// Plugin for the firefly material
pub struct FirefliesMaterialPlugin;

impl Plugin for FirefliesMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<FirefliesMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });
    }
}
