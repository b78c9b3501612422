use bevy::asset::RenderAssetUsages;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::view::NoFrustumCulling;
use rand::Rng;

use crate::rendering::{
    ATTRIBUTE_FIREFLY_CORNER, ATTRIBUTE_FIREFLY_SCALE, FireflyUniforms, FirefliesMaterial,
};
use crate::settings::PortalSettings;
use crate::viewport::ViewportSize;

/// Half-width of the spawn volume along X
pub const FIELD_HALF_X: f32 = 1.45;
/// Height of the spawn volume, measured up from the ground
pub const FIELD_HEIGHT: f32 = 1.5;
/// Half-depth of the spawn volume along Z
pub const FIELD_HALF_Z: f32 = 1.7;

/// One ambient glow particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firefly {
    pub position: Vec3,
    pub scale: f32,
}

/// The particle set and its material, fixed for the whole session
#[derive(Resource, Debug, Clone)]
pub struct FireflyField {
    pub particles: Vec<Firefly>,
    pub material: Handle<FirefliesMaterial>,
}

/// Sample `count` fireflies uniformly inside the spawn volume.
///
/// Every call draws fresh values from the thread RNG.
pub fn generate_fireflies(count: usize) -> Vec<Firefly> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Firefly {
            position: Vec3::new(
                rng.gen_range(-FIELD_HALF_X..FIELD_HALF_X),
                rng.gen_range(0.0..FIELD_HEIGHT),
                rng.gen_range(-FIELD_HALF_Z..FIELD_HALF_Z),
            ),
            scale: rng.gen_range(0.0..1.0),
        })
        .collect()
}

const QUAD_CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

/// Build one screen-facing quad per firefly.
///
/// All four vertices of a quad sit at the particle centre; the vertex shader
/// pushes them apart along the corner attribute.
pub fn fireflies_mesh(fireflies: &[Firefly]) -> Mesh {
    let mut positions = Vec::with_capacity(fireflies.len() * 4);
    let mut scales = Vec::with_capacity(fireflies.len() * 4);
    let mut corners = Vec::with_capacity(fireflies.len() * 4);
    let mut indices = Vec::with_capacity(fireflies.len() * 6);

    for (i, firefly) in fireflies.iter().enumerate() {
        let base = (i * 4) as u32;
        for corner in QUAD_CORNERS {
            positions.push(firefly.position.to_array());
            scales.push(firefly.scale);
            corners.push(corner);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(ATTRIBUTE_FIREFLY_SCALE, scales)
        .with_inserted_attribute(ATTRIBUTE_FIREFLY_CORNER, corners)
        .with_inserted_indices(Indices::U32(indices))
}

pub fn spawn_fireflies(
    mut commands: Commands,
    settings: Res<PortalSettings>,
    viewport: Res<ViewportSize>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FirefliesMaterial>>,
) {
    let particles = generate_fireflies(settings.firefly_count);
    let material = materials.add(FirefliesMaterial {
        uniforms: FireflyUniforms::new(viewport.pixel_density, settings.firefly_size),
    });

    commands.spawn((
        Name::new("fireflies"),
        Mesh3d(meshes.add(fireflies_mesh(&particles))),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        NotShadowCaster,
        NoFrustumCulling,
    ));

    let field = FireflyField {
        particles,
        material,
    };
    info!("Spawned {} fireflies", field.particles.len());
    commands.insert_resource(field);
}
