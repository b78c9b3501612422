use bevy::prelude::*;

use super::portal_material::PortalMaterial;
use super::uniforms::PortalUniforms;
use crate::settings::PortalSettings;

/// The three shared materials every model node is assigned one of.
///
/// Each handle is created once at startup; nodes hold clones of the same
/// handle so a uniform change on the portal reaches every node using it.
#[derive(Resource, Debug, Clone)]
pub struct SceneMaterials {
    pub baked: Handle<StandardMaterial>,
    pub pole_light: Handle<StandardMaterial>,
    pub portal: Handle<PortalMaterial>,
}

pub fn setup_scene_materials(
    mut commands: Commands,
    settings: Res<PortalSettings>,
    asset_server: Res<AssetServer>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
) {
    let baked_texture: Handle<Image> = asset_server.load(settings.baked_texture_path);

    // Lighting is already in the texture
    let baked = standard_materials.add(StandardMaterial {
        base_color_texture: Some(baked_texture),
        unlit: true,
        ..default()
    });

    let pole_light = standard_materials.add(StandardMaterial {
        base_color: settings.portal_color_end.into(),
        unlit: true,
        ..default()
    });

    let portal = portal_materials.add(PortalMaterial {
        uniforms: PortalUniforms::new(settings.portal_color_start, settings.portal_color_end),
    });

    commands.insert_resource(SceneMaterials {
        baked,
        pole_light,
        portal,
    });
}
