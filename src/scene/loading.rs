use bevy::asset::UntypedAssetLoadFailedEvent;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use super::material_assignment::on_scene_ready;
use crate::settings::PortalSettings;

/// Marker for the root of the loaded portal model
#[derive(Component)]
pub struct PortalModel;

/// Start loading the model; materials are assigned once its instance is ready
pub fn spawn_portal_scene(
    mut commands: Commands,
    settings: Res<PortalSettings>,
    asset_server: Res<AssetServer>,
) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(settings.model_path));
    commands
        .spawn((SceneRoot(scene), PortalModel, Name::new("portal_model")))
        .observe(on_scene_ready);
    info!("Loading portal model from {}", settings.model_path);
}

/// Failed loads leave the scene incomplete; the log is the only diagnostic
pub fn report_load_failures(mut failures: EventReader<UntypedAssetLoadFailedEvent>) {
    for failure in failures.read() {
        warn!("Failed to load asset {}: {}", failure.path, failure.error);
    }
}
