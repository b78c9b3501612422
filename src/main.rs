use bevy::prelude::*;
use bevy_egui::EguiPlugin;

mod camera;
mod frame_loop;
mod rendering;
mod scene;
mod settings;
mod ui;
mod viewport;

use camera::*;
use frame_loop::*;
use rendering::*;
use scene::*;
use settings::*;
use ui::*;
use viewport::*;

fn main() {
    let settings = PortalSettings::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Portal".into(),
                // Only used on the web build
                canvas: Some("canvas.webgl".into()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_plugins((PortalMaterialPlugin, FirefliesMaterialPlugin))
        .insert_resource(ClearColor(settings.clear_color.into()))
        .insert_resource(settings)
        .init_resource::<FrameLoopState>()
        .init_resource::<DebugPanel>()
        .add_event::<PanelChange>()
        .add_systems(PreStartup, init_viewport)
        .add_systems(
            Startup,
            (
                (setup_scene_materials, spawn_portal_scene).chain(),
                spawn_fireflies,
                spawn_camera,
            ),
        )
        .add_systems(
            Update,
            (
                (handle_stop_request, exit_when_stopped).chain(),
                report_load_failures,
                handle_window_resized,
            ),
        )
        .add_systems(
            Update,
            (
                debug_panel_ui,
                apply_panel_changes,
                tick_uniforms,
                update_orbit_controls,
            )
                .chain()
                .after(handle_window_resized)
                .run_if(frame_loop_active),
        )
        .run();
}
