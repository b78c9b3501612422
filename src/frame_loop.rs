use bevy::prelude::*;

use crate::rendering::{FirefliesMaterial, PortalMaterial, SceneMaterials, advance_time};
use crate::scene::FireflyField;

/// Lifecycle of the per-frame update.
///
/// The engine schedules one tick per frame; a stopped loop skips the
/// per-frame systems and asks the app to exit.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FrameLoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl FrameLoopState {
    /// Returns true on the Idle -> Running transition
    pub fn start(&mut self) -> bool {
        if *self == FrameLoopState::Idle {
            *self = FrameLoopState::Running;
            true
        } else {
            false
        }
    }

    pub fn stop(&mut self) {
        *self = FrameLoopState::Stopped;
    }

    pub fn is_active(&self) -> bool {
        *self != FrameLoopState::Stopped
    }
}

/// Run condition for every per-frame system
pub fn frame_loop_active(state: Res<FrameLoopState>) -> bool {
    state.is_active()
}

/// Uniform step of the frame loop.
///
/// Runs before the camera step and before extraction, so every frame is drawn
/// with one consistent time value across both shaders.
pub fn tick_uniforms(
    time: Res<Time<Real>>,
    mut state: ResMut<FrameLoopState>,
    scene_materials: Res<SceneMaterials>,
    field: Res<FireflyField>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut firefly_materials: ResMut<Assets<FirefliesMaterial>>,
) {
    if state.start() {
        info!("Frame loop running");
    }

    let (Some(portal), Some(fireflies)) = (
        portal_materials.get_mut(&scene_materials.portal),
        firefly_materials.get_mut(&field.material),
    ) else {
        return;
    };
    advance_time(&mut portal.uniforms, &mut fireflies.uniforms, time.elapsed_secs());
}

pub fn handle_stop_request(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<FrameLoopState>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        state.stop();
        info!("Frame loop stopped");
    }
}

pub fn exit_when_stopped(state: Res<FrameLoopState>, mut exit: EventWriter<AppExit>) {
    if *state == FrameLoopState::Stopped {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::rendering::{FireflyUniforms, PortalUniforms};

    #[test]
    fn test_state_transitions() {
        let mut state = FrameLoopState::default();
        assert_eq!(state, FrameLoopState::Idle);
        assert!(state.is_active());

        assert!(state.start());
        assert_eq!(state, FrameLoopState::Running);
        assert!(!state.start());

        state.stop();
        assert!(!state.is_active());
        assert!(!state.start());
        assert_eq!(state, FrameLoopState::Stopped);
    }

    #[test]
    fn test_ticks_keep_both_times_in_step() {
        let mut world = World::new();

        let mut portal_materials = Assets::<PortalMaterial>::default();
        let portal = portal_materials.add(PortalMaterial {
            uniforms: PortalUniforms::new(Color::BLACK, Color::WHITE),
        });
        let mut firefly_materials = Assets::<FirefliesMaterial>::default();
        let fireflies = firefly_materials.add(FirefliesMaterial {
            uniforms: FireflyUniforms::new(1.0, 100.0),
        });

        world.insert_resource(SceneMaterials {
            baked: Handle::default(),
            pole_light: Handle::default(),
            portal: portal.clone(),
        });
        world.insert_resource(FireflyField {
            particles: Vec::new(),
            material: fireflies.clone(),
        });
        world.insert_resource(portal_materials);
        world.insert_resource(firefly_materials);
        world.init_resource::<FrameLoopState>();

        let start = Instant::now();
        let mut time = Time::<Real>::new(start);
        time.update_with_instant(start);
        world.insert_resource(time);

        for elapsed in [0.25_f32, 0.5, 1.25, 2.0] {
            world
                .resource_mut::<Time<Real>>()
                .update_with_instant(start + Duration::from_secs_f32(elapsed));
            world.run_system_once(tick_uniforms).expect("tick failed");

            let portal_time = world
                .resource::<Assets<PortalMaterial>>()
                .get(&portal)
                .map(|m| m.uniforms.time);
            let firefly_time = world
                .resource::<Assets<FirefliesMaterial>>()
                .get(&fireflies)
                .map(|m| m.uniforms.time);
            assert_eq!(portal_time, Some(elapsed));
            assert_eq!(firefly_time, Some(elapsed));
        }

        assert_eq!(*world.resource::<FrameLoopState>(), FrameLoopState::Running);
    }
}
