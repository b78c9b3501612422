use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::settings::PortalSettings;
use crate::ui::DebugPanel;
use crate::viewport::ViewportSize;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_RADIUS: f32 = 0.5;
const MAX_RADIUS: f32 = 50.0;
/// Pixel-unit scroll events are roughly this many pixels per wheel notch
const PIXELS_PER_LINE: f32 = 100.0;

/// Damped orbit around a focal point.
///
/// Input accumulates into pending deltas; every frame a `damping` fraction of
/// what is pending is applied and the rest carries over, so motion eases out
/// after the mouse stops.
#[derive(Component, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, zero looking down -Z from +Z
    pub yaw: f32,
    /// Elevation above the XZ plane
    pub pitch: f32,
    pub damping: f32,
    pub zoom_speed: f32,
    /// Vertical field of view, used to keep pans under the cursor
    pub fov: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    pending_pan: Vec3,
}

impl OrbitControls {
    pub fn looking_from(eye: Vec3, target: Vec3, damping: f32) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(MIN_RADIUS);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            damping: damping.clamp(0.0, 1.0),
            zoom_speed: 0.1,
            fov: FRAC_PI_4,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            pending_pan: Vec3::ZERO,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Queue a rotation from a pointer drag; a drag across the full viewport
    /// height is one full turn
    pub fn rotate(&mut self, drag_px: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.pending_yaw -= TAU * drag_px.x / viewport_height;
        self.pending_pitch += TAU * drag_px.y / viewport_height;
    }

    /// Queue a zoom; positive values move towards the target
    pub fn zoom(&mut self, wheel_lines: f32) {
        self.pending_zoom -= wheel_lines * self.zoom_speed;
    }

    /// Queue a pan of the target in the camera's right/up plane.
    ///
    /// Scaled so a point at the target's depth follows the pointer.
    pub fn pan(&mut self, drag_px: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let units_per_px = 2.0 * self.radius * (self.fov * 0.5).tan() / viewport_height;
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.pending_pan += (up * drag_px.y - right * drag_px.x) * units_per_px;
    }

    /// Advance the damping by one frame
    pub fn step(&mut self) {
        let keep = 1.0 - self.damping;

        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.radius = (self.radius * (self.pending_zoom * self.damping).exp())
            .clamp(MIN_RADIUS, MAX_RADIUS);
        self.target += self.pending_pan * self.damping;

        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_zoom *= keep;
        self.pending_pan *= keep;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands, settings: Res<PortalSettings>) {
    let fov = settings.camera_fov_degrees.to_radians();
    let controls =
        OrbitControls::looking_from(settings.camera_start, Vec3::ZERO, settings.orbit_damping)
            .with_fov(fov);

    commands.spawn((
        Name::new("camera"),
        Camera3d::default(),
        // Baked lighting and the clear colour are shown as authored
        Tonemapping::None,
        Projection::from(PerspectiveProjection {
            fov,
            near: settings.camera_near,
            far: settings.camera_far,
            ..default()
        }),
        controls.transform(),
        controls,
    ));
}

/// Camera step of the frame loop: feed pointer input in, then ease.
///
/// Left drag rotates, right drag pans, the wheel zooms.
pub fn update_orbit_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    viewport: Res<ViewportSize>,
    panel: Option<Res<DebugPanel>>,
    mut cameras: Query<(&mut OrbitControls, &mut Transform)>,
) {
    let pointer_free = !panel.is_some_and(|panel| panel.pointer_captured);
    let wheel_lines = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };

    for (mut controls, mut transform) in &mut cameras {
        if pointer_free && mouse_buttons.pressed(MouseButton::Left) {
            controls.rotate(mouse_motion.delta, viewport.height);
        }
        if pointer_free && mouse_buttons.pressed(MouseButton::Right) {
            controls.pan(mouse_motion.delta, viewport.height);
        }
        if pointer_free && wheel_lines != 0.0 {
            controls.zoom(wheel_lines);
        }
        controls.step();
        *transform = controls.transform();
    }
}
