use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::camera::OrbitControls;
use crate::rendering::FirefliesMaterial;
use crate::scene::FireflyField;
use crate::settings::PortalSettings;

/// Last known drawing surface size, in logical pixels
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio after clamping
    pub pixel_density: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            pixel_density: 1.0,
        }
    }
}

impl ViewportSize {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Record a new surface size and return the clamped pixel density
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_ratio: f32,
        settings: &PortalSettings,
    ) -> f32 {
        self.width = width;
        self.height = height;
        self.pixel_density = settings.pixel_density(device_ratio);
        self.pixel_density
    }
}

/// Reapply the aspect ratio to a perspective projection
pub fn update_projection_aspect(projection: &mut Projection, aspect_ratio: f32) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = aspect_ratio;
    }
}

pub fn init_viewport(
    mut commands: Commands,
    settings: Res<PortalSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mut viewport = ViewportSize::default();
    if let Ok(window) = windows.single() {
        viewport.resize(
            window.width(),
            window.height(),
            window.resolution.base_scale_factor(),
            &settings,
        );
    }
    commands.insert_resource(viewport);
}

/// Keep camera, stored size and firefly pixel ratio in step with the window
pub fn handle_window_resized(
    mut resized: EventReader<WindowResized>,
    settings: Res<PortalSettings>,
    windows: Query<&Window>,
    mut viewport: ResMut<ViewportSize>,
    mut projections: Query<&mut Projection, With<OrbitControls>>,
    field: Option<Res<FireflyField>>,
    mut firefly_materials: ResMut<Assets<FirefliesMaterial>>,
) {
    // Only the final size of a burst matters
    let Some(event) = resized.read().last() else {
        return;
    };

    let device_ratio = windows
        .get(event.window)
        .map(|window| window.resolution.base_scale_factor())
        .unwrap_or(viewport.pixel_density);
    let density = viewport.resize(event.width, event.height, device_ratio, &settings);

    for mut projection in &mut projections {
        update_projection_aspect(&mut projection, viewport.aspect_ratio());
    }

    if let Some(field) = field
        && let Some(material) = firefly_materials.get_mut(&field.material)
    {
        material.uniforms.pixel_ratio = density;
    }

    info!(
        "Viewport resized to {}x{} at pixel density {}",
        viewport.width, viewport.height, density
    );
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;
    use bevy::window::WindowResolution;

    use super::*;
    use crate::rendering::FireflyUniforms;

    #[test]
    fn test_resize_updates_aspect_and_clamps_density() {
        let settings = PortalSettings::default();
        let mut viewport = ViewportSize {
            width: 800.0,
            height: 600.0,
            pixel_density: 1.0,
        };
        let mut projection = Projection::Perspective(PerspectiveProjection {
            aspect_ratio: 800.0 / 600.0,
            ..default()
        });

        let density = viewport.resize(1600.0, 900.0, 3.0, &settings);
        update_projection_aspect(&mut projection, viewport.aspect_ratio());

        assert_eq!(density, 2.0);
        assert_eq!(viewport.pixel_density, 2.0);
        assert_eq!((viewport.width, viewport.height), (1600.0, 900.0));
        let Projection::Perspective(perspective) = projection else {
            panic!("projection changed kind");
        };
        assert_eq!(perspective.aspect_ratio, 1600.0 / 900.0);
    }

    #[test]
    fn test_low_density_passes_through() {
        let settings = PortalSettings::default();
        let mut viewport = ViewportSize::default();
        assert_eq!(viewport.resize(640.0, 480.0, 1.25, &settings), 1.25);
    }

    #[test]
    fn test_zero_height_does_not_divide() {
        let viewport = ViewportSize {
            width: 640.0,
            height: 0.0,
            pixel_density: 1.0,
        };
        assert_eq!(viewport.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_window_resize_updates_firefly_pixel_ratio() {
        let mut world = World::new();
        let settings = PortalSettings::default();

        let mut firefly_materials = Assets::<FirefliesMaterial>::default();
        let material = firefly_materials.add(FirefliesMaterial {
            uniforms: FireflyUniforms::new(1.0, settings.firefly_size),
        });
        world.insert_resource(FireflyField {
            particles: Vec::new(),
            material: material.clone(),
        });
        world.insert_resource(firefly_materials);
        world.insert_resource(settings);
        world.insert_resource(ViewportSize {
            width: 800.0,
            height: 600.0,
            pixel_density: 1.0,
        });
        world.init_resource::<Events<WindowResized>>();

        let mut resolution = WindowResolution::new(1600.0, 900.0);
        resolution.set_scale_factor(3.0);
        let window = world
            .spawn(Window {
                resolution,
                ..default()
            })
            .id();
        let camera = world
            .spawn((
                Projection::Perspective(PerspectiveProjection {
                    aspect_ratio: 800.0 / 600.0,
                    ..default()
                }),
                OrbitControls::looking_from(Vec3::new(4.0, 2.0, 4.0), Vec3::ZERO, 0.05),
            ))
            .id();

        world.send_event(WindowResized {
            window,
            width: 1600.0,
            height: 900.0,
        });
        world
            .run_system_once(handle_window_resized)
            .expect("resize failed");

        let uniforms = world
            .resource::<Assets<FirefliesMaterial>>()
            .get(&material)
            .map(|m| m.uniforms)
            .expect("firefly material missing");
        assert_eq!(uniforms.pixel_ratio, 2.0);
        assert_eq!(uniforms.size, PortalSettings::default().firefly_size);

        let viewport = *world.resource::<ViewportSize>();
        assert_eq!((viewport.width, viewport.height), (1600.0, 900.0));
        assert_eq!(viewport.pixel_density, 2.0);

        let Some(Projection::Perspective(perspective)) = world.get::<Projection>(camera) else {
            panic!("camera projection missing");
        };
        assert_eq!(perspective.aspect_ratio, 1600.0 / 900.0);
    }
}
