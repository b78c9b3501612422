use bevy::prelude::*;

/// Live-tweakable scene parameters and startup defaults.
///
/// The debug panel writes into this resource alongside the material
/// uniforms so the panel always shows the last applied value.
#[derive(Resource, Debug, Clone)]
pub struct PortalSettings {
    pub portal_color_start: Srgba,
    pub portal_color_end: Srgba,
    pub clear_color: Srgba,
    pub firefly_size: f32,
    pub firefly_count: usize,
    /// Upper bound for the device pixel ratio used by the renderer
    pub max_pixel_ratio: f32,

    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_start: Vec3,
    pub orbit_damping: f32,

    pub model_path: &'static str,
    pub baked_texture_path: &'static str,
}

pub const FIREFLY_SIZE_MIN: f32 = 1.0;
pub const FIREFLY_SIZE_MAX: f32 = 100.0;
pub const FIREFLY_SIZE_STEP: f32 = 1.0;

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            portal_color_start: Srgba::rgb_u8(0x00, 0x00, 0x00),
            portal_color_end: Srgba::rgb_u8(0xff, 0xff, 0xff),
            clear_color: Srgba::rgb_u8(0x52, 0x48, 0x0f),
            firefly_size: FIREFLY_SIZE_MAX,
            firefly_count: 30,
            max_pixel_ratio: 2.0,
            camera_fov_degrees: 45.0,
            camera_near: 0.1,
            camera_far: 100.0,
            camera_start: Vec3::new(4.0, 2.0, 4.0),
            orbit_damping: 0.05,
            model_path: "portal.glb",
            baked_texture_path: "baked.jpg",
        }
    }
}

impl PortalSettings {
    /// Clamp a host-reported device pixel ratio to the configured maximum
    pub fn pixel_density(&self, device_ratio: f32) -> f32 {
        device_ratio.min(self.max_pixel_ratio)
    }
}

/// Snap a requested firefly size onto the slider's range and step
pub fn snap_firefly_size(size: f32) -> f32 {
    let stepped = (size / FIREFLY_SIZE_STEP).round() * FIREFLY_SIZE_STEP;
    stepped.clamp(FIREFLY_SIZE_MIN, FIREFLY_SIZE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_panel_initial_values() {
        let settings = PortalSettings::default();
        assert_eq!(settings.portal_color_start, Srgba::hex("#000000").unwrap());
        assert_eq!(settings.portal_color_end, Srgba::hex("#ffffff").unwrap());
        assert_eq!(settings.clear_color, Srgba::hex("#52480f").unwrap());
        assert_eq!(settings.firefly_size, 100.0);
        assert_eq!(settings.firefly_count, 30);
    }

    #[test]
    fn test_pixel_density_is_clamped() {
        let settings = PortalSettings::default();
        assert_eq!(settings.pixel_density(3.0), 2.0);
        assert_eq!(settings.pixel_density(1.5), 1.5);
        assert_eq!(settings.pixel_density(2.0), 2.0);
    }

    #[test]
    fn test_snap_firefly_size() {
        assert_eq!(snap_firefly_size(0.2), 1.0);
        assert_eq!(snap_firefly_size(42.4), 42.0);
        assert_eq!(snap_firefly_size(250.0), 100.0);
    }
}
