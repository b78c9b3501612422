use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::rendering::{
    FirefliesMaterial, FireflyUniforms, PortalMaterial, PortalUniforms, SceneMaterials,
};
use crate::scene::FireflyField;
use crate::settings::{
    FIREFLY_SIZE_MAX, FIREFLY_SIZE_MIN, FIREFLY_SIZE_STEP, PortalSettings, snap_firefly_size,
};

/// Controls exposed by the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelControl {
    PortalColorStart,
    PortalColorEnd,
    FireflySize,
    ClearColor,
}

impl PanelControl {
    pub fn label(&self) -> &'static str {
        match self {
            PanelControl::PortalColorStart => "portalColorStart",
            PanelControl::PortalColorEnd => "portalColorEnd",
            PanelControl::FireflySize => "fireflySize",
            PanelControl::ClearColor => "clearColor",
        }
    }
}

/// A new value committed from a panel control
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PanelChange {
    PortalColorStart(Srgba),
    PortalColorEnd(Srgba),
    FireflySize(f32),
    ClearColor(Srgba),
}

/// Everything a panel change is allowed to write
pub struct PanelTargets<'a> {
    pub portal: &'a mut PortalUniforms,
    pub fireflies: &'a mut FireflyUniforms,
    pub clear_color: &'a mut ClearColor,
    pub settings: &'a mut PortalSettings,
}

/// Apply one committed control value; each change touches a single field
/// plus its mirror in the settings
pub fn apply_panel_change(change: PanelChange, targets: PanelTargets) {
    match change {
        PanelChange::PortalColorStart(color) => {
            targets.settings.portal_color_start = color;
            targets.portal.color_start = color.into();
        }
        PanelChange::PortalColorEnd(color) => {
            targets.settings.portal_color_end = color;
            targets.portal.color_end = color.into();
        }
        PanelChange::FireflySize(size) => {
            let size = snap_firefly_size(size);
            targets.settings.firefly_size = size;
            targets.fireflies.size = size;
        }
        PanelChange::ClearColor(color) => {
            targets.settings.clear_color = color;
            targets.clear_color.0 = color.into();
        }
    }
}

/// 8-bit sRGB channels, the form the colour pickers edit
pub fn srgb_bytes(color: Srgba) -> [u8; 3] {
    [color.red, color.green, color.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Widget-side copy of the tunables for one frame of the panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelValues {
    pub portal_color_start: [u8; 3],
    pub portal_color_end: [u8; 3],
    pub firefly_size: f32,
    pub clear_color: [u8; 3],
}

impl PanelValues {
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self {
            portal_color_start: srgb_bytes(settings.portal_color_start),
            portal_color_end: srgb_bytes(settings.portal_color_end),
            firefly_size: settings.firefly_size,
            clear_color: srgb_bytes(settings.clear_color),
        }
    }

    /// One change per control whose value differs from `before`
    pub fn changes_since(&self, before: &PanelValues) -> Vec<PanelChange> {
        let color = |[r, g, b]: [u8; 3]| Srgba::rgb_u8(r, g, b);
        let mut changes = Vec::new();
        if self.portal_color_start != before.portal_color_start {
            changes.push(PanelChange::PortalColorStart(color(self.portal_color_start)));
        }
        if self.portal_color_end != before.portal_color_end {
            changes.push(PanelChange::PortalColorEnd(color(self.portal_color_end)));
        }
        if self.firefly_size != before.firefly_size {
            changes.push(PanelChange::FireflySize(self.firefly_size));
        }
        if self.clear_color != before.clear_color {
            changes.push(PanelChange::ClearColor(color(self.clear_color)));
        }
        changes
    }
}

#[derive(Resource, Debug, Clone)]
pub struct DebugPanel {
    pub visible: bool,
    /// Set while the pointer is over the panel so the orbit camera ignores it
    pub pointer_captured: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            visible: true,
            pointer_captured: false,
        }
    }
}

fn color_row(ui: &mut egui::Ui, control: PanelControl, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(control.label());
        ui.color_edit_button_srgb(rgb);
    });
}

/// Draws the panel and turns edited widget values into `PanelChange`s
pub fn debug_panel_ui(
    mut contexts: EguiContexts,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<DebugPanel>,
    settings: Res<PortalSettings>,
    mut changes: EventWriter<PanelChange>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    if keyboard_input.just_pressed(KeyCode::KeyH) && !ctx.wants_keyboard_input() {
        panel.visible = !panel.visible;
    }

    let before = PanelValues::from_settings(&settings);
    let mut values = before;
    if panel.visible {
        egui::Window::new("Debug")
            .default_width(300.0)
            .show(ctx, |ui| {
                color_row(ui, PanelControl::PortalColorStart, &mut values.portal_color_start);
                color_row(ui, PanelControl::PortalColorEnd, &mut values.portal_color_end);
                ui.add(
                    egui::Slider::new(
                        &mut values.firefly_size,
                        FIREFLY_SIZE_MIN..=FIREFLY_SIZE_MAX,
                    )
                    .step_by(FIREFLY_SIZE_STEP as f64)
                    .text(PanelControl::FireflySize.label()),
                );
                color_row(ui, PanelControl::ClearColor, &mut values.clear_color);
                ui.label("H hide  Esc quit");
            });
    }

    let captured = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    if panel.pointer_captured != captured {
        panel.pointer_captured = captured;
    }

    for change in values.changes_since(&before) {
        changes.write(change);
    }
}

pub fn apply_panel_changes(
    mut changes: EventReader<PanelChange>,
    scene_materials: Res<SceneMaterials>,
    field: Res<FireflyField>,
    mut portal_materials: ResMut<Assets<PortalMaterial>>,
    mut firefly_materials: ResMut<Assets<FirefliesMaterial>>,
    mut clear_color: ResMut<ClearColor>,
    mut settings: ResMut<PortalSettings>,
) {
    for change in changes.read() {
        let (Some(portal), Some(fireflies)) = (
            portal_materials.get_mut(&scene_materials.portal),
            firefly_materials.get_mut(&field.material),
        ) else {
            warn!("Panel change {:?} dropped, materials not ready", change);
            continue;
        };
        debug!("Panel change {:?}", change);
        apply_panel_change(
            *change,
            PanelTargets {
                portal: &mut portal.uniforms,
                fireflies: &mut fireflies.uniforms,
                clear_color: &mut *clear_color,
                settings: &mut *settings,
            },
        );
    }
}
