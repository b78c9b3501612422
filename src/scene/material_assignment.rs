use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::rendering::{PortalMaterial, SceneMaterials};

/// Which shared material a model node is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Baked,
    PoleLight,
    Portal,
}

impl MaterialKind {
    /// Exact name match; anything unrecognised falls through to the baked material
    pub fn for_node_name(name: &str) -> Self {
        match name {
            "poleLightA" | "poleLightB" => MaterialKind::PoleLight,
            "portalLight" => MaterialKind::Portal,
            _ => MaterialKind::Baked,
        }
    }
}

/// Number of mesh entities given each material by one pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentReport {
    pub baked: usize,
    pub pole_light: usize,
    pub portal: usize,
}

impl AssignmentReport {
    fn record(&mut self, kind: MaterialKind) {
        match kind {
            MaterialKind::Baked => self.baked += 1,
            MaterialKind::PoleLight => self.pole_light += 1,
            MaterialKind::Portal => self.portal += 1,
        }
    }
}

/// Resolve the material kind of a mesh entity.
///
/// glTF primitives are spawned as children of the named node, so a mesh
/// whose own name is not special inherits the decision from its parent.
fn kind_of(world: &World, entity: Entity) -> MaterialKind {
    let own = world
        .get::<Name>(entity)
        .map(|name| MaterialKind::for_node_name(name.as_str()))
        .unwrap_or(MaterialKind::Baked);
    if own != MaterialKind::Baked {
        return own;
    }

    world
        .get::<ChildOf>(entity)
        .and_then(|child_of| world.get::<Name>(child_of.parent()))
        .map(|name| MaterialKind::for_node_name(name.as_str()))
        .unwrap_or(MaterialKind::Baked)
}

/// Walk the hierarchy under `root` once and give every mesh its shared material.
///
/// Duplicate or missing special names are not errors; each match simply
/// receives the same shared handle.
pub fn assign_materials(
    world: &mut World,
    root: Entity,
    materials: &SceneMaterials,
) -> AssignmentReport {
    let mut report = AssignmentReport::default();
    let mut pending = vec![root];

    while let Some(entity) = pending.pop() {
        if let Some(children) = world.get::<Children>(entity) {
            pending.extend(children.iter());
        }

        if !world.entity(entity).contains::<Mesh3d>() {
            continue;
        }

        let kind = kind_of(world, entity);
        let mut node = world.entity_mut(entity);
        node.remove::<(
            MeshMaterial3d<StandardMaterial>,
            MeshMaterial3d<PortalMaterial>,
        )>();
        match kind {
            MaterialKind::Baked => {
                node.insert(MeshMaterial3d(materials.baked.clone()));
            }
            MaterialKind::PoleLight => {
                node.insert(MeshMaterial3d(materials.pole_light.clone()));
            }
            MaterialKind::Portal => {
                node.insert(MeshMaterial3d(materials.portal.clone()));
            }
        }
        report.record(kind);
    }

    report
}

/// Runs the assignment pass once the glTF scene instance has been spawned
pub fn on_scene_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    materials: Res<SceneMaterials>,
) {
    let root = trigger.target();
    let materials = materials.clone();
    commands.queue(move |world: &mut World| {
        let report = assign_materials(world, root, &materials);
        info!(
            "Assigned scene materials: {} baked, {} pole light, {} portal",
            report.baked, report.pole_light, report.portal
        );
    });
}
