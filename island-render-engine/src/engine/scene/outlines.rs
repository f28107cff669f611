use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use bevy::render::render_resource::Face;
use constants::navigation::CameraZone;
use constants::roles::{ISLAND_OUTLINES_SCENE, ObjectRole};

use crate::config::render_settings::OUTLINE_EXPANSION;
use crate::engine::scene::registry::{SceneEntry, SceneRegistry, SubSceneContribution};

/// Island silhouette roles and the zone each outlines.
const OUTLINE_SOURCES: [(ObjectRole, CameraZone); 3] = [
    (ObjectRole::IslandWorkshop, CameraZone::Workshop),
    (ObjectRole::IslandTree, CameraZone::Tree),
    (ObjectRole::IslandContact, CameraZone::Contact),
];

/// Group of outline meshes for one zone. Hidden unless pre-selected.
#[derive(Component, Debug)]
pub struct OutlineGroup(pub CameraZone);

/// Camera-grid hover: `Some(index)` on hover start, `None` on hover end.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreselectZone(pub Option<usize>);

/// Push every vertex `amount` along its normal.
pub fn expand_along_normals(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    amount: f32,
) -> Vec<[f32; 3]> {
    positions
        .iter()
        .zip(normals)
        .map(|(position, normal)| {
            (Vec3::from_array(*position) + Vec3::from_array(*normal) * amount).to_array()
        })
        .collect()
}

fn outline_mesh(source: &Mesh) -> Option<Mesh> {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        source.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let Some(VertexAttributeValues::Float32x3(normals)) = source.attribute(Mesh::ATTRIBUTE_NORMAL)
    else {
        return None;
    };
    let expanded = expand_along_normals(positions, normals, OUTLINE_EXPANSION);
    let mut mesh = source.clone();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, expanded);
    Some(mesh)
}

fn outline_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::LinearRgba(LinearRgba::new(5.0, 5.0, 5.0, 0.7)),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: Some(Face::Front),
        ..default()
    }
}

/// Build one hidden outline group per zone once the island hover meshes are tracked.
pub fn build_outline_groups(
    mut registry: ResMut<SceneRegistry>,
    mesh_handles: Query<(&Mesh3d, &GlobalTransform)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if registry.scene(ISLAND_OUTLINES_SCENE).is_some()
        || registry.objects(ObjectRole::IslandWorkshop).is_empty()
    {
        return;
    }

    let material = materials.add(outline_material());
    let root = commands
        .spawn((
            Name::new(ISLAND_OUTLINES_SCENE),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut groups = Vec::new();
    for (role, zone) in OUTLINE_SOURCES {
        let group = commands
            .spawn((
                Name::new(format!("outline-{:?}", zone).to_lowercase()),
                OutlineGroup(zone),
                Transform::default(),
                Visibility::Hidden,
                ChildOf(root),
            ))
            .id();

        for object in registry.objects(role) {
            for &mesh_entity in &object.meshes {
                let Ok((mesh3d, global)) = mesh_handles.get(mesh_entity) else {
                    continue;
                };
                let Some(outline) = meshes.get(&mesh3d.0).and_then(outline_mesh) else {
                    debug!("Outline skipped for {}: mesh missing normals", object.name);
                    continue;
                };
                commands.spawn((
                    Mesh3d(meshes.add(outline)),
                    MeshMaterial3d(material.clone()),
                    global.compute_transform(),
                    ChildOf(group),
                ));
            }
        }
        groups.push((zone, group));
    }

    for (zone, group) in groups {
        registry.set_outline_group(zone, group);
    }
    registry.publish(SubSceneContribution {
        entry: SceneEntry {
            name: ISLAND_OUTLINES_SCENE.to_string(),
            root,
        },
        objects: Vec::new(),
    });
    info!("Built island outline groups");
}

/// Show the outline of the pre-selected zone and hide the others.
pub fn apply_preselection(
    mut events: EventReader<PreselectZone>,
    registry: Res<SceneRegistry>,
    mut visibility: Query<&mut Visibility, With<OutlineGroup>>,
) {
    let Some(PreselectZone(index)) = events.read().last().copied() else {
        return;
    };
    for (zone, group) in registry.outline_groups() {
        let Ok(mut group_visibility) = visibility.get_mut(group) else {
            continue;
        };
        *group_visibility = if Some(zone.index()) == index {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
