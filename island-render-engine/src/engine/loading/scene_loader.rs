use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::image::{ImageLoaderSettings, ImageSampler};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::roles::{
    BUILDINGS_CONTAINER, MaterialTreatment, ObjectRole, classify, hidden_by_default,
};

use crate::config::path::named_texture_path;
use crate::engine::assets::scene_manifest::{SceneConfig, TextureWrap};
use crate::engine::loading::error::LoadError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::session::SceneSession;
use crate::engine::scene::hierarchy::depth_first;
use crate::engine::scene::registry::{
    SceneEntry, SceneRegistry, SubSceneContribution, TrackedObject,
};
use crate::interaction::effects::OriginalMaterial;

/// Sub-scene root whose glTF is still loading.
#[derive(Component, Debug, Clone)]
pub struct PendingSubScene {
    pub config: SceneConfig,
    pub generation: u32,
}

pub fn spawn_sub_scene(
    commands: &mut Commands,
    asset_server: &AssetServer,
    config: &SceneConfig,
    generation: u32,
) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.scene_url.clone()));
    commands.spawn((
        Name::new(config.name.clone()),
        SceneRoot(scene),
        config.transform(),
        Visibility::default(),
        PendingSubScene {
            config: config.clone(),
            generation,
        },
    ));
}

/// A node of a spawned scene instance, flattened in depth-first pre-order.
#[derive(Debug, Clone, Copy)]
pub struct SceneNode<'a> {
    pub entity: Entity,
    pub name: Option<&'a str>,
    pub depth: usize,
    pub is_mesh: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedNode {
    pub role: ObjectRole,
    pub material: MaterialTreatment,
    pub object: TrackedObject,
}

/// Classify the nodes of one sub-scene by container and exact name.
///
/// A classified node owns every mesh in its subtree; the subtree is not
/// classified again. Every mesh of `buildings.glb` is tracked as a building.
pub fn classify_nodes(scene_url: &str, nodes: &[SceneNode<'_>]) -> Vec<ClassifiedNode> {
    let buildings = scene_url.ends_with(BUILDINGS_CONTAINER);
    let mut classified = Vec::new();
    let mut i = 0;
    while i < nodes.len() {
        let node = nodes[i];
        let subtree_end = nodes[i + 1..]
            .iter()
            .position(|next| next.depth <= node.depth)
            .map_or(nodes.len(), |offset| i + 1 + offset);

        let rule = node
            .name
            .and_then(|name| classify(scene_url, name))
            .map(|rule| (rule.role, rule.material))
            .or_else(|| {
                (buildings && node.is_mesh).then_some((ObjectRole::Buildings, MaterialTreatment::Shared))
            });

        let Some((role, material)) = rule else {
            i += 1;
            continue;
        };
        classified.push(ClassifiedNode {
            role,
            material,
            object: TrackedObject {
                entity: node.entity,
                name: node.name.unwrap_or_default().to_string(),
                meshes: nodes[i..subtree_end]
                    .iter()
                    .filter(|member| member.is_mesh)
                    .map(|member| member.entity)
                    .collect(),
            },
        });
        i = subtree_end;
    }
    classified
}

/// Entities to hide when `scene` is published, and whether its root starts hidden.
pub fn hidden_nodes(scene: &str, nodes: &[SceneNode<'_>]) -> (bool, Vec<Entity>) {
    let Some(rule) = hidden_by_default(scene) else {
        return (false, Vec::new());
    };
    let hidden = nodes
        .iter()
        .filter(|node| node.name.is_some_and(|name| rule.names.matches(name)))
        .map(|node| node.entity)
        .collect();
    (rule.hide_root, hidden)
}

fn load_texture(asset_server: &AssetServer, path: String, wrap: TextureWrap) -> Handle<Image> {
    asset_server.load_with_settings(path, move |settings: &mut ImageLoaderSettings| {
        settings.is_srgb = true;
        settings.sampler = ImageSampler::Descriptor(wrap.sampler());
    })
}

fn textured_material(texture: Handle<Image>, transparent: bool) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: if transparent {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

fn invisible_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::NONE,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

/// Flatten the scene instance under `root`, tracking depth for subtree ranges.
fn flatten<'a>(
    root: Entity,
    children: &Query<&Children>,
    parents: &Query<&ChildOf>,
    names: &'a Query<&Name>,
    meshes: &Query<(), With<Mesh3d>>,
) -> Vec<SceneNode<'a>> {
    let mut depths = HashMap::from([(root, 0usize)]);
    depth_first(root, children)
        .into_iter()
        .map(|entity| {
            let depth = parents
                .get(entity)
                .ok()
                .and_then(|child_of| depths.get(&child_of.parent()).copied())
                .map_or(1, |parent_depth| parent_depth + 1);
            depths.insert(entity, depth);
            SceneNode {
                entity,
                name: names.get(entity).ok().map(Name::as_str),
                depth,
                is_mesh: meshes.contains(entity),
            }
        })
        .collect()
}

pub fn on_sub_scene_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands.run_system_cached_with(publish_sub_scene, trigger.target());
}

/// Classify a ready sub-scene, apply its materials and visibility, and publish it
/// to the registry in one step. Stale sessions are dropped.
#[allow(clippy::too_many_arguments)]
pub fn publish_sub_scene(
    In(root): In<Entity>,
    pending: Query<&PendingSubScene>,
    session: Res<SceneSession>,
    hierarchy: (Query<&Children>, Query<&ChildOf>),
    names: Query<&Name>,
    meshes: Query<(), With<Mesh3d>>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut registry: ResMut<SceneRegistry>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    let Ok(pending) = pending.get(root) else {
        return;
    };
    let config = &pending.config;
    if !session.accepts(pending.generation) {
        debug!("Discarding stale sub-scene {}", config.name);
        commands.entity(root).despawn();
        return;
    }

    let (children, parents) = &hierarchy;
    let nodes = flatten(root, children, parents, &names, &meshes);

    // Sub-scene wide texture replaces every mesh material first.
    let current_material = |entity: Entity| mesh_materials.get(entity).ok().map(|m| m.0.clone());
    let mut assigned: HashMap<Entity, Handle<StandardMaterial>> = HashMap::new();
    if let Some(texture_url) = &config.texture_url {
        let texture = load_texture(&asset_server, texture_url.clone(), config.texture_wrap);
        let shared = materials.add(textured_material(texture, false));
        for node in nodes.iter().filter(|node| node.is_mesh) {
            assigned.insert(node.entity, shared.clone());
        }
    }

    let classified = classify_nodes(&config.scene_url, &nodes);
    for node in &classified {
        let treatment = match node.material {
            MaterialTreatment::Shared => None,
            MaterialTreatment::NamedTexture { transparent } => {
                let texture = load_texture(
                    &asset_server,
                    named_texture_path(&node.object.name),
                    TextureWrap::Clamp,
                );
                Some(materials.add(textured_material(texture, transparent)))
            }
            MaterialTreatment::Invisible => Some(materials.add(invisible_material())),
        };
        if let Some(material) = treatment {
            for mesh in &node.object.meshes {
                assigned.insert(*mesh, material.clone());
            }
        }
    }

    for (mesh, material) in &assigned {
        commands.entity(*mesh).insert(MeshMaterial3d(material.clone()));
    }
    for node in classified.iter().filter(|node| node.role.snapshots_material()) {
        for mesh in &node.object.meshes {
            let snapshot = assigned.get(mesh).cloned().or_else(|| current_material(*mesh));
            if let Some(snapshot) = snapshot {
                commands.entity(*mesh).insert(OriginalMaterial(snapshot));
            }
        }
    }

    let (hide_root, hidden) = hidden_nodes(&config.name, &nodes);
    if hide_root {
        commands.entity(root).insert(Visibility::Hidden);
    }
    for entity in hidden {
        commands.entity(entity).insert(Visibility::Hidden);
    }

    let object_count = classified.len();
    let published = registry.publish(SubSceneContribution {
        entry: SceneEntry {
            name: config.name.clone(),
            root,
        },
        objects: classified
            .into_iter()
            .map(|node| (node.role, node.object))
            .collect(),
    });
    if !published {
        warn!("Sub-scene name {} already loaded; discarding duplicate", config.name);
        commands.entity(root).despawn();
        return;
    }

    commands.entity(root).remove::<PendingSubScene>();
    loading_progress.record_loaded(&config.name);
    info!("✓ Sub-scene {} ready ({} tracked objects)", config.name, object_count);
}

/// Record sub-scenes whose glTF failed; their role lists stay empty.
pub fn detect_failed_sub_scenes(
    pending: Query<(Entity, &PendingSubScene, &SceneRoot)>,
    asset_server: Res<AssetServer>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
) {
    for (entity, pending, scene_root) in &pending {
        let Some(LoadState::Failed(err)) = asset_server.get_load_state(scene_root.0.id()) else {
            continue;
        };
        let error = LoadError::SubScene {
            name: pending.config.name.clone(),
            url: pending.config.scene_url.clone(),
            reason: err.to_string(),
        };
        error!("{}", error);
        loading_progress.record_failure(&error);
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nature_config() -> SceneConfig {
        SceneConfig {
            name: "nature-scene".into(),
            scene_url: "static/nature.glb".into(),
            texture_url: None,
            texture_wrap: TextureWrap::default(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }

    fn loader_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<StandardMaterial>()
            .init_resource::<SceneSession>()
            .init_resource::<SceneRegistry>()
            .init_resource::<LoadingProgress>();
        app
    }

    struct SpawnedNature {
        root: Entity,
        leaves1_node: Entity,
        leaves1_mesh: Entity,
        leaves2: Entity,
        trunk_mesh: Entity,
        material: Handle<StandardMaterial>,
    }

    /// root → leaves1 → leaves1 (mesh), root → leaves2 (mesh), root → Trunk (mesh).
    fn spawn_nature_instance(app: &mut App, generation: u32) -> SpawnedNature {
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::from(Color::srgb(0.1, 0.5, 0.1)));
        let world = app.world_mut();
        let root = world
            .spawn(PendingSubScene {
                config: nature_config(),
                generation,
            })
            .id();
        let mesh = |name: &str, parent: Entity| {
            (
                Name::new(name.to_string()),
                Mesh3d::default(),
                MeshMaterial3d(material.clone()),
                ChildOf(parent),
            )
        };
        let leaves1_node = world.spawn((Name::new("leaves1"), ChildOf(root))).id();
        let leaves1_mesh = world.spawn(mesh("leaves1", leaves1_node)).id();
        let leaves2 = world.spawn(mesh("leaves2", root)).id();
        let trunk_mesh = world.spawn(mesh("Trunk", root)).id();
        SpawnedNature {
            root,
            leaves1_node,
            leaves1_mesh,
            leaves2,
            trunk_mesh,
            material,
        }
    }

    #[test]
    fn stale_sub_scene_is_despawned_unpublished() {
        let mut app = loader_app();
        let spawned = spawn_nature_instance(&mut app, 0);
        app.world_mut().resource_mut::<SceneSession>().restart();
        let revision = app.world().resource::<SceneRegistry>().revision();

        app.world_mut()
            .run_system_cached_with(publish_sub_scene, spawned.root)
            .unwrap();

        let world = app.world();
        let registry = world.resource::<SceneRegistry>();
        assert!(registry.scenes().is_empty());
        assert!(registry.objects(ObjectRole::Leaves).is_empty());
        assert_eq!(registry.revision(), revision);
        assert!(world.get_entity(spawned.root).is_err());
        assert!(world.resource::<LoadingProgress>().loaded_scenes().is_empty());
    }

    #[test]
    fn ready_sub_scene_publishes_in_one_revision() {
        let mut app = loader_app();
        let generation = app.world().resource::<SceneSession>().generation();
        let spawned = spawn_nature_instance(&mut app, generation);
        let revision = app.world().resource::<SceneRegistry>().revision();

        app.world_mut()
            .run_system_cached_with(publish_sub_scene, spawned.root)
            .unwrap();

        let world = app.world();
        let registry = world.resource::<SceneRegistry>();
        assert_eq!(registry.revision(), revision + 1);
        assert_eq!(registry.scene("nature-scene").map(|scene| scene.root), Some(spawned.root));

        let leaves = registry.objects(ObjectRole::Leaves);
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].entity, spawned.leaves1_node);
        assert_eq!(leaves[0].meshes, vec![spawned.leaves1_mesh]);
        assert_eq!(leaves[1].meshes, vec![spawned.leaves2]);

        for mesh in [spawned.leaves1_mesh, spawned.leaves2] {
            assert_eq!(
                world.get::<OriginalMaterial>(mesh).map(|original| &original.0),
                Some(&spawned.material)
            );
        }
        assert!(world.get::<OriginalMaterial>(spawned.trunk_mesh).is_none());
        assert!(world.get::<PendingSubScene>(spawned.root).is_none());
        assert_eq!(
            world.resource::<LoadingProgress>().loaded_scenes(),
            ["nature-scene".to_string()]
        );
    }

    fn node(id: u32, name: Option<&str>, depth: usize, is_mesh: bool) -> SceneNode<'_> {
        SceneNode {
            entity: Entity::from_raw(id),
            name,
            depth,
            is_mesh,
        }
    }

    #[test]
    fn classified_node_owns_its_primitives() {
        // leaves1 (node) → leaves1 (primitive with the same name), then Trunk → mesh.
        let nodes = [
            node(1, Some("leaves1"), 1, false),
            node(2, Some("leaves1"), 2, true),
            node(3, Some("Trunk"), 1, false),
            node(4, Some("Trunk.mesh"), 2, true),
            node(5, Some("leaves2"), 1, true),
        ];
        let classified = classify_nodes("static/nature.glb", &nodes);

        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].role, ObjectRole::Leaves);
        assert_eq!(classified[0].object.entity, Entity::from_raw(1));
        assert_eq!(classified[0].object.meshes, vec![Entity::from_raw(2)]);
        assert_eq!(classified[1].object.name, "leaves2");
        assert_eq!(classified[1].object.meshes, vec![Entity::from_raw(5)]);
    }

    #[test]
    fn names_only_match_in_their_container() {
        let nodes = [node(1, Some("leaves1"), 1, true)];
        assert!(classify_nodes("static/green.glb", &nodes).is_empty());
    }

    #[test]
    fn every_building_mesh_is_tracked() {
        let nodes = [
            node(1, Some("House"), 1, false),
            node(2, Some("House.0"), 2, true),
            node(3, Some("House.1"), 2, true),
        ];
        let classified = classify_nodes("static/buildings.glb", &nodes);
        assert_eq!(classified.len(), 2);
        assert!(classified.iter().all(|node| node.role == ObjectRole::Buildings));
    }

    #[test]
    fn tree_panels_get_invisible_material() {
        let nodes = [node(1, Some("TreeContent3"), 1, true)];
        let classified = classify_nodes("static/treeContents.glb", &nodes);
        assert_eq!(classified[0].material, MaterialTreatment::Invisible);
    }

    #[test]
    fn hidden_by_default_for_tree_contents() {
        let nodes = [
            node(1, Some("TreeContent1"), 1, true),
            node(2, Some("Frame"), 1, true),
            node(3, Some("TreeHoverContent"), 1, true),
        ];
        let (hide_root, hidden) = hidden_nodes("treeContents-scene", &nodes);
        assert!(hide_root);
        assert_eq!(hidden, vec![Entity::from_raw(1), Entity::from_raw(3)]);

        let (hide_root, hidden) = hidden_nodes("islands-scene", &nodes);
        assert!(!hide_root);
        assert!(hidden.is_empty());
    }
}
