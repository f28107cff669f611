use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::loading::error::LoadError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::session::SceneSession;
use crate::engine::scene::camera_registry::{CameraEntry, CameraRegistry};
use crate::engine::scene::hierarchy::{depth_first, world_transform};

/// Camera description glTF still loading. Its instance is read once and despawned.
#[derive(Component, Debug, Clone)]
pub struct PendingCameraScene {
    pub url: String,
    pub generation: u32,
}

pub fn spawn_camera_scene(
    commands: &mut Commands,
    asset_server: &AssetServer,
    url: &str,
    generation: u32,
) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(url.to_string()));
    commands.spawn((
        Name::new("camera-description"),
        SceneRoot(scene),
        Transform::default(),
        Visibility::Hidden,
        PendingCameraScene {
            url: url.to_string(),
            generation,
        },
    ));
}

pub fn on_camera_scene_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands.run_system_cached_with(read_camera_scene, trigger.target());
}

/// Read every camera node in document order into the camera registry.
#[allow(clippy::too_many_arguments)]
pub fn read_camera_scene(
    In(root): In<Entity>,
    pending: Query<&PendingCameraScene>,
    session: Res<SceneSession>,
    children: Query<&Children>,
    parents: Query<&ChildOf>,
    transforms: Query<&Transform>,
    camera_nodes: Query<(&Projection, Option<&Name>)>,
    mut cameras: ResMut<CameraRegistry>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
) {
    let Ok(pending) = pending.get(root) else {
        return;
    };
    // The description is only data; its glTF cameras must never render.
    commands.entity(root).despawn();
    if !session.accepts(pending.generation) {
        debug!("Discarding stale camera description {}", pending.url);
        return;
    }

    let entries: Vec<CameraEntry> = depth_first(root, &children)
        .into_iter()
        .filter_map(|node| {
            let (projection, name) = camera_nodes.get(node).ok()?;
            Some((node, projection.clone(), name.map(|name| name.as_str().to_string())))
        })
        .enumerate()
        .map(|(index, (node, projection, name))| CameraEntry {
            name: name.unwrap_or_else(|| format!("Camera {}", index + 1)),
            projection,
            rest: world_transform(node, root, &parents, &transforms),
        })
        .collect();

    if entries.is_empty() {
        let error = LoadError::NoCameras {
            url: pending.url.clone(),
        };
        error!("{}", error);
        loading_progress.record_failure(&error);
        return;
    }

    info!("✓ {} cameras loaded from {}", entries.len(), pending.url);
    loading_progress.record_cameras(entries.len());
    cameras.set_cameras(entries);
}

pub fn detect_failed_camera_scene(
    pending: Query<(Entity, &PendingCameraScene, &SceneRoot)>,
    asset_server: Res<AssetServer>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
) {
    for (entity, pending, scene_root) in &pending {
        let Some(LoadState::Failed(err)) = asset_server.get_load_state(scene_root.0.id()) else {
            continue;
        };
        let error = LoadError::Cameras {
            url: pending.url.clone(),
            reason: err.to_string(),
        };
        error!("{}", error);
        loading_progress.record_failure(&error);
        commands.entity(entity).despawn();
    }
}
