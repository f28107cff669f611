use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::path::MANIFEST_PATH;
use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::loading::camera_loader::spawn_camera_scene;
use crate::engine::loading::error::LoadError;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_loader::spawn_sub_scene;
use crate::engine::loading::session::SceneSession;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SceneManifest>>,
    /// Session generation the sub-scene loads were dispatched for.
    dispatched: Option<u32>,
    failure_reported: bool,
}

impl ManifestLoader {
    /// Dispatch the loads again for the next session; the manifest itself stays loaded.
    pub fn restart(&mut self) {
        self.dispatched = None;
        self.failure_reported = false;
    }
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading scene manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Once the manifest resolves, spawn every sub-scene and the camera description
/// under the current session generation.
pub fn dispatch_scene_loads(
    mut manifest_loader: ResMut<ManifestLoader>,
    session: Res<SceneSession>,
    manifests: Res<Assets<SceneManifest>>,
    asset_server: Res<AssetServer>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
) {
    if manifest_loader.dispatched == Some(session.generation()) {
        return;
    }
    let Some(handle) = manifest_loader.handle.clone() else {
        return;
    };

    let Some(manifest) = manifests.get(&handle) else {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
            if !manifest_loader.failure_reported {
                let error = LoadError::Manifest {
                    path: MANIFEST_PATH.to_string(),
                    reason: err.to_string(),
                };
                error!("{}", error);
                loading_progress.record_failure(&error);
                manifest_loader.failure_reported = true;
            }
        }
        return;
    };

    info!(
        "✓ Manifest loaded: {} sub-scenes, cameras from {}",
        manifest.scenes.len(),
        manifest.cameras_url
    );
    for config in &manifest.scenes {
        spawn_sub_scene(&mut commands, &asset_server, config, session.generation());
    }
    spawn_camera_scene(
        &mut commands,
        &asset_server,
        &manifest.cameras_url,
        session.generation(),
    );

    loading_progress.begin(manifest.scenes.len());
    manifest_loader.dispatched = Some(session.generation());
}
