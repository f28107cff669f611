//! Asynchronous loading of the island scene.
//!
//! The manifest lists the sub-scenes; each is spawned as a glTF scene root tagged
//! with the session generation, classified when its instance is ready and
//! published to the scene registry in one step. The camera description is read
//! into the camera registry the same way.

/// Camera description glTF → camera registry.
pub mod camera_loader;

/// Typed loader failures.
pub mod error;

/// Scene manifest loading and dispatch of the sub-scene loads.
pub mod manifest_loader;

/// Loading progress tracking resource for the `Loading` → `Running` transition.
pub mod progress;

/// Sub-scene spawning, classification, material treatment and publication.
pub mod scene_loader;

/// Session generation token, reveal flags and session reset.
pub mod session;

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, FrameSet, transition_to_running};
use camera_loader::{detect_failed_camera_scene, on_camera_scene_ready};
use manifest_loader::{ManifestLoader, dispatch_scene_loads, start_loading};
use progress::LoadingProgress;
use scene_loader::{detect_failed_sub_scenes, on_sub_scene_ready};
use session::{ResetSessionRequest, SceneSession, reset_session_on_request};

pub struct SceneLoadingPlugin;

impl Plugin for SceneLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingProgress>()
            .init_resource::<ManifestLoader>()
            .init_resource::<SceneSession>()
            .add_event::<ResetSessionRequest>()
            .add_observer(on_sub_scene_ready)
            .add_observer(on_camera_scene_ready)
            .add_systems(Startup, start_loading)
            .add_systems(
                Update,
                (
                    reset_session_on_request,
                    dispatch_scene_loads,
                    detect_failed_sub_scenes,
                    detect_failed_camera_scene,
                )
                    .chain()
                    .in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                transition_to_running
                    .after(detect_failed_camera_scene)
                    .in_set(FrameSet::Input)
                    .run_if(in_state(AppState::Loading)),
            );
    }
}
