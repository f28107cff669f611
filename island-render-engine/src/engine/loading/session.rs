use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::loading::camera_loader::PendingCameraScene;
use crate::engine::loading::manifest_loader::ManifestLoader;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_loader::PendingSubScene;
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;
use crate::interaction::effects::CursorAffordance;
use crate::interaction::hover::HoverState;
use crate::interaction::reveal::{ActiveReveals, RevealFlags};

/// Session identity. Load results carry the generation they were started under
/// and are discarded when it no longer matches.
#[derive(Resource, Debug, Default)]
pub struct SceneSession {
    generation: u32,
    reveals: RevealFlags,
}

impl SceneSession {
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn accepts(&self, generation: u32) -> bool {
        generation == self.generation
    }

    pub fn reveals(&self) -> &RevealFlags {
        &self.reveals
    }

    pub fn reveals_mut(&mut self) -> &mut RevealFlags {
        &mut self.reveals
    }

    /// End the session: in-flight loads become stale and reveals may play again.
    pub fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.reveals = RevealFlags::default();
    }
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetSessionRequest;

/// Tear the session down and start loading from the manifest again.
#[allow(clippy::too_many_arguments)]
pub fn reset_session_on_request(
    mut requests: EventReader<ResetSessionRequest>,
    mut session: ResMut<SceneSession>,
    mut registry: ResMut<SceneRegistry>,
    mut cameras: ResMut<CameraRegistry>,
    mut selection: ResMut<SelectionState>,
    mut hover: ResMut<HoverState>,
    mut reveals: ResMut<ActiveReveals>,
    mut cursor: ResMut<CursorAffordance>,
    mut progress: ResMut<LoadingProgress>,
    mut loader: ResMut<ManifestLoader>,
    pending: Query<Entity, Or<(With<PendingSubScene>, With<PendingCameraScene>)>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut commands: Commands,
) {
    if requests.read().count() == 0 {
        return;
    }

    session.restart();
    for scene in registry.scenes() {
        commands.entity(scene.root).despawn();
    }
    for entity in &pending {
        commands.entity(entity).despawn();
    }
    registry.clear();
    cameras.clear();
    *selection = SelectionState::default();
    hover.forget();
    reveals.clear();
    *cursor = CursorAffordance::Default;
    *progress = LoadingProgress::default();
    loader.restart();
    next_state.set(AppState::Loading);

    info!("Session reset, generation {}", session.generation());
}
