use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Manifest, sub-scenes and cameras are still in flight.
    #[default]
    Loading,
    /// Every load settled, loaded or failed.
    Running,
}

/// Frame phases shared by every plugin. Configured as a chain in `create_app`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Loading, pointer tracking and incoming RPC requests.
    Input,
    /// Active camera switch and parallax tilt.
    Camera,
    /// Hit-testing, hover, clicks and the effects they produce.
    Interaction,
    /// Overlays, outlines, UI and outgoing notifications.
    Presentation,
}

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_settled() {
        info!(
            "→ Loading settled ({} scenes loaded, {} failed), transitioning to Running state",
            loading_progress.loaded_scenes().len(),
            loading_progress.failures().len()
        );
        next_state.set(AppState::Running);
    }
}
