use bevy::prelude::*;

use crate::interaction::settings::InteractionSettings;

/// Pointer position in normalised device coordinates plus hover-test throttling.
#[derive(Resource, Debug, Default)]
pub struct PointerState {
    /// `[-1, 1]` on both axes, `+y` up. Centre of the screen until the pointer moves.
    pub ndc: Vec2,
    last_tested: Option<Vec2>,
    last_test_secs: Option<f64>,
    forced: bool,
}

impl PointerState {
    /// Offset from the screen centre in `[-0.5, 0.5]`.
    pub fn offset_from_center(&self) -> Vec2 {
        self.ndc * 0.5
    }

    /// A hover test runs once the pointer moved past the threshold and the
    /// minimum interval elapsed, or immediately when forced.
    pub fn should_test(&self, now_secs: f64, settings: &InteractionSettings) -> bool {
        if self.forced {
            return true;
        }
        let Some(last_position) = self.last_tested else {
            return true;
        };
        let moved = self.ndc.distance(last_position) >= settings.pointer_move_threshold;
        let interval_elapsed = self
            .last_test_secs
            .is_none_or(|last| now_secs - last >= settings.hover_test_interval_secs);
        moved && interval_elapsed
    }

    pub fn mark_tested(&mut self, now_secs: f64) {
        self.last_tested = Some(self.ndc);
        self.last_test_secs = Some(now_secs);
        self.forced = false;
    }

    /// Test on the next frame even if the pointer is still; the scene under it changed.
    pub fn force_next_test(&mut self) {
        self.forced = true;
    }
}

pub fn to_ndc(position: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        position.x / window_size.x * 2.0 - 1.0,
        1.0 - position.y / window_size.y * 2.0,
    )
}

pub fn track_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window>,
    mut pointer: ResMut<PointerState>,
) {
    for event in cursor_moved.read() {
        if let Ok(window) = windows.get(event.window) {
            pointer.ndc = to_ndc(event.position, window.size());
        }
    }
}
