//! Render camera control: switching between registry cameras, parallax tilt
//! and keyboard shortcuts.

/// Single render camera that adopts the active registry entry.
pub mod camera_switch;

/// Pointer-driven tilt around the resting orientation, throttled to a fixed rate.
pub mod parallax;

/// Bracket keys step through the loaded cameras.
pub mod shortcuts;

use bevy::prelude::*;

use crate::engine::core::app_state::FrameSet;
use camera_switch::{AppliedCamera, CameraSwitched, spawn_scene_camera, sync_active_camera};
use parallax::parallax_tilt;
use shortcuts::cycle_camera_on_brackets;

pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppliedCamera>()
            .add_event::<CameraSwitched>()
            .add_systems(Startup, spawn_scene_camera)
            .add_systems(
                Update,
                (cycle_camera_on_brackets, sync_active_camera, parallax_tilt)
                    .chain()
                    .in_set(FrameSet::Camera),
            );
    }
}
