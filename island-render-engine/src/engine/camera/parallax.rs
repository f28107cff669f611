use bevy::prelude::*;

use crate::engine::camera::camera_switch::{CameraSwitched, SceneCamera};
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::interaction::pointer::PointerState;
use crate::interaction::settings::InteractionSettings;

/// Orientation the camera tilts toward for a pointer offset from screen centre.
///
/// `offset` is clamped to `[-0.5, 0.5]` on both axes; at the edges the camera turns
/// `max_angle` around its own up axis (horizontal) and right axis (vertical).
pub fn tilt_target(rest: Quat, offset: Vec2, max_angle: f32) -> Quat {
    let offset = offset.clamp(Vec2::splat(-0.5), Vec2::splat(0.5));
    let yaw = -offset.x * 2.0 * max_angle;
    let pitch = offset.y * 2.0 * max_angle;
    rest * Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Step accumulator for the fixed tilt rate.
#[derive(Default)]
pub struct TiltClock {
    accumulated: f32,
}

impl TiltClock {
    /// True when a tilt step is due.
    pub fn tick(&mut self, delta: f32, rate_hz: f32) -> bool {
        self.accumulated += delta;
        let step = 1.0 / rate_hz;
        if self.accumulated < step {
            return false;
        }
        self.accumulated = (self.accumulated - step).min(step);
        true
    }
}

/// Ease the render camera toward the pointer-dependent tilt around its resting orientation.
pub fn parallax_tilt(
    time: Res<Time>,
    settings: Res<InteractionSettings>,
    pointer: Res<PointerState>,
    registry: Res<CameraRegistry>,
    mut switched: EventReader<CameraSwitched>,
    mut clock: Local<TiltClock>,
    mut camera: Query<&mut Transform, With<SceneCamera>>,
) {
    // The frame of a switch shows the resting orientation untouched.
    if switched.read().count() > 0 {
        return;
    }
    if !clock.tick(time.delta_secs(), settings.tilt_rate_hz) {
        return;
    }
    let Some(entry) = registry.active() else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    let target = tilt_target(
        entry.rest.rotation,
        pointer.offset_from_center(),
        settings.tilt_max_angle,
    );
    transform.rotation = transform.rotation.slerp(target, settings.tilt_blend);
}
