use bevy::prelude::*;

use crate::config::render_settings::*;

/// Runtime tunables for hover, tilt and reveal behaviour.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub hover_brightness: f32,
    pub workshop_hover_scale: f32,
    pub contact_hover_scale: f32,
    pub hover_test_interval_secs: f64,
    pub pointer_move_threshold: f32,
    /// Drop candidates outside the camera frustum before ray tests.
    pub frustum_prefilter: bool,
    pub tilt_max_angle: f32,
    pub tilt_blend: f32,
    pub tilt_rate_hz: f32,
    pub reveal_stagger_secs: f32,
    pub reveal_pulse_secs: f32,
    pub reveal_peak_brightness: f32,
    pub contact_reveal_hold_secs: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hover_brightness: HOVER_BRIGHTNESS,
            workshop_hover_scale: WORKSHOP_HOVER_SCALE,
            contact_hover_scale: CONTACT_HOVER_SCALE,
            hover_test_interval_secs: HOVER_TEST_INTERVAL_SECS,
            pointer_move_threshold: POINTER_MOVE_THRESHOLD,
            frustum_prefilter: true,
            tilt_max_angle: TILT_MAX_ANGLE,
            tilt_blend: TILT_BLEND,
            tilt_rate_hz: TILT_RATE_HZ,
            reveal_stagger_secs: REVEAL_STAGGER_SECS,
            reveal_pulse_secs: REVEAL_PULSE_SECS,
            reveal_peak_brightness: REVEAL_PEAK_BRIGHTNESS,
            contact_reveal_hold_secs: CONTACT_REVEAL_HOLD_SECS,
        }
    }
}
