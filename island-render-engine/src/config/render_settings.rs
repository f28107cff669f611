/// Colour multiplier applied to a hovered object's material.
pub const HOVER_BRIGHTNESS: f32 = 1.5;

/// Uniform scale applied while a workshop blueprint is hovered.
pub const WORKSHOP_HOVER_SCALE: f32 = 1.02;

/// Uniform scale applied while a contact icon is hovered.
pub const CONTACT_HOVER_SCALE: f32 = 1.1;

/// Minimum time between two hover ray tests (about one display refresh).
pub const HOVER_TEST_INTERVAL_SECS: f64 = 0.016;

/// Pointer travel in normalised device coordinates below which a test is skipped.
pub const POINTER_MOVE_THRESHOLD: f32 = 0.001;

/// Largest parallax tilt away from the resting orientation, in radians.
pub const TILT_MAX_ANGLE: f32 = 0.05;

/// Slerp factor per tilt step toward the tilt target.
pub const TILT_BLEND: f32 = 0.1;

/// Tilt steps per second.
pub const TILT_RATE_HZ: f32 = 60.0;

/// Delay between consecutive leaves / icons in the one-time reveal animations.
pub const REVEAL_STAGGER_SECS: f32 = 0.25;

/// Length of one leaf brighten-and-fade pulse.
pub const REVEAL_PULSE_SECS: f32 = 0.8;

/// Colour multiplier at the peak of a leaf pulse.
pub const REVEAL_PEAK_BRIGHTNESS: f32 = 1.8;

/// How long each contact icon stays visible once revealed.
pub const CONTACT_REVEAL_HOLD_SECS: f32 = 2.5;

/// Distance from a workshop blueprint to its tooltip anchor, along world up.
pub const WORKSHOP_TOOLTIP_OFFSET: f32 = 0.2;

/// Distance from a tree panel to its overlay anchor, along the panel normal.
pub const TREE_OVERLAY_OFFSET: f32 = 0.06;

/// Outline shell thickness along vertex normals.
pub const OUTLINE_EXPANSION: f32 = 0.1;

/// Minimum time between two overlay anchor notifications sent to the host page.
pub const OVERLAY_NOTIFY_INTERVAL_SECS: f32 = 1.0 / 30.0;
