/// Asset locations relative to the Bevy asset root.
pub mod path;

/// Tunable interaction and camera values.
pub mod render_settings;
