//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, system ordering
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the scene loading, camera, interaction, RPC
/// and navigation UI plugins plus platform-specific configuration.
pub mod app_setup;

/// Application state machine and loading-to-running transition.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
