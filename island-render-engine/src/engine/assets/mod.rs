//! Asset definitions for the island scene.

/// Scene manifest listing every sub-scene with its transform and texture.
pub mod scene_manifest;
