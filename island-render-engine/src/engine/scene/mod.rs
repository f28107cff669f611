//! Session scene store: loaded sub-scenes, tracked objects, cameras and selection.
//!
//! Every resource here is owned by the ECS world and mutated through explicit
//! setters; nothing is global.

/// Cameras read from the camera description and the active index.
pub mod camera_registry;

/// Scene-graph traversal helpers for freshly spawned scene instances.
pub mod hierarchy;

/// Zone outline groups built from the island hover meshes, shown on camera-grid hover.
pub mod outlines;

/// Loaded sub-scenes and role-categorised tracked objects.
pub mod registry;

/// Visible tree content and hovered workshop content.
pub mod selection;
