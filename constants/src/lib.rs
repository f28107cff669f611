//! Compiled-in tables shared by the island scene engine.
//!
//! Role classification, default visibility, navigation options, external
//! links and overlay copy all live here so interaction code never carries
//! node-name literals of its own.

/// Overlay copy for tree experience panels and workshop blueprints.
pub mod content;

/// Contact and blueprint link tables.
pub mod links;

/// Camera zones and navigation options.
pub mod navigation;

/// Declarative node-name to role tables consulted once at load time.
pub mod roles;
