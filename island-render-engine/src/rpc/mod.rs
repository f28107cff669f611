//! JSON-RPC 2.0 bridge to the host page.
//!
//! On the web build the engine runs in an iframe; the host page renders the
//! navigation bar, camera grid and content overlays, and talks to the engine
//! through `postMessage`.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Engine (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Requests
//!
//! - `set_camera_index {index}`: switch the active camera
//! - `get_navigation_options`: current index plus the options to offer
//! - `get_scene_state`: zone, tree/workshop content selection and loading progress
//! - `camera_grid_hover_start {index}` / `camera_grid_hover_end`: island outline preselection
//! - `reset_session`: tear down and reload every scene
//!
//! ## Notifications
//!
//! - `camera_changed`, `tree_content_changed`, `hovered_workshop_content`
//! - `open_link {url, target}`: a link the engine just navigated to
//! - `loading_progress`
//! - `overlay_anchor`: screen position of the tooltip or tree panel overlay
//!
//! Error codes follow JSON-RPC 2.0: `-32600` invalid request, `-32601`
//! method not found, `-32602` invalid params.

pub mod web_rpc;
