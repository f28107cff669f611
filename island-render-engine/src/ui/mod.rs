//! Presentation layer on top of the interaction core.
//!
//! The overlay anchor is computed on every target; the web build hands it to
//! the host page over RPC, while native builds draw their own tooltip, nav bar
//! and camera grid with Bevy UI.

pub mod navigation;
pub mod overlay;

use bevy::prelude::*;

use crate::engine::core::app_state::FrameSet;

pub struct NavigationUiPlugin;

impl Plugin for NavigationUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<overlay::OverlayAnchor>().add_systems(
            Update,
            overlay::update_overlay_anchor.in_set(FrameSet::Presentation),
        );

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(
            Startup,
            (navigation::spawn_navigation_ui, overlay::spawn_overlay_tooltip),
        )
        .add_systems(
            Update,
            (
                navigation::camera_grid_interaction,
                navigation::nav_button_interaction,
            )
                .in_set(FrameSet::Input),
        )
        .add_systems(
            Update,
            (
                navigation::rebuild_nav_buttons,
                navigation::sync_camera_grid_visibility,
                overlay::update_overlay_tooltip.after(overlay::update_overlay_anchor),
            )
                .in_set(FrameSet::Presentation),
        );
    }
}
