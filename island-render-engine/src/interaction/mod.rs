//! Pointer-driven interaction: hit-testing, hover feedback, click routing,
//! content toggles, link opening and the one-time zone reveals.
//!
//! Decisions are pure functions over state and input that return
//! [`effects::VisualEffect`] lists; `apply_visual_effects` is the only system
//! that mutates materials and scales for hover.

/// Click routing per camera zone.
pub mod click;

/// Per-frame systems tying pointer, registries and hover state together.
pub mod dispatcher;

/// Visual effect list, original-material snapshots and cursor affordance.
pub mod effects;

/// Candidate meshes and nearest triangle hit resolved to a tracked object.
pub mod hit_test;

/// Hover rules and the revert-then-apply hover transition.
pub mod hover;

/// External link navigation.
pub mod links;

/// Pointer position and hover-test throttling.
pub mod pointer;

/// World ray under the pointer.
pub mod ray;

/// First-visit leaf pulse and contact icon reveal.
pub mod reveal;

/// Interaction tunables.
pub mod settings;

/// Experience tree panel visibility.
pub mod tree_content;

use bevy::prelude::*;

use crate::engine::core::app_state::FrameSet;
use dispatcher::{handle_world_clicks, hover_tick, reset_on_camera_switch};
use effects::{CursorAffordance, PendingEffects, apply_cursor_affordance, apply_visual_effects};
use hit_test::CandidateCache;
use hover::HoverState;
use links::{OpenLinkRequest, open_links};
use pointer::{PointerState, track_pointer};
use ray::{PointerRay, update_pointer_ray};
use reveal::{ActiveReveals, advance_reveals, start_reveals};
use settings::InteractionSettings;
use tree_content::{TreeContentToggle, apply_tree_content_toggles};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionSettings>()
            .init_resource::<PointerState>()
            .init_resource::<PointerRay>()
            .init_resource::<CandidateCache>()
            .init_resource::<HoverState>()
            .init_resource::<PendingEffects>()
            .init_resource::<CursorAffordance>()
            .init_resource::<ActiveReveals>()
            .add_event::<TreeContentToggle>()
            .add_event::<OpenLinkRequest>()
            .add_systems(Update, track_pointer.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (
                    update_pointer_ray,
                    reset_on_camera_switch,
                    hover_tick,
                    handle_world_clicks,
                    apply_tree_content_toggles,
                    apply_visual_effects,
                    start_reveals,
                    advance_reveals,
                    apply_cursor_affordance,
                    open_links,
                )
                    .chain()
                    .in_set(FrameSet::Interaction),
            );
    }
}
