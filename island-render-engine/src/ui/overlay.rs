use bevy::prelude::*;
use constants::content::{description_points, tree_entry, workshop_entry};
use constants::navigation::CameraZone;
use constants::roles::{ObjectRole, TREE_CONTENT_PREFIX};
use serde::Serialize;

use crate::config::render_settings::{
    OVERLAY_NOTIFY_INTERVAL_SECS, TREE_OVERLAY_OFFSET, WORKSHOP_TOOLTIP_OFFSET,
};
use crate::engine::camera::camera_switch::SceneCamera;
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;

/// Content that currently wants an overlay next to its object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayTarget {
    Workshop { id: String },
    Tree { slot: u8 },
}

impl OverlayTarget {
    fn object(&self, registry: &SceneRegistry) -> Option<Entity> {
        match self {
            OverlayTarget::Workshop { id } => registry
                .object_named(ObjectRole::WorkshopContent, id)
                .map(|object| object.entity),
            OverlayTarget::Tree { slot } => registry
                .object_named(
                    ObjectRole::TreeContent,
                    &format!("{TREE_CONTENT_PREFIX}{slot}"),
                )
                .map(|object| object.entity),
        }
    }

    /// World point the overlay is pinned to.
    pub fn anchor_point(&self, transform: &GlobalTransform) -> Vec3 {
        match self {
            OverlayTarget::Workshop { .. } => {
                transform.translation() + Vec3::Y * WORKSHOP_TOOLTIP_OFFSET
            }
            OverlayTarget::Tree { .. } => {
                transform.translation() + transform.back() * TREE_OVERLAY_OFFSET
            }
        }
    }
}

/// The workshop tooltip follows hover; the tree panel follows the clicked leaves.
pub fn overlay_target(zone: Option<CameraZone>, selection: &SelectionState) -> Option<OverlayTarget> {
    match zone? {
        CameraZone::Workshop => selection
            .hovered_workshop_content()
            .map(|id| OverlayTarget::Workshop { id: id.to_string() }),
        CameraZone::Tree => selection
            .shown_tree_content()
            .map(|slot| OverlayTarget::Tree { slot }),
        CameraZone::Overview | CameraZone::Contact => None,
    }
}

/// Screen placement of the active overlay, in logical viewport pixels.
///
/// Only written when the target changes or the throttle interval has passed,
/// so change detection doubles as the publish signal.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct OverlayAnchor {
    target: Option<OverlayTarget>,
    viewport: Option<Vec2>,
}

impl OverlayAnchor {
    pub fn target(&self) -> Option<&OverlayTarget> {
        self.target.as_ref()
    }

    pub fn viewport(&self) -> Option<Vec2> {
        self.viewport
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "target": self.target,
            "x": self.viewport.map(|p| p.x),
            "y": self.viewport.map(|p| p.y),
        })
    }
}

#[allow(clippy::too_many_arguments)]
pub fn update_overlay_anchor(
    time: Res<Time>,
    registry: Res<SceneRegistry>,
    cameras: Res<CameraRegistry>,
    selection: Res<SelectionState>,
    camera_query: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    transforms: Query<&GlobalTransform>,
    mut anchor: ResMut<OverlayAnchor>,
    mut since_publish: Local<f32>,
) {
    *since_publish += time.delta_secs();

    let target = overlay_target(cameras.zone(), &selection);
    let viewport = target.as_ref().and_then(|target| {
        let object = target.object(&registry)?;
        let object_transform = transforms.get(object).ok()?;
        let (camera, camera_transform) = camera_query.single().ok()?;
        camera
            .world_to_viewport(camera_transform, target.anchor_point(object_transform))
            .ok()
    });

    let target_changed = anchor.target != target;
    let moved = anchor.viewport != viewport;
    if target_changed || (moved && *since_publish >= OVERLAY_NOTIFY_INTERVAL_SECS) {
        *since_publish = 0.0;
        *anchor = OverlayAnchor { target, viewport };
    }
}

#[derive(Component)]
pub struct OverlayTooltip;

#[derive(Component)]
pub struct OverlayTooltipText;

pub fn spawn_overlay_tooltip(mut commands: Commands) {
    commands
        .spawn((
            OverlayTooltip,
            Name::new("OverlayTooltip"),
            BackgroundColor(Color::srgba(0.08, 0.09, 0.11, 0.85)),
            Node {
                position_type: PositionType::Absolute,
                max_width: Val::Px(320.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                display: Display::None,
                ..default()
            },
        ))
        .with_children(|tooltip| {
            tooltip.spawn((
                OverlayTooltipText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

/// Tooltip or panel body for a target, from the compiled content tables.
pub fn overlay_text(target: &OverlayTarget) -> Option<String> {
    match target {
        OverlayTarget::Workshop { id } => {
            let entry = workshop_entry(id)?;
            let mut text = format!("{}\n{}", entry.title, entry.description);
            if !entry.technologies.is_empty() {
                text.push_str(&format!("\n{}", entry.technologies.join(" · ")));
            }
            Some(text)
        }
        OverlayTarget::Tree { slot } => {
            let entry = tree_entry(*slot)?;
            let mut text = entry.title.to_string();
            for point in description_points(entry.description) {
                text.push_str(&format!("\n• {point}"));
            }
            Some(text)
        }
    }
}

pub fn update_overlay_tooltip(
    anchor: Res<OverlayAnchor>,
    mut tooltip: Query<&mut Node, With<OverlayTooltip>>,
    mut text: Query<&mut Text, With<OverlayTooltipText>>,
) {
    if !anchor.is_changed() {
        return;
    }
    let Ok(mut node) = tooltip.single_mut() else {
        return;
    };

    let body = anchor.target().and_then(overlay_text);
    match (body, anchor.viewport()) {
        (Some(body), Some(position)) => {
            node.display = Display::Flex;
            node.left = Val::Px(position.x);
            node.top = Val::Px(position.y);
            if let Ok(mut text) = text.single_mut() {
                if text.0 != body {
                    text.0 = body;
                }
            }
        }
        _ => node.display = Display::None,
    }
}
