use bevy::prelude::*;
use constants::roles::{ObjectRole, TREE_CONTENT_PREFIX, TREE_CONTENTS_SCENE, content_slot};

use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;

/// Show panel `slot` of the experience tree, or hide the tree contents.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeContentToggle {
    Show(u8),
    Hide,
}

/// Applies toggles: sub-scene root visibility, then all four panels hidden and
/// the requested one shown. Without the tree contents sub-scene nothing changes.
pub fn apply_tree_content_toggles(
    mut toggles: EventReader<TreeContentToggle>,
    registry: Res<SceneRegistry>,
    mut visibility: Query<&mut Visibility>,
    mut selection: ResMut<SelectionState>,
) {
    for toggle in toggles.read() {
        let Some(scene) = registry.scene(TREE_CONTENTS_SCENE) else {
            debug!("Tree content toggle skipped: {} not loaded", TREE_CONTENTS_SCENE);
            continue;
        };
        let shown_slot = match toggle {
            TreeContentToggle::Show(slot) => Some(*slot),
            TreeContentToggle::Hide => None,
        };

        if let Ok(mut root) = visibility.get_mut(scene.root) {
            *root = if shown_slot.is_some() {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        for panel in registry.objects(ObjectRole::TreeContent) {
            let Some(slot) = content_slot(&panel.name, TREE_CONTENT_PREFIX) else {
                continue;
            };
            if let Ok(mut panel_visibility) = visibility.get_mut(panel.entity) {
                *panel_visibility = if shown_slot == Some(slot) {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }

        match shown_slot {
            Some(slot) => selection.show_tree_content(slot),
            None => selection.clear_tree_content(),
        }
    }
}
