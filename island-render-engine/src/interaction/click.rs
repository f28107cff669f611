use constants::links::{
    BLUEPRINT_LINK_TARGET, CONTACT_LINK_TARGET, LinkTarget, blueprint_link, contact_link,
};
use constants::navigation::CameraZone;
use constants::roles::{
    CONTACT_CONTENT_PREFIX, LEAVES_PREFIX, TREE_CONTENT_PREFIX, WORKSHOP_CONTENT_PREFIX,
    content_slot,
};

use crate::engine::scene::selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    ShowTreeContent(u8),
    HideTreeContent,
    OpenLink {
        url: &'static str,
        target: LinkTarget,
    },
    Nothing,
}

/// Route a primary click on `hit` (the nearest candidate name, if any) in `zone`.
pub fn route_click(
    zone: Option<CameraZone>,
    hit: Option<&str>,
    selection: &SelectionState,
) -> ClickAction {
    match (zone, hit) {
        (Some(CameraZone::Tree), Some(name)) => {
            if let Some(slot) = content_slot(name, LEAVES_PREFIX) {
                if selection.shown_tree_content() == Some(slot) {
                    ClickAction::HideTreeContent
                } else {
                    ClickAction::ShowTreeContent(slot)
                }
            } else if content_slot(name, TREE_CONTENT_PREFIX).is_some() {
                ClickAction::HideTreeContent
            } else {
                dismiss(selection)
            }
        }
        (Some(CameraZone::Tree), None) => dismiss(selection),
        (Some(CameraZone::Contact), Some(name)) => content_slot(name, CONTACT_CONTENT_PREFIX)
            .and_then(contact_link)
            .map_or(ClickAction::Nothing, |url| ClickAction::OpenLink {
                url,
                target: CONTACT_LINK_TARGET,
            }),
        (Some(CameraZone::Workshop), Some(name)) => content_slot(name, WORKSHOP_CONTENT_PREFIX)
            .and_then(blueprint_link)
            .map_or(ClickAction::Nothing, |url| ClickAction::OpenLink {
                url,
                target: BLUEPRINT_LINK_TARGET,
            }),
        _ => ClickAction::Nothing,
    }
}

fn dismiss(selection: &SelectionState) -> ClickAction {
    if selection.tree_contents_visible() || selection.current_tree_content().is_some() {
        ClickAction::HideTreeContent
    } else {
        ClickAction::Nothing
    }
}
