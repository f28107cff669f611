use bevy::prelude::*;

/// Which content panel the visitor has opened or is pointing at.
///
/// Written by the tree content toggle and the hover effects, read by overlays,
/// the click router and the RPC bridge.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    tree_contents_visible: bool,
    current_tree_content: Option<u8>,
    hovered_workshop_content: Option<String>,
}

impl SelectionState {
    pub fn tree_contents_visible(&self) -> bool {
        self.tree_contents_visible
    }

    pub fn current_tree_content(&self) -> Option<u8> {
        self.current_tree_content
    }

    /// Panel slot shown right now, if the tree contents are visible.
    pub fn shown_tree_content(&self) -> Option<u8> {
        self.current_tree_content
            .filter(|_| self.tree_contents_visible)
    }

    pub fn hovered_workshop_content(&self) -> Option<&str> {
        self.hovered_workshop_content.as_deref()
    }

    pub fn show_tree_content(&mut self, slot: u8) {
        self.tree_contents_visible = true;
        self.current_tree_content = Some(slot);
    }

    pub fn clear_tree_content(&mut self) {
        self.tree_contents_visible = false;
        self.current_tree_content = None;
    }

    pub fn set_hovered_workshop_content(&mut self, id: Option<String>) {
        self.hovered_workshop_content = id;
    }
}
