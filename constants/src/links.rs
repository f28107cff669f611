/// Where an external link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Replace the current page.
    SameTab,
    /// Open a new browsing context.
    NewTab,
}

/// Contact icon slot to external URL.
pub const CONTACT_LINKS: &[(u8, &str)] = &[
    (1, "https://github.com/Pawel-Matuszak"),
    (2, "https://www.linkedin.com/in/pawe%C5%82-matuszak-404a5523b/"),
    (3, "https://x.com/"),
    (4, "mailto:pawel.matuszak2@icloud.com"),
];

/// Workshop blueprint slot to project URL. Slot 1 has no published project yet.
pub const BLUEPRINT_LINKS: &[(u8, &str)] = &[
    (2, "https://pixel-art-editor-xi.vercel.app/"),
    (3, "https://www.a-tel.com.pl/"),
    (4, "https://pawel-matuszak.github.io/chess-js/"),
];

pub const CONTACT_LINK_TARGET: LinkTarget = LinkTarget::SameTab;
pub const BLUEPRINT_LINK_TARGET: LinkTarget = LinkTarget::NewTab;

fn lookup(table: &[(u8, &'static str)], slot: u8) -> Option<&'static str> {
    table.iter().find(|(id, _)| *id == slot).map(|(_, url)| *url)
}

pub fn contact_link(slot: u8) -> Option<&'static str> {
    lookup(CONTACT_LINKS, slot)
}

pub fn blueprint_link(slot: u8) -> Option<&'static str> {
    lookup(BLUEPRINT_LINKS, slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_four_is_mail() {
        assert!(contact_link(4).unwrap().starts_with("mailto:"));
    }

    #[test]
    fn unpublished_blueprint_has_no_link() {
        assert_eq!(blueprint_link(1), None);
        assert_eq!(blueprint_link(3), Some("https://www.a-tel.com.pl/"));
    }
}
