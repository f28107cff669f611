/// Interaction role assigned to a named scene-graph node at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRole {
    /// Tree canopy pieces in the experience zone (`leaves1`..`leaves4`).
    Leaves,
    /// Experience panels anchored in the tree, plus the tree hover proxy.
    TreeContent,
    /// Project blueprints in the workshop, plus the blueprint hover proxy.
    WorkshopContent,
    /// Contact icons at the lighthouse.
    ContactContent,
    /// "Contact me" text meshes revealed once on first visit to the contact zone.
    ContactAnimation,
    /// Static buildings; snapshotted but never hit-tested.
    Buildings,
    /// Island silhouettes used to build the decorative outline groups.
    IslandWorkshop,
    IslandTree,
    IslandContact,
}

impl ObjectRole {
    /// Roles whose objects take part in pointer hit-testing.
    pub const HIT_TESTED: [ObjectRole; 4] = [
        ObjectRole::Leaves,
        ObjectRole::TreeContent,
        ObjectRole::WorkshopContent,
        ObjectRole::ContactContent,
    ];

    pub fn is_hit_tested(self) -> bool {
        Self::HIT_TESTED.contains(&self)
    }

    /// Roles that keep an original-material snapshot for hover restoration.
    pub fn snapshots_material(self) -> bool {
        self.is_hit_tested() || self == ObjectRole::Buildings
    }
}

/// How a rule matches node names.
#[derive(Debug, Clone, Copy)]
pub enum NameMatch {
    Exact(&'static [&'static str]),
    Contains(&'static str),
}

impl NameMatch {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Exact(names) => names.contains(&name),
            NameMatch::Contains(fragment) => name.contains(fragment),
        }
    }
}

/// Material treatment applied to a classified mesh when its sub-scene is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialTreatment {
    /// Keep the sub-scene wide material.
    Shared,
    /// Own texture loaded from `static/<node name>.png`.
    NamedTexture { transparent: bool },
    /// Fully transparent but still present for hit-testing and overlay anchoring.
    Invisible,
}

pub struct RoleRule {
    /// Suffix of the glTF file this rule applies to.
    pub container: &'static str,
    pub names: NameMatch,
    pub role: ObjectRole,
    pub material: MaterialTreatment,
}

pub const LEAVES_NAMES: &[&str] = &["leaves1", "leaves2", "leaves3", "leaves4"];
pub const TREE_CONTENT_NAMES: &[&str] = &[
    "TreeContent1",
    "TreeContent2",
    "TreeContent3",
    "TreeContent4",
    TREE_HOVER_PROXY,
];
pub const WORKSHOP_CONTENT_NAMES: &[&str] = &[
    "BlueprintContent1",
    "BlueprintContent2",
    "BlueprintContent3",
    "BlueprintContent4",
    WORKSHOP_HOVER_PROXY,
];
pub const CONTACT_CONTENT_NAMES: &[&str] = &[
    "ContactContent1",
    "ContactContent2",
    "ContactContent3",
    "ContactContent4",
];

pub const TREE_HOVER_PROXY: &str = "TreeHoverContent";
pub const WORKSHOP_HOVER_PROXY: &str = "BlueprintHoverContent";

pub const LEAVES_PREFIX: &str = "leaves";
pub const TREE_CONTENT_PREFIX: &str = "TreeContent";
pub const WORKSHOP_CONTENT_PREFIX: &str = "BlueprintContent";
pub const CONTACT_CONTENT_PREFIX: &str = "ContactContent";

/// Number of indexed panels per content family.
pub const CONTENT_SLOTS: u8 = 4;

pub const ROLE_TABLE: &[RoleRule] = &[
    RoleRule {
        container: "small.glb",
        names: NameMatch::Contains("ContactMeText"),
        role: ObjectRole::ContactAnimation,
        material: MaterialTreatment::Shared,
    },
    RoleRule {
        container: "nature.glb",
        names: NameMatch::Exact(LEAVES_NAMES),
        role: ObjectRole::Leaves,
        material: MaterialTreatment::Shared,
    },
    RoleRule {
        container: "treeContents.glb",
        names: NameMatch::Exact(TREE_CONTENT_NAMES),
        role: ObjectRole::TreeContent,
        material: MaterialTreatment::Invisible,
    },
    RoleRule {
        container: "blueprintContents.glb",
        names: NameMatch::Exact(WORKSHOP_CONTENT_NAMES),
        role: ObjectRole::WorkshopContent,
        material: MaterialTreatment::NamedTexture { transparent: false },
    },
    RoleRule {
        container: "contactContents.glb",
        names: NameMatch::Exact(CONTACT_CONTENT_NAMES),
        role: ObjectRole::ContactContent,
        material: MaterialTreatment::NamedTexture { transparent: true },
    },
    RoleRule {
        container: "island-hover.glb",
        names: NameMatch::Exact(&["Workshop"]),
        role: ObjectRole::IslandWorkshop,
        material: MaterialTreatment::Shared,
    },
    RoleRule {
        container: "island-hover.glb",
        names: NameMatch::Exact(&["Tree"]),
        role: ObjectRole::IslandTree,
        material: MaterialTreatment::Shared,
    },
    RoleRule {
        container: "island-hover.glb",
        names: NameMatch::Exact(&["Lighthouse"]),
        role: ObjectRole::IslandContact,
        material: MaterialTreatment::Shared,
    },
];

/// Every node of `buildings.glb` is tracked as a building, whatever its name.
pub const BUILDINGS_CONTAINER: &str = "buildings.glb";

/// Resolve the role of a node from the file it was loaded from and its name.
pub fn classify(container_url: &str, node_name: &str) -> Option<&'static RoleRule> {
    ROLE_TABLE
        .iter()
        .find(|rule| container_url.ends_with(rule.container) && rule.names.matches(node_name))
}

/// Nodes hidden when their sub-scene is first published.
pub struct HiddenByDefault {
    pub scene: &'static str,
    /// Whether the sub-scene root itself starts hidden.
    pub hide_root: bool,
    pub names: NameMatch,
}

pub const TREE_CONTENTS_SCENE: &str = "treeContents-scene";
pub const BLUEPRINT_CONTENTS_SCENE: &str = "blueprintContents-scene";
pub const ISLAND_HOVER_SCENE: &str = "island-hover";
pub const SMALL_SCENE: &str = "small-scene";
pub const ISLAND_OUTLINES_SCENE: &str = "island-outlines";

pub const HIDDEN_BY_DEFAULT: &[HiddenByDefault] = &[
    HiddenByDefault {
        scene: TREE_CONTENTS_SCENE,
        hide_root: true,
        names: NameMatch::Exact(TREE_CONTENT_NAMES),
    },
    HiddenByDefault {
        scene: BLUEPRINT_CONTENTS_SCENE,
        hide_root: false,
        names: NameMatch::Exact(&[WORKSHOP_HOVER_PROXY]),
    },
    HiddenByDefault {
        scene: ISLAND_HOVER_SCENE,
        hide_root: false,
        names: NameMatch::Exact(&["Workshop", "Tree", "Lighthouse"]),
    },
    HiddenByDefault {
        scene: SMALL_SCENE,
        hide_root: false,
        names: NameMatch::Contains("ContactMeText"),
    },
];

pub fn hidden_by_default(scene: &str) -> Option<&'static HiddenByDefault> {
    HIDDEN_BY_DEFAULT.iter().find(|rule| rule.scene == scene)
}

/// Parse the slot number out of names like `leaves3` or `TreeContent2`.
/// Only slots `1..=CONTENT_SLOTS` are accepted.
pub fn content_slot(name: &str, prefix: &str) -> Option<u8> {
    let slot: u8 = name.strip_prefix(prefix)?.parse().ok()?;
    (1..=CONTENT_SLOTS).contains(&slot).then_some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_container_and_exact_name() {
        let rule = classify("/static/nature.glb", "leaves3").unwrap();
        assert_eq!(rule.role, ObjectRole::Leaves);

        // Same name in another container does not match.
        assert!(classify("/static/green.glb", "leaves3").is_none());
        assert!(classify("/static/nature.glb", "leaves5").is_none());
    }

    #[test]
    fn contact_animation_matches_by_fragment() {
        let rule = classify("/static/small.glb", "ContactMeText.003").unwrap();
        assert_eq!(rule.role, ObjectRole::ContactAnimation);
    }

    #[test]
    fn hover_proxies_join_their_content_family() {
        assert_eq!(
            classify("/static/treeContents.glb", TREE_HOVER_PROXY).unwrap().role,
            ObjectRole::TreeContent
        );
        assert_eq!(
            classify("/static/blueprintContents.glb", WORKSHOP_HOVER_PROXY).unwrap().role,
            ObjectRole::WorkshopContent
        );
    }

    #[test]
    fn content_slot_bounds() {
        assert_eq!(content_slot("leaves2", LEAVES_PREFIX), Some(2));
        assert_eq!(content_slot("ContactContent4", CONTACT_CONTENT_PREFIX), Some(4));
        assert_eq!(content_slot("TreeContent0", TREE_CONTENT_PREFIX), None);
        assert_eq!(content_slot("TreeContent5", TREE_CONTENT_PREFIX), None);
        assert_eq!(content_slot(TREE_HOVER_PROXY, TREE_CONTENT_PREFIX), None);
    }

    #[test]
    fn only_content_roles_are_hit_tested() {
        assert!(ObjectRole::Leaves.is_hit_tested());
        assert!(!ObjectRole::ContactAnimation.is_hit_tested());
        assert!(!ObjectRole::IslandTree.is_hit_tested());
        assert!(ObjectRole::Buildings.snapshots_material());
    }
}
