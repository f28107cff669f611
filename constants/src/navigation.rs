use serde::Serialize;

/// Thematic camera context selected by the active camera index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraZone {
    Workshop,
    Overview,
    Contact,
    Tree,
}

impl CameraZone {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Workshop),
            1 => Some(Self::Overview),
            2 => Some(Self::Contact),
            3 => Some(Self::Tree),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Workshop => 0,
            Self::Overview => 1,
            Self::Contact => 2,
            Self::Tree => 3,
        }
    }
}

/// Camera shown when the session starts: the island overview with the camera grid.
pub const DEFAULT_CAMERA_INDEX: usize = 1;

/// One entry of the navigation bar / camera grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationOption {
    pub name: &'static str,
    pub index: usize,
}

/// Ordered navigation options; the overview is reached with "Back".
pub const NAVIGATION_OPTIONS: &[NavigationOption] = &[
    NavigationOption {
        name: "Project Workshop",
        index: 0,
    },
    NavigationOption {
        name: "Experience tree",
        index: 3,
    },
    NavigationOption {
        name: "About Me",
        index: 2,
    },
];

/// Options offered in the nav bar while `current` is active.
pub fn options_excluding(current: usize) -> impl Iterator<Item = &'static NavigationOption> {
    NAVIGATION_OPTIONS.iter().filter(move |o| o.index != current)
}
