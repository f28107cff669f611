use bevy::prelude::*;
use constants::navigation::{CameraZone, DEFAULT_CAMERA_INDEX};

/// A usable camera read from the camera description.
#[derive(Debug, Clone)]
pub struct CameraEntry {
    pub name: String,
    pub projection: Projection,
    /// Resting world transform. Never written by tilt.
    pub rest: Transform,
}

/// Cameras in description order plus the index of the active one.
#[derive(Resource, Debug)]
pub struct CameraRegistry {
    cameras: Vec<CameraEntry>,
    active_index: usize,
    revision: u64,
}

impl Default for CameraRegistry {
    fn default() -> Self {
        Self {
            cameras: Vec::new(),
            active_index: DEFAULT_CAMERA_INDEX,
            revision: 0,
        }
    }
}

impl CameraRegistry {
    pub fn set_cameras(&mut self, cameras: Vec<CameraEntry>) {
        self.cameras = cameras;
        self.revision += 1;
    }

    pub fn cameras(&self) -> &[CameraEntry] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Select a loaded camera. Out-of-range indices leave the selection unchanged.
    pub fn set_active_index(&mut self, index: usize) -> bool {
        if index >= self.cameras.len() {
            return false;
        }
        self.active_index = index;
        true
    }

    /// Move the selection by `delta`, wrapping over the loaded cameras.
    pub fn step(&mut self, delta: isize) -> bool {
        let count = self.cameras.len() as isize;
        if count == 0 {
            return false;
        }
        self.active_index = (self.active_index as isize + delta).rem_euclid(count) as usize;
        true
    }

    pub fn active(&self) -> Option<&CameraEntry> {
        self.cameras.get(self.active_index)
    }

    /// Zone that drives the interaction rules for the active index.
    pub fn zone(&self) -> Option<CameraZone> {
        CameraZone::from_index(self.active_index)
    }

    /// Bumped whenever the camera list is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) {
        *self = Self {
            revision: self.revision + 1,
            ..Self::default()
        };
    }
}
