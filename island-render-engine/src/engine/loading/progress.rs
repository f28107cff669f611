use bevy::prelude::*;
use serde::Serialize;

use crate::engine::loading::error::LoadError;

/// Settlement tracking for the manifest, every sub-scene and the camera description.
#[derive(Resource, Default, Debug, Clone, Serialize)]
pub struct LoadingProgress {
    manifest_loaded: bool,
    expected_scenes: usize,
    loaded_scenes: Vec<String>,
    failures: Vec<String>,
    failed_scenes: usize,
    cameras_settled: bool,
    camera_count: usize,
    /// Nothing else can load without the manifest.
    manifest_failed: bool,
}

impl LoadingProgress {
    /// Manifest resolved; `scene_count` sub-scenes are now in flight.
    pub fn begin(&mut self, scene_count: usize) {
        self.manifest_loaded = true;
        self.expected_scenes = scene_count;
    }

    pub fn record_loaded(&mut self, scene: &str) {
        self.loaded_scenes.push(scene.to_string());
    }

    pub fn record_failure(&mut self, error: &LoadError) {
        match error {
            LoadError::Manifest { .. } => self.manifest_failed = true,
            LoadError::SubScene { .. } => self.failed_scenes += 1,
            LoadError::Cameras { .. } | LoadError::NoCameras { .. } => {
                self.cameras_settled = true;
            }
        }
        self.failures.push(error.to_string());
    }

    pub fn record_cameras(&mut self, count: usize) {
        self.cameras_settled = true;
        self.camera_count = count;
    }

    pub fn loaded_scenes(&self) -> &[String] {
        &self.loaded_scenes
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn settled_scenes(&self) -> usize {
        self.loaded_scenes.len() + self.failed_scenes
    }

    pub fn is_settled(&self) -> bool {
        self.manifest_failed
            || (self.manifest_loaded
                && self.cameras_settled
                && self.settled_scenes() >= self.expected_scenes)
    }

    /// Fraction in `[0, 1]` for the host page's loading splash.
    pub fn fraction(&self) -> f32 {
        if self.is_settled() {
            return 1.0;
        }
        let total = self.expected_scenes + 2;
        let done = usize::from(self.manifest_loaded)
            + self.settled_scenes().min(self.expected_scenes)
            + usize::from(self.cameras_settled);
        done as f32 / total as f32
    }
}
