use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::camera_switch::SceneCamera;

/// World ray under the pointer for this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub enum PointerRay {
    /// The scene camera took a new projection this frame; its computed
    /// matrices catch up after the frame, so picking waits.
    #[default]
    Settling,
    /// No cursor over the viewport.
    Outside,
    Ray(Ray3d),
}

impl PointerRay {
    /// Ray to test with, or `None` to skip picking this frame.
    pub fn pickable(self) -> Option<Option<Ray3d>> {
        match self {
            PointerRay::Settling => None,
            PointerRay::Outside => Some(None),
            PointerRay::Ray(ray) => Some(Some(ray)),
        }
    }
}

pub fn update_pointer_ray(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform, Ref<Projection>), With<SceneCamera>>,
    mut pointer_ray: ResMut<PointerRay>,
) {
    let Ok((camera, camera_transform, projection)) = camera.single() else {
        *pointer_ray = PointerRay::Outside;
        return;
    };
    if projection.is_changed() {
        *pointer_ray = PointerRay::Settling;
        return;
    }

    *pointer_ray = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok())
        .map_or(PointerRay::Outside, PointerRay::Ray);
}
