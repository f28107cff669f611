use bevy::prelude::*;

use crate::engine::scene::camera_registry::CameraRegistry;

/// The single render camera. Takes over projection and resting transform of
/// the active registry entry.
#[derive(Component, Debug, Default)]
pub struct SceneCamera;

/// The render camera switched to another registry entry.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSwitched {
    pub previous: Option<usize>,
    pub index: usize,
}

/// Index and camera list revision currently shown by the render camera.
#[derive(Resource, Default, Debug)]
pub struct AppliedCamera {
    index: Option<usize>,
    revision: u64,
}

pub fn spawn_scene_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("scene-camera"),
        SceneCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Copy the active entry onto the render camera whenever the index changes.
pub fn sync_active_camera(
    registry: Res<CameraRegistry>,
    mut applied: ResMut<AppliedCamera>,
    mut camera: Query<(&mut Transform, &mut Projection), With<SceneCamera>>,
    mut switched: EventWriter<CameraSwitched>,
) {
    let index = registry.active_index();
    if applied.index == Some(index) && applied.revision == registry.revision() {
        return;
    }
    let Some(entry) = registry.active() else {
        return;
    };
    let Ok((mut transform, mut projection)) = camera.single_mut() else {
        return;
    };

    *transform = entry.rest;
    *projection = entry.projection.clone();

    let previous = applied.index;
    applied.index = Some(index);
    applied.revision = registry.revision();

    info!("Camera switched to {} ({})", index, entry.name);
    switched.write(CameraSwitched { previous, index });
}
