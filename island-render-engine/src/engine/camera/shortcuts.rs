use bevy::prelude::*;

use crate::engine::scene::camera_registry::CameraRegistry;

/// `[` previous camera, `]` next camera, wrapping over the loaded cameras.
pub fn cycle_camera_on_brackets(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut registry: ResMut<CameraRegistry>,
) {
    let delta = if keyboard.just_pressed(KeyCode::BracketLeft) {
        -1
    } else if keyboard.just_pressed(KeyCode::BracketRight) {
        1
    } else {
        return;
    };
    if registry.step(delta) {
        debug!("Camera shortcut → index {}", registry.active_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::camera_registry::tests::four_cameras;

    #[test]
    fn right_bracket_wraps_to_first_camera() {
        let mut app = App::new();
        let mut registry = four_cameras();
        registry.set_active_index(3);
        app.add_plugins(MinimalPlugins)
            .insert_resource(registry)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, cycle_camera_on_brackets);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::BracketRight);
        app.update();
        assert_eq!(app.world().resource::<CameraRegistry>().active_index(), 0);

        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(KeyCode::BracketRight);
        keyboard.clear();
        keyboard.press(KeyCode::BracketLeft);
        app.update();
        assert_eq!(app.world().resource::<CameraRegistry>().active_index(), 3);
    }
}
