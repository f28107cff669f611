use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::scene_manifest::SceneManifest;
use crate::engine::camera::CameraControllerPlugin;
use crate::engine::core::app_state::{AppState, FrameSet};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::SceneLoadingPlugin;
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::outlines::{PreselectZone, apply_preselection, build_outline_groups};
use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;
use crate::interaction::InteractionPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::NavigationUiPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers SceneManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneManifest>::new(&["json"]))
        .configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Camera,
                FrameSet::Interaction,
                FrameSet::Presentation,
            )
                .chain(),
        );

    // Shared stores, written by the loaders and read by everything else.
    app.init_resource::<SceneRegistry>()
        .init_resource::<CameraRegistry>()
        .init_resource::<SelectionState>()
        .add_event::<PreselectZone>();

    app.add_plugins(SceneLoadingPlugin)
        .add_plugins(CameraControllerPlugin)
        .add_plugins(InteractionPlugin)
        .add_plugins(NavigationUiPlugin)
        .add_plugins(WebRpcPlugin);

    app.add_systems(Startup, setup).add_systems(
        Update,
        (build_outline_groups, apply_preselection)
            .chain()
            .in_set(FrameSet::Presentation),
    );

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    commands.insert_resource(AmbientLight {
        brightness: 400.0,
        ..default()
    });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
