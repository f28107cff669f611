use bevy::prelude::*;
use constants::navigation::{CameraZone, DEFAULT_CAMERA_INDEX, options_excluding};

use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::outlines::PreselectZone;

const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);

#[derive(Component)]
pub struct NavBar;

/// Nav bar button switching to a camera index.
#[derive(Component, Debug, Clone, Copy)]
pub struct NavButton {
    pub index: usize,
}

#[derive(Component)]
pub struct CameraGrid;

/// Invisible hit area over one island in the overview.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraGridCell {
    pub index: usize,
}

/// Labels and target indices of the nav bar while `current` is active.
pub fn nav_entries(current: usize) -> Vec<(&'static str, usize)> {
    std::iter::once(("Back", DEFAULT_CAMERA_INDEX))
        .chain(options_excluding(current).map(|option| (option.name, option.index)))
        .collect()
}

/// Grid columns left to right, matching the islands as seen from the overview.
const GRID_CELLS: [CameraZone; 3] = [CameraZone::Workshop, CameraZone::Tree, CameraZone::Contact];

pub fn spawn_navigation_ui(mut commands: Commands) {
    commands.spawn((
        NavBar,
        Name::new("NavBar"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            display: Display::Flex,
            column_gap: Val::Px(8.0),
            ..default()
        },
    ));

    commands
        .spawn((
            CameraGrid,
            Name::new("CameraGrid"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                display: Display::None,
                flex_direction: FlexDirection::Row,
                ..default()
            },
        ))
        .with_children(|grid| {
            for zone in GRID_CELLS {
                grid.spawn((
                    CameraGridCell {
                        index: zone.index(),
                    },
                    Button,
                    Name::new(format!("CameraGridCell{}", zone.index())),
                    Node {
                        flex_grow: 1.0,
                        height: Val::Percent(100.0),
                        ..default()
                    },
                ));
            }
        });
}

/// Respawn the nav bar buttons whenever the active camera changes.
pub fn rebuild_nav_buttons(
    mut commands: Commands,
    cameras: Res<CameraRegistry>,
    bar: Query<Entity, With<NavBar>>,
    buttons: Query<Entity, With<NavButton>>,
    mut shown_for: Local<Option<usize>>,
) {
    let current = cameras.active_index();
    if *shown_for == Some(current) {
        return;
    }
    let Ok(bar) = bar.single() else {
        return;
    };
    *shown_for = Some(current);

    for button in &buttons {
        commands.entity(button).despawn();
    }
    commands.entity(bar).with_children(|bar| {
        for (label, index) in nav_entries(current) {
            bar.spawn((
                NavButton { index },
                Button,
                Name::new(format!("NavButton{index}")),
                BackgroundColor(BUTTON_IDLE),
                BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                Node {
                    height: Val::Px(32.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                    display: Display::Flex,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new(label),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 1.0, 1.0)),
                ));
            });
        }
    });
}

pub fn nav_button_interaction(
    mut buttons: Query<
        (&Interaction, &NavButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut cameras: ResMut<CameraRegistry>,
) {
    for (interaction, button, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                if !cameras.set_active_index(button.index) {
                    warn!("Camera {} is not loaded", button.index);
                }
                *background = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *background = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *background = BackgroundColor(BUTTON_IDLE),
        }
    }
}

/// Grid hover pre-selects the island outline; a press switches to that camera.
pub fn camera_grid_interaction(
    cells: Query<(&Interaction, &CameraGridCell), (Changed<Interaction>, With<Button>)>,
    mut cameras: ResMut<CameraRegistry>,
    mut preselect: EventWriter<PreselectZone>,
) {
    for (interaction, cell) in &cells {
        match *interaction {
            Interaction::Pressed => {
                preselect.write(PreselectZone(None));
                cameras.set_active_index(cell.index);
            }
            Interaction::Hovered => {
                preselect.write(PreselectZone(Some(cell.index)));
            }
            Interaction::None => {
                preselect.write(PreselectZone(None));
            }
        }
    }
}

/// The grid only exists in the overview.
pub fn sync_camera_grid_visibility(
    cameras: Res<CameraRegistry>,
    mut grid: Query<&mut Node, With<CameraGrid>>,
) {
    let display = if cameras.zone() == Some(CameraZone::Overview) {
        Display::Flex
    } else {
        Display::None
    };
    for mut node in &mut grid {
        if node.display != display {
            node.display = display;
        }
    }
}
