use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;

/// Material a mesh showed when its sub-scene was published. Hover and reveal
/// always restore exactly this handle.
#[derive(Component, Debug, Clone)]
pub struct OriginalMaterial(pub Handle<StandardMaterial>);

/// Pointer cursor requested by the dispatcher.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorAffordance {
    #[default]
    Default,
    Interactive,
}

/// A visual mutation produced by the dispatcher, applied by `apply_visual_effects`.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualEffect {
    /// Point every mesh of the object back at its `OriginalMaterial`.
    RestoreMaterial(Entity),
    /// Give every mesh of the object a clone of its original with the colour scaled.
    Brighten { object: Entity, factor: f32 },
    SetScale { object: Entity, scale: Vec3 },
    Cursor(CursorAffordance),
    /// Publish or clear the hovered workshop content id.
    WorkshopHover(Option<String>),
}

/// Effects queued this frame, applied in order.
#[derive(Resource, Default, Debug)]
pub struct PendingEffects(Vec<VisualEffect>);

impl PendingEffects {
    pub fn extend(&mut self, effects: impl IntoIterator<Item = VisualEffect>) {
        self.0.extend(effects);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Colour scaled in linear space, alpha untouched.
pub fn scale_color(color: Color, factor: f32) -> Color {
    let linear = color.to_linear();
    Color::LinearRgba(LinearRgba::new(
        linear.red * factor,
        linear.green * factor,
        linear.blue * factor,
        linear.alpha,
    ))
}

/// Clone of `original` with its base colour scaled.
pub fn brightened(original: &StandardMaterial, factor: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: scale_color(original.base_color, factor),
        ..original.clone()
    }
}

pub fn apply_visual_effects(
    mut pending: ResMut<PendingEffects>,
    registry: Res<SceneRegistry>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut mesh_materials: Query<(&OriginalMaterial, &mut MeshMaterial3d<StandardMaterial>)>,
    mut transforms: Query<&mut Transform>,
    mut selection: ResMut<SelectionState>,
    mut cursor: ResMut<CursorAffordance>,
) {
    if pending.is_empty() {
        return;
    }
    for effect in pending.0.drain(..) {
        match effect {
            VisualEffect::RestoreMaterial(object) => {
                for mesh in registry.meshes_of(object) {
                    if let Ok((original, mut material)) = mesh_materials.get_mut(*mesh) {
                        material.0 = original.0.clone();
                    }
                }
            }
            VisualEffect::Brighten { object, factor } => {
                for mesh in registry.meshes_of(object) {
                    let Ok((original, mut material)) = mesh_materials.get_mut(*mesh) else {
                        continue;
                    };
                    let Some(source) = materials.get(&original.0) else {
                        continue;
                    };
                    let highlighted = brightened(source, factor);
                    material.0 = materials.add(highlighted);
                }
            }
            VisualEffect::SetScale { object, scale } => {
                if let Ok(mut transform) = transforms.get_mut(object) {
                    transform.scale = scale;
                }
            }
            VisualEffect::Cursor(affordance) => {
                if *cursor != affordance {
                    *cursor = affordance;
                }
            }
            VisualEffect::WorkshopHover(id) => {
                if selection.hovered_workshop_content() != id.as_deref() {
                    selection.set_hovered_workshop_content(id);
                }
            }
        }
    }
}

pub fn apply_cursor_affordance(
    cursor: Res<CursorAffordance>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
) {
    if !cursor.is_changed() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let icon = match *cursor {
        CursorAffordance::Default => SystemCursorIcon::Default,
        CursorAffordance::Interactive => SystemCursorIcon::Pointer,
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightening_keeps_alpha_and_other_fields() {
        let original = StandardMaterial {
            base_color: Color::LinearRgba(LinearRgba::new(0.2, 0.4, 0.1, 0.5)),
            unlit: true,
            ..default()
        };
        let bright = brightened(&original, 1.5);
        let linear = bright.base_color.to_linear();
        assert!((linear.red - 0.3).abs() < 1e-6);
        assert!((linear.green - 0.6).abs() < 1e-6);
        assert_eq!(linear.alpha, 0.5);
        assert!(bright.unlit);
    }
}
