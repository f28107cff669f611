use std::f32::consts::PI;

use bevy::prelude::*;
use constants::navigation::CameraZone;
use constants::roles::ObjectRole;

use crate::engine::camera::camera_switch::CameraSwitched;
use crate::engine::loading::session::SceneSession;
use crate::engine::scene::registry::SceneRegistry;
use crate::interaction::effects::{OriginalMaterial, brightened};
use crate::interaction::hover::HoverState;
use crate::interaction::settings::InteractionSettings;

/// Which one-time reveals already played this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealFlags {
    pub tree_played: bool,
    pub contact_played: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    /// Staggered brighten-and-fade of every leaf.
    LeafPulse,
    /// Staggered appearance of the "contact me" icons.
    ContactIcons,
}

impl RevealKind {
    pub fn for_zone(zone: CameraZone) -> Option<Self> {
        match zone {
            CameraZone::Tree => Some(Self::LeafPulse),
            CameraZone::Contact => Some(Self::ContactIcons),
            _ => None,
        }
    }

    fn role(self) -> ObjectRole {
        match self {
            Self::LeafPulse => ObjectRole::Leaves,
            Self::ContactIcons => ObjectRole::ContactAnimation,
        }
    }
}

impl RevealFlags {
    pub fn played(&self, kind: RevealKind) -> bool {
        match kind {
            RevealKind::LeafPulse => self.tree_played,
            RevealKind::ContactIcons => self.contact_played,
        }
    }

    pub fn mark_played(&mut self, kind: RevealKind) {
        match kind {
            RevealKind::LeafPulse => self.tree_played = true,
            RevealKind::ContactIcons => self.contact_played = true,
        }
    }
}

/// Colour factor of leaf `index` at `elapsed`, `None` outside its pulse window.
pub fn pulse_factor(elapsed: f32, index: usize, settings: &InteractionSettings) -> Option<f32> {
    let local = elapsed - index as f32 * settings.reveal_stagger_secs;
    if !(0.0..=settings.reveal_pulse_secs).contains(&local) {
        return None;
    }
    let intensity = (PI * local / settings.reveal_pulse_secs).sin();
    Some(1.0 + (settings.reveal_peak_brightness - 1.0) * intensity)
}

/// Whether contact icon `index` is shown at `elapsed`.
pub fn icon_visible(elapsed: f32, index: usize, settings: &InteractionSettings) -> bool {
    let local = elapsed - index as f32 * settings.reveal_stagger_secs;
    (0.0..settings.contact_reveal_hold_secs).contains(&local)
}

fn duration(kind: RevealKind, count: usize, settings: &InteractionSettings) -> f32 {
    let last_start = count.saturating_sub(1) as f32 * settings.reveal_stagger_secs;
    match kind {
        RevealKind::LeafPulse => last_start + settings.reveal_pulse_secs,
        RevealKind::ContactIcons => last_start + settings.contact_reveal_hold_secs,
    }
}

#[derive(Debug)]
struct RevealTarget {
    object: Entity,
    /// Pulse material per mesh, for leaf pulses.
    pulse_materials: Vec<(Entity, Handle<StandardMaterial>)>,
}

#[derive(Debug)]
pub struct ActiveReveal {
    kind: RevealKind,
    elapsed: f32,
    targets: Vec<RevealTarget>,
}

#[derive(Resource, Default, Debug)]
pub struct ActiveReveals(Vec<ActiveReveal>);

impl ActiveReveals {
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Start a zone's reveal on the first switch into it this session. Nothing is
/// claimed while the zone's objects are not loaded yet.
pub fn start_reveals(
    mut switched: EventReader<CameraSwitched>,
    mut session: ResMut<SceneSession>,
    registry: Res<SceneRegistry>,
    originals: Query<&OriginalMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut reveals: ResMut<ActiveReveals>,
) {
    for switch in switched.read() {
        let Some(kind) = CameraZone::from_index(switch.index).and_then(RevealKind::for_zone) else {
            continue;
        };
        let objects = registry.objects(kind.role());
        if session.reveals().played(kind) || objects.is_empty() {
            continue;
        }
        session.reveals_mut().mark_played(kind);

        let targets = objects
            .iter()
            .map(|object| RevealTarget {
                object: object.entity,
                pulse_materials: match kind {
                    RevealKind::LeafPulse => object
                        .meshes
                        .iter()
                        .filter_map(|mesh| {
                            let original = materials.get(&originals.get(*mesh).ok()?.0)?.clone();
                            Some((*mesh, materials.add(original)))
                        })
                        .collect(),
                    RevealKind::ContactIcons => Vec::new(),
                },
            })
            .collect();
        info!("Playing {:?} reveal", kind);
        reveals.0.push(ActiveReveal {
            kind,
            elapsed: 0.0,
            targets,
        });
    }
}

/// Advance running reveals. A hovered leaf keeps its hover material; finished
/// leaves go back to their original material.
pub fn advance_reveals(
    time: Res<Time>,
    settings: Res<InteractionSettings>,
    hover: Res<HoverState>,
    mut reveals: ResMut<ActiveReveals>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut mesh_materials: Query<(&OriginalMaterial, &mut MeshMaterial3d<StandardMaterial>)>,
    mut visibility: Query<&mut Visibility>,
) {
    let hovered = hover.hovered().map(|hovered| hovered.object);
    for reveal in &mut reveals.0 {
        reveal.elapsed += time.delta_secs();
        for (index, target) in reveal.targets.iter().enumerate() {
            match reveal.kind {
                RevealKind::LeafPulse => {
                    if hovered == Some(target.object) {
                        continue;
                    }
                    let factor = pulse_factor(reveal.elapsed, index, &settings);
                    for (mesh, pulse) in &target.pulse_materials {
                        let Ok((original, mut material)) = mesh_materials.get_mut(*mesh) else {
                            continue;
                        };
                        match factor {
                            Some(factor) => {
                                let Some(base) = materials.get(&original.0).cloned() else {
                                    continue;
                                };
                                if let Some(pulse_material) = materials.get_mut(pulse) {
                                    *pulse_material = brightened(&base, factor);
                                }
                                if material.0 != *pulse {
                                    material.0 = pulse.clone();
                                }
                            }
                            None if material.0 == *pulse => material.0 = original.0.clone(),
                            None => {}
                        }
                    }
                }
                RevealKind::ContactIcons => {
                    if let Ok(mut icon) = visibility.get_mut(target.object) {
                        let shown = icon_visible(reveal.elapsed, index, &settings);
                        let next = if shown { Visibility::Inherited } else { Visibility::Hidden };
                        if *icon != next {
                            *icon = next;
                        }
                    }
                }
            }
        }
    }

    reveals.0.retain(|reveal| {
        let playing = reveal.elapsed <= duration(reveal.kind, reveal.targets.len(), &settings);
        if !playing {
            debug!("{:?} reveal finished", reveal.kind);
        }
        playing
    });
}
