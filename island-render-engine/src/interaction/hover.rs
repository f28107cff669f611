use bevy::prelude::*;
use constants::navigation::CameraZone;
use constants::roles::{
    CONTACT_CONTENT_PREFIX, LEAVES_NAMES, TREE_HOVER_PROXY, WORKSHOP_CONTENT_PREFIX,
    WORKSHOP_HOVER_PROXY, content_slot,
};

use crate::interaction::effects::{CursorAffordance, VisualEffect};
use crate::interaction::settings::InteractionSettings;

/// What hovering a candidate does in the current zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverFeedback {
    pub brighten: Option<f32>,
    pub scale: Option<f32>,
    /// Publish the object name as the hovered workshop content.
    pub publish_workshop: bool,
}

/// Per-zone hover rule for a candidate name. `None` means the candidate is not
/// interactive here and counts as no hover.
pub fn hover_feedback(
    zone: CameraZone,
    name: &str,
    settings: &InteractionSettings,
) -> Option<HoverFeedback> {
    match zone {
        CameraZone::Tree => (LEAVES_NAMES.contains(&name) || name == TREE_HOVER_PROXY).then_some(
            HoverFeedback {
                brighten: Some(settings.hover_brightness),
                scale: None,
                publish_workshop: false,
            },
        ),
        CameraZone::Workshop => (content_slot(name, WORKSHOP_CONTENT_PREFIX).is_some()
            || name == WORKSHOP_HOVER_PROXY)
            .then_some(HoverFeedback {
                brighten: Some(settings.hover_brightness),
                scale: Some(settings.workshop_hover_scale),
                publish_workshop: true,
            }),
        CameraZone::Contact => content_slot(name, CONTACT_CONTENT_PREFIX).is_some().then_some(
            HoverFeedback {
                brighten: None,
                scale: Some(settings.contact_hover_scale),
                publish_workshop: false,
            },
        ),
        CameraZone::Overview => None,
    }
}

/// Hover candidate for this frame.
#[derive(Debug, Clone, Copy)]
pub struct HoverTarget<'a> {
    pub object: Entity,
    pub name: &'a str,
    /// Scale the object has right now.
    pub scale: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoveredObject {
    pub object: Entity,
    pub name: String,
    pub original_scale: Option<Vec3>,
    pub published_workshop: bool,
}

/// At most one hovered object, with what is needed to undo its feedback.
#[derive(Resource, Debug, Default)]
pub struct HoverState {
    hovered: Option<HoveredObject>,
}

impl HoverState {
    pub fn hovered(&self) -> Option<&HoveredObject> {
        self.hovered.as_ref()
    }

    /// Move hover to `target`. Reverts of the previous object always precede
    /// the feedback for the new one. Returns nothing when the hovered object is unchanged.
    pub fn transition(
        &mut self,
        zone: Option<CameraZone>,
        target: Option<HoverTarget<'_>>,
        settings: &InteractionSettings,
    ) -> Vec<VisualEffect> {
        let next = target.and_then(|target| {
            let feedback = hover_feedback(zone?, target.name, settings)?;
            Some((target, feedback))
        });
        let next_object = next.as_ref().map(|(target, _)| target.object);
        if self.hovered.as_ref().map(|hovered| hovered.object) == next_object {
            return Vec::new();
        }

        let mut effects = self.clear();
        let Some((target, feedback)) = next else {
            return effects;
        };

        if let Some(factor) = feedback.brighten {
            effects.push(VisualEffect::Brighten {
                object: target.object,
                factor,
            });
        }
        let original_scale = feedback.scale.map(|factor| {
            effects.push(VisualEffect::SetScale {
                object: target.object,
                scale: target.scale * factor,
            });
            target.scale
        });
        if feedback.publish_workshop {
            effects.push(VisualEffect::WorkshopHover(Some(target.name.to_string())));
        }
        effects.push(VisualEffect::Cursor(CursorAffordance::Interactive));

        self.hovered = Some(HoveredObject {
            object: target.object,
            name: target.name.to_string(),
            original_scale,
            published_workshop: feedback.publish_workshop,
        });
        effects
    }

    /// Drop the hover and return the effects that undo it.
    pub fn clear(&mut self) -> Vec<VisualEffect> {
        let Some(previous) = self.hovered.take() else {
            return Vec::new();
        };
        let mut effects = vec![VisualEffect::RestoreMaterial(previous.object)];
        if let Some(scale) = previous.original_scale {
            effects.push(VisualEffect::SetScale {
                object: previous.object,
                scale,
            });
        }
        effects.push(VisualEffect::Cursor(CursorAffordance::Default));
        if previous.published_workshop {
            effects.push(VisualEffect::WorkshopHover(None));
        }
        effects
    }

    /// Forget the hover without reverting; its objects no longer exist.
    pub fn forget(&mut self) {
        self.hovered = None;
    }
}
