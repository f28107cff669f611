use bevy::prelude::*;

/// Descendants of `root` in depth-first pre-order, excluding `root` itself.
///
/// Pre-order keeps glTF node order, so a node is always visited before the
/// primitive meshes spawned under it.
pub fn depth_first(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    let mut ordered = Vec::new();
    let mut stack: Vec<Entity> = child_list(root, children).into_iter().rev().collect();
    while let Some(entity) = stack.pop() {
        ordered.push(entity);
        stack.extend(child_list(entity, children).into_iter().rev());
    }
    ordered
}

fn child_list(entity: Entity, children: &Query<&Children>) -> Vec<Entity> {
    children
        .get(entity)
        .map(|list| {
            let slice: &[Entity] = list;
            slice.to_vec()
        })
        .unwrap_or_default()
}

/// Transform of `entity` relative to the world, composed from local transforms up to
/// (and including) `root`.
///
/// Works on freshly spawned scene instances whose `GlobalTransform`s have not been
/// propagated yet.
pub fn world_transform(
    entity: Entity,
    root: Entity,
    parents: &Query<&ChildOf>,
    transforms: &Query<&Transform>,
) -> Transform {
    let mut composed = transforms.get(entity).copied().unwrap_or_default();
    let mut current = entity;
    while current != root {
        let Ok(child_of) = parents.get(current) else {
            break;
        };
        current = child_of.parent();
        let parent = transforms.get(current).copied().unwrap_or_default();
        composed = parent.mul_transform(composed);
    }
    composed
}
