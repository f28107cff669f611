use bevy::prelude::*;
use constants::navigation::CameraZone;
use constants::roles::ObjectRole;
use std::collections::HashMap;

/// A loaded sub-scene. Names are unique for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    pub name: String,
    pub root: Entity,
}

/// A classified node together with the mesh entities drawn for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    pub entity: Entity,
    pub name: String,
    /// Mesh entities at or below `entity`; each carries an `OriginalMaterial` when its
    /// role snapshots materials.
    pub meshes: Vec<Entity>,
}

/// Everything a sub-scene contributes, published in one step.
#[derive(Debug, Clone)]
pub struct SubSceneContribution {
    pub entry: SceneEntry,
    pub objects: Vec<(ObjectRole, TrackedObject)>,
}

/// Loaded sub-scenes and role-categorised object handles for the session.
///
/// Role lists are append-only while loading. `revision` changes exactly when
/// membership changes so consumers can cache derived data.
#[derive(Resource, Default, Debug)]
pub struct SceneRegistry {
    scenes: Vec<SceneEntry>,
    roles: HashMap<ObjectRole, Vec<TrackedObject>>,
    index: HashMap<Entity, (ObjectRole, usize)>,
    outline_groups: HashMap<CameraZone, Entity>,
    revision: u64,
}

impl SceneRegistry {
    /// Publish a whole sub-scene. Rejected when a scene with that name already exists.
    pub fn publish(&mut self, contribution: SubSceneContribution) -> bool {
        if self.scene(&contribution.entry.name).is_some() {
            return false;
        }
        self.scenes.push(contribution.entry);
        for (role, object) in contribution.objects {
            let list = self.roles.entry(role).or_default();
            self.index.insert(object.entity, (role, list.len()));
            list.push(object);
        }
        self.revision += 1;
        true
    }

    pub fn scenes(&self) -> &[SceneEntry] {
        &self.scenes
    }

    pub fn scene(&self, name: &str) -> Option<&SceneEntry> {
        self.scenes.iter().find(|scene| scene.name == name)
    }

    pub fn objects(&self, role: ObjectRole) -> &[TrackedObject] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn object_named(&self, role: ObjectRole, name: &str) -> Option<&TrackedObject> {
        self.objects(role).iter().find(|object| object.name == name)
    }

    /// Role and handle of a tracked node entity.
    pub fn tracked(&self, entity: Entity) -> Option<(ObjectRole, &TrackedObject)> {
        let (role, position) = *self.index.get(&entity)?;
        Some((role, self.roles.get(&role)?.get(position)?))
    }

    pub fn meshes_of(&self, entity: Entity) -> &[Entity] {
        self.tracked(entity)
            .map(|(_, object)| object.meshes.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_outline_group(&mut self, zone: CameraZone, group: Entity) {
        self.outline_groups.insert(zone, group);
        self.revision += 1;
    }

    pub fn outline_groups(&self) -> impl Iterator<Item = (CameraZone, Entity)> + '_ {
        self.outline_groups.iter().map(|(zone, group)| (*zone, *group))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Forget everything; used when the session is re-created.
    pub fn clear(&mut self) {
        self.scenes.clear();
        self.roles.clear();
        self.index.clear();
        self.outline_groups.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(id: u32, name: &str) -> TrackedObject {
        TrackedObject {
            entity: Entity::from_raw(id),
            name: name.to_string(),
            meshes: vec![Entity::from_raw(id + 100)],
        }
    }

    fn contribution(scene: &str, root: u32, objects: Vec<(ObjectRole, TrackedObject)>) -> SubSceneContribution {
        SubSceneContribution {
            entry: SceneEntry {
                name: scene.to_string(),
                root: Entity::from_raw(root),
            },
            objects,
        }
    }

    #[test]
    fn publishes_objects_by_role_in_order() {
        let mut registry = SceneRegistry::default();
        assert!(registry.publish(contribution(
            "nature-scene",
            1,
            vec![
                (ObjectRole::Leaves, object(2, "leaves1")),
                (ObjectRole::Leaves, object(3, "leaves2")),
            ],
        )));

        let names: Vec<_> = registry
            .objects(ObjectRole::Leaves)
            .iter()
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(names, ["leaves1", "leaves2"]);
        assert!(registry.objects(ObjectRole::TreeContent).is_empty());

        let (role, tracked) = registry.tracked(Entity::from_raw(3)).unwrap();
        assert_eq!(role, ObjectRole::Leaves);
        assert_eq!(tracked.name, "leaves2");
        assert_eq!(registry.meshes_of(Entity::from_raw(3)), [Entity::from_raw(103)]);
    }

    #[test]
    fn duplicate_scene_names_are_rejected_whole() {
        let mut registry = SceneRegistry::default();
        registry.publish(contribution("nature-scene", 1, vec![]));
        let revision = registry.revision();

        let accepted = registry.publish(contribution(
            "nature-scene",
            5,
            vec![(ObjectRole::Leaves, object(6, "leaves1"))],
        ));
        assert!(!accepted);
        assert_eq!(registry.revision(), revision);
        assert!(registry.objects(ObjectRole::Leaves).is_empty());
        assert_eq!(registry.scene("nature-scene").unwrap().root, Entity::from_raw(1));
    }

    #[test]
    fn revision_tracks_membership_only() {
        let mut registry = SceneRegistry::default();
        let before = registry.revision();
        let _ = registry.objects(ObjectRole::Leaves);
        let _ = registry.scene("missing");
        assert_eq!(registry.revision(), before);

        registry.publish(contribution("a", 1, vec![]));
        assert_eq!(registry.revision(), before + 1);

        registry.clear();
        assert!(registry.scenes().is_empty());
        assert!(registry.tracked(Entity::from_raw(2)).is_none());
    }
}
