use std::collections::{HashMap, HashSet};

use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::render::primitives::{Aabb, Frustum};
use constants::roles::ObjectRole;

use crate::engine::scene::registry::SceneRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub object: Entity,
    pub distance: f32,
}

/// Meshes of every hit-tested role and the tracked object each resolves to,
/// rebuilt only when registry membership changes.
#[derive(Resource, Default, Debug)]
pub struct CandidateCache {
    revision: Option<u64>,
    mesh_to_object: HashMap<Entity, Entity>,
}

impl CandidateCache {
    pub fn refresh(&mut self, registry: &SceneRegistry) -> bool {
        if self.revision == Some(registry.revision()) {
            return false;
        }
        self.mesh_to_object = ObjectRole::HIT_TESTED
            .iter()
            .flat_map(|role| registry.objects(*role))
            .flat_map(|object| object.meshes.iter().map(|mesh| (*mesh, object.entity)))
            .collect();
        self.revision = Some(registry.revision());
        true
    }

    pub fn object_of(&self, mesh: Entity) -> Option<Entity> {
        self.mesh_to_object.get(&mesh).copied()
    }

    pub fn meshes(&self) -> impl Iterator<Item = Entity> + '_ {
        self.mesh_to_object.keys().copied()
    }
}

/// Candidate meshes for this frame, optionally restricted to what the camera frustum contains.
pub fn gather_candidates(
    cache: &CandidateCache,
    volumes: &Query<(&GlobalTransform, &Aabb)>,
    frustum: Option<&Frustum>,
) -> HashSet<Entity> {
    cache
        .meshes()
        .filter(|mesh| {
            let Some(frustum) = frustum else {
                return true;
            };
            volumes.get(*mesh).is_ok_and(|(global, aabb)| {
                frustum.intersects_obb(aabb, &global.affine(), true, false)
            })
        })
        .collect()
}

/// Nearest triangle hit among `candidates`, resolved to its tracked object.
///
/// Hidden meshes stay pickable, so panels and icons shown only on hover or
/// reveal can still be found.
pub fn nearest_mesh_hit(
    ray: Ray3d,
    cache: &CandidateCache,
    candidates: &HashSet<Entity>,
    ray_cast: &mut MeshRayCast,
) -> Option<Hit> {
    if candidates.is_empty() {
        return None;
    }
    let filter = |mesh: Entity| candidates.contains(&mesh);
    let settings = MeshRayCastSettings::default()
        .with_visibility(RayCastVisibility::Any)
        .with_filter(&filter);

    let (mesh, hit) = ray_cast.cast_ray(ray, &settings).first()?;
    Some(Hit {
        object: cache.object_of(*mesh)?,
        distance: hit.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::registry::{SceneEntry, SubSceneContribution, TrackedObject};
    use bevy::render::camera::CameraProjection;

    #[test]
    fn cache_follows_registry_revision() {
        let mut registry = SceneRegistry::default();
        let mut cache = CandidateCache::default();
        assert!(cache.refresh(&registry));
        assert!(!cache.refresh(&registry));

        registry.publish(SubSceneContribution {
            entry: SceneEntry {
                name: "nature-scene".into(),
                root: Entity::from_raw(1),
            },
            objects: vec![
                (
                    ObjectRole::Leaves,
                    TrackedObject {
                        entity: Entity::from_raw(2),
                        name: "leaves1".into(),
                        meshes: vec![Entity::from_raw(3), Entity::from_raw(4)],
                    },
                ),
                (
                    ObjectRole::Buildings,
                    TrackedObject {
                        entity: Entity::from_raw(5),
                        name: "House".into(),
                        meshes: vec![Entity::from_raw(6)],
                    },
                ),
            ],
        });
        assert!(cache.refresh(&registry));
        assert_eq!(cache.object_of(Entity::from_raw(3)), Some(Entity::from_raw(2)));
        assert_eq!(cache.object_of(Entity::from_raw(4)), Some(Entity::from_raw(2)));
        assert_eq!(cache.object_of(Entity::from_raw(6)), None);
        assert_eq!(cache.meshes().count(), 2);
    }

    #[test]
    fn frustum_drops_meshes_behind_the_camera() {
        #[derive(Resource, Default)]
        struct Gathered(HashSet<Entity>);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins).init_resource::<Gathered>();
        let aabb = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        let ahead = app
            .world_mut()
            .spawn((GlobalTransform::from_xyz(0.0, 0.0, -5.0), aabb))
            .id();
        let behind = app
            .world_mut()
            .spawn((GlobalTransform::from_xyz(0.0, 0.0, 5.0), aabb))
            .id();

        let mut registry = SceneRegistry::default();
        registry.publish(SubSceneContribution {
            entry: SceneEntry {
                name: "nature-scene".into(),
                root: Entity::from_raw(100),
            },
            objects: vec![(
                ObjectRole::Leaves,
                TrackedObject {
                    entity: Entity::from_raw(101),
                    name: "leaves1".into(),
                    meshes: vec![ahead, behind],
                },
            )],
        });
        let mut cache = CandidateCache::default();
        cache.refresh(&registry);
        app.insert_resource(cache);

        // Camera at the origin looking down -Z.
        let clip_from_world = PerspectiveProjection::default().get_clip_from_view();
        let frustum = Frustum::from_clip_from_world(&clip_from_world);
        app.add_systems(
            Update,
            move |cache: Res<CandidateCache>,
                  volumes: Query<(&GlobalTransform, &Aabb)>,
                  mut gathered: ResMut<Gathered>| {
                gathered.0 = gather_candidates(&cache, &volumes, Some(&frustum));
            },
        );
        app.update();

        let gathered = &app.world().resource::<Gathered>().0;
        assert!(gathered.contains(&ahead));
        assert!(!gathered.contains(&behind));
    }
}
