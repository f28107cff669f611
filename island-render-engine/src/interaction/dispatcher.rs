use bevy::picking::mesh_picking::ray_cast::MeshRayCast;
use bevy::prelude::*;
use bevy::render::primitives::{Aabb, Frustum};

use crate::engine::camera::camera_switch::{CameraSwitched, SceneCamera};
use crate::engine::scene::camera_registry::CameraRegistry;
use crate::engine::scene::registry::SceneRegistry;
use crate::engine::scene::selection::SelectionState;
use crate::interaction::click::{ClickAction, route_click};
use crate::interaction::effects::PendingEffects;
use crate::interaction::hit_test::{CandidateCache, Hit, gather_candidates, nearest_mesh_hit};
use crate::interaction::hover::{HoverState, HoverTarget};
use crate::interaction::links::OpenLinkRequest;
use crate::interaction::pointer::PointerState;
use crate::interaction::ray::PointerRay;
use crate::interaction::settings::InteractionSettings;
use crate::interaction::tree_content::TreeContentToggle;

/// Nearest tracked object along `ray`.
fn pick(
    ray: Option<Ray3d>,
    frustum: &Query<Option<&Frustum>, With<SceneCamera>>,
    cache: &CandidateCache,
    volumes: &Query<(&GlobalTransform, &Aabb)>,
    ray_cast: &mut MeshRayCast,
    settings: &InteractionSettings,
) -> Option<Hit> {
    let ray = ray?;
    let frustum = frustum
        .single()
        .ok()
        .flatten()
        .filter(|_| settings.frustum_prefilter);
    let candidates = gather_candidates(cache, volumes, frustum);
    nearest_mesh_hit(ray, cache, &candidates, ray_cast)
}

/// Throttled hover test: pick, run the hover transition, queue its effects.
#[allow(clippy::too_many_arguments)]
pub fn hover_tick(
    time: Res<Time>,
    settings: Res<InteractionSettings>,
    mut pointer: ResMut<PointerState>,
    cameras: Res<CameraRegistry>,
    registry: Res<SceneRegistry>,
    mut cache: ResMut<CandidateCache>,
    pointer_ray: Res<PointerRay>,
    frustum: Query<Option<&Frustum>, With<SceneCamera>>,
    volumes: Query<(&GlobalTransform, &Aabb)>,
    mut ray_cast: MeshRayCast,
    transforms: Query<&Transform>,
    mut hover: ResMut<HoverState>,
    mut effects: ResMut<PendingEffects>,
) {
    if cache.refresh(&registry) {
        pointer.force_next_test();
    }
    // A pending forced retest carries over until the camera settles.
    let Some(ray) = pointer_ray.pickable() else {
        return;
    };
    let now = time.elapsed_secs_f64();
    if !pointer.should_test(now, &settings) {
        return;
    }
    pointer.mark_tested(now);

    let hit = pick(ray, &frustum, &cache, &volumes, &mut ray_cast, &settings);
    let target = hit.and_then(|hit| {
        let (_, object) = registry.tracked(hit.object)?;
        Some(HoverTarget {
            object: hit.object,
            name: &object.name,
            scale: transforms.get(hit.object).ok()?.scale,
        })
    });
    effects.extend(hover.transition(cameras.zone(), target, &settings));
}

/// Primary clicks outside the UI, routed by zone and nearest hit.
#[allow(clippy::too_many_arguments)]
pub fn handle_world_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    ui: Query<&Interaction>,
    settings: Res<InteractionSettings>,
    pointer_ray: Res<PointerRay>,
    cameras: Res<CameraRegistry>,
    registry: Res<SceneRegistry>,
    cache: Res<CandidateCache>,
    frustum: Query<Option<&Frustum>, With<SceneCamera>>,
    volumes: Query<(&GlobalTransform, &Aabb)>,
    mut ray_cast: MeshRayCast,
    selection: Res<SelectionState>,
    mut toggles: EventWriter<TreeContentToggle>,
    mut links: EventWriter<OpenLinkRequest>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if ui.iter().any(|interaction| *interaction != Interaction::None) {
        return;
    }
    let Some(ray) = pointer_ray.pickable() else {
        return;
    };

    let hit = pick(ray, &frustum, &cache, &volumes, &mut ray_cast, &settings);
    let name = hit
        .and_then(|hit| registry.tracked(hit.object))
        .map(|(_, object)| object.name.as_str());

    match route_click(cameras.zone(), name, &selection) {
        ClickAction::ShowTreeContent(slot) => {
            toggles.write(TreeContentToggle::Show(slot));
        }
        ClickAction::HideTreeContent => {
            toggles.write(TreeContentToggle::Hide);
        }
        ClickAction::OpenLink { url, target } => {
            links.write(OpenLinkRequest {
                url: url.to_string(),
                target,
            });
        }
        ClickAction::Nothing => {}
    }
}

/// A camera switch clears the tree selection and any hover, then retests.
pub fn reset_on_camera_switch(
    mut switched: EventReader<CameraSwitched>,
    mut hover: ResMut<HoverState>,
    mut effects: ResMut<PendingEffects>,
    mut selection: ResMut<SelectionState>,
    mut toggles: EventWriter<TreeContentToggle>,
    mut pointer: ResMut<PointerState>,
) {
    if switched.read().count() == 0 {
        return;
    }
    effects.extend(hover.clear());
    if selection.tree_contents_visible() || selection.current_tree_content().is_some() {
        selection.clear_tree_content();
        toggles.write(TreeContentToggle::Hide);
    }
    pointer.force_next_test();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::camera_registry::tests::four_cameras;
    use crate::engine::scene::registry::{SceneEntry, SubSceneContribution, TrackedObject};
    use crate::interaction::effects::{
        CursorAffordance, OriginalMaterial, apply_visual_effects,
    };
    use crate::interaction::tree_content::apply_tree_content_toggles;
    use crate::interaction::tree_content::tests::spawn_tree_contents;
    use bevy::render::mesh::MeshAabb;
    use constants::roles::ObjectRole;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 10.0);

    /// Headless dispatcher: the scene camera looks down -Z from `EYE`.
    fn app(camera_index: usize) -> App {
        let mut cameras = four_cameras();
        cameras.set_active_index(camera_index);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<InteractionSettings>()
            .init_resource::<PointerState>()
            .init_resource::<PointerRay>()
            .insert_resource(cameras)
            .init_resource::<SceneRegistry>()
            .init_resource::<CandidateCache>()
            .init_resource::<HoverState>()
            .init_resource::<PendingEffects>()
            .init_resource::<SelectionState>()
            .init_resource::<CursorAffordance>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<CameraSwitched>()
            .add_event::<TreeContentToggle>()
            .add_event::<OpenLinkRequest>()
            .add_systems(
                Update,
                (
                    reset_on_camera_switch,
                    hover_tick,
                    handle_world_clicks,
                    apply_tree_content_toggles,
                    apply_visual_effects,
                )
                    .chain(),
            );
        app.world_mut().spawn((
            SceneCamera,
            GlobalTransform::from_translation(EYE),
            Projection::Perspective(PerspectiveProjection::default()),
        ));
        app
    }

    /// A tracked object at `position` whose own mesh is `shape`, carrying a fresh material.
    fn spawn_shape(
        app: &mut App,
        scene: &str,
        role: ObjectRole,
        name: &str,
        shape: impl Into<Mesh>,
        position: Vec3,
    ) -> (Entity, Handle<StandardMaterial>) {
        let mesh: Mesh = shape.into();
        let aabb = mesh.compute_aabb().unwrap();
        let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(mesh);
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::from(Color::srgb(0.2, 0.4, 0.2)));
        let transform = Transform::from_translation(position);
        let object = app
            .world_mut()
            .spawn((
                transform,
                GlobalTransform::from(transform),
                Mesh3d(mesh),
                aabb,
                OriginalMaterial(material.clone()),
                MeshMaterial3d(material.clone()),
                Visibility::Inherited,
            ))
            .id();
        let root = app.world_mut().spawn_empty().id();
        app.world_mut()
            .resource_mut::<SceneRegistry>()
            .publish(SubSceneContribution {
                entry: SceneEntry {
                    name: scene.to_string(),
                    root,
                },
                objects: vec![(
                    role,
                    TrackedObject {
                        entity: object,
                        name: name.to_string(),
                        meshes: vec![object],
                    },
                )],
            });
        (object, material)
    }

    fn spawn_object(
        app: &mut App,
        scene: &str,
        role: ObjectRole,
        name: &str,
        position: Vec3,
    ) -> (Entity, Handle<StandardMaterial>) {
        spawn_shape(app, scene, role, name, Cuboid::new(1.0, 1.0, 1.0), position)
    }

    /// Aim the pointer ray from the camera through `target`.
    fn aim_at(app: &mut App, target: Vec3) {
        let direction = Dir3::new(target - EYE).unwrap();
        *app.world_mut().resource_mut::<PointerRay>() = PointerRay::Ray(Ray3d::new(EYE, direction));
        app.world_mut().resource_mut::<PointerState>().ndc = target.truncate() / 10.0;
    }

    fn hovered(app: &App) -> Option<Entity> {
        app.world()
            .resource::<HoverState>()
            .hovered()
            .map(|hovered| hovered.object)
    }

    fn click(app: &mut App) {
        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.release(MouseButton::Left);
        buttons.clear();
        buttons.press(MouseButton::Left);
        app.update();
        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.release(MouseButton::Left);
        buttons.clear();
    }

    #[test]
    fn hover_picks_nearest_and_restores_exactly() {
        let mut app = app(0);
        let (far, _) = spawn_object(
            &mut app,
            "far",
            ObjectRole::WorkshopContent,
            "BlueprintContent2",
            Vec3::new(0.0, 0.0, -3.0),
        );
        let (near, near_material) = spawn_object(
            &mut app,
            "near",
            ObjectRole::WorkshopContent,
            "BlueprintContent3",
            Vec3::ZERO,
        );

        aim_at(&mut app, Vec3::ZERO);
        app.update();

        let world = app.world();
        assert_eq!(hovered(&app), Some(near));
        assert_eq!(
            world.resource::<SelectionState>().hovered_workshop_content(),
            Some("BlueprintContent3")
        );
        assert_eq!(world.get::<Transform>(near).unwrap().scale, Vec3::splat(1.02));
        assert_ne!(world.get::<MeshMaterial3d<StandardMaterial>>(near).unwrap().0, near_material);
        assert_eq!(world.get::<Transform>(far).unwrap().scale, Vec3::ONE);
        assert_eq!(*world.resource::<CursorAffordance>(), CursorAffordance::Interactive);

        // Move off every object, past the test interval.
        std::thread::sleep(std::time::Duration::from_millis(20));
        aim_at(&mut app, Vec3::new(5.0, 5.0, 0.0));
        app.update();

        let world = app.world();
        assert_eq!(hovered(&app), None);
        assert_eq!(world.resource::<SelectionState>().hovered_workshop_content(), None);
        assert_eq!(world.get::<Transform>(near).unwrap().scale, Vec3::ONE);
        assert_eq!(world.get::<MeshMaterial3d<StandardMaterial>>(near).unwrap().0, near_material);
        assert_eq!(*world.resource::<CursorAffordance>(), CursorAffordance::Default);
    }

    #[test]
    fn sphere_is_hit_on_its_surface_not_its_bounding_box() {
        let mut app = app(3);
        let (leaves, _) = spawn_shape(
            &mut app,
            "nature-scene",
            ObjectRole::Leaves,
            "leaves2",
            Sphere::new(0.5),
            Vec3::ZERO,
        );

        // Inside the box corner, outside the sphere.
        aim_at(&mut app, Vec3::new(0.45, 0.45, 0.0));
        app.update();
        assert_eq!(hovered(&app), None);

        std::thread::sleep(std::time::Duration::from_millis(20));
        aim_at(&mut app, Vec3::ZERO);
        app.update();
        assert_eq!(hovered(&app), Some(leaves));
    }

    #[test]
    fn mesh_in_a_larger_box_corner_still_wins() {
        let mut app = app(3);
        spawn_shape(
            &mut app,
            "nature-scene",
            ObjectRole::Leaves,
            "leaves1",
            Sphere::new(0.5),
            Vec3::ZERO,
        );
        let corner = Vec3::new(0.45, 0.45, -0.3);
        let (small, _) = spawn_shape(
            &mut app,
            "nature-scene-2",
            ObjectRole::Leaves,
            "leaves2",
            Cuboid::new(0.1, 0.1, 0.1),
            corner,
        );

        aim_at(&mut app, corner);
        app.update();
        assert_eq!(hovered(&app), Some(small));
    }

    #[test]
    fn settling_camera_defers_the_forced_retest() {
        let mut app = app(3);
        let (leaves, _) =
            spawn_object(&mut app, "nature-scene", ObjectRole::Leaves, "leaves1", Vec3::ZERO);

        app.update();
        assert_eq!(hovered(&app), None);

        // The pointer did not move; the pending retest still runs once the ray is known.
        *app.world_mut().resource_mut::<PointerRay>() =
            PointerRay::Ray(Ray3d::new(EYE, Dir3::NEG_Z));
        app.update();
        assert_eq!(hovered(&app), Some(leaves));
    }

    #[test]
    fn clicking_leaves_toggles_their_panel() {
        let mut app = app(3);
        let (root, panels) = spawn_tree_contents(&mut app);
        spawn_object(&mut app, "nature-scene", ObjectRole::Leaves, "leaves2", Vec3::ZERO);
        aim_at(&mut app, Vec3::ZERO);

        click(&mut app);
        assert_eq!(
            app.world().resource::<SelectionState>().shown_tree_content(),
            Some(2)
        );
        assert_eq!(app.world().get::<Visibility>(root), Some(&Visibility::Inherited));
        assert_eq!(app.world().get::<Visibility>(panels[1]), Some(&Visibility::Inherited));
        assert_eq!(app.world().get::<Visibility>(panels[0]), Some(&Visibility::Hidden));

        click(&mut app);
        let selection = app.world().resource::<SelectionState>();
        assert_eq!(selection.current_tree_content(), None);
        assert_eq!(app.world().get::<Visibility>(root), Some(&Visibility::Hidden));
    }

    #[test]
    fn clicking_contact_icon_requests_mailto() {
        #[derive(Resource, Default)]
        struct Opened(Vec<OpenLinkRequest>);

        let mut app = app(2);
        app.init_resource::<Opened>().add_systems(
            Update,
            (|mut requests: EventReader<OpenLinkRequest>, mut opened: ResMut<Opened>| {
                opened.0.extend(requests.read().cloned());
            })
            .after(handle_world_clicks),
        );
        spawn_object(
            &mut app,
            "contactContents-scene",
            ObjectRole::ContactContent,
            "ContactContent4",
            Vec3::ZERO,
        );
        aim_at(&mut app, Vec3::ZERO);
        click(&mut app);

        let opened = &app.world().resource::<Opened>().0;
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].url, "mailto:pawel.matuszak2@icloud.com");
    }

    #[test]
    fn camera_switch_clears_selection_and_hover() {
        let mut app = app(3);
        spawn_tree_contents(&mut app);
        let (leaves, material) =
            spawn_object(&mut app, "nature-scene", ObjectRole::Leaves, "leaves1", Vec3::ZERO);
        aim_at(&mut app, Vec3::ZERO);
        click(&mut app);
        assert!(hovered(&app).is_some());
        assert!(app.world().resource::<SelectionState>().tree_contents_visible());

        app.world_mut()
            .resource_mut::<CameraRegistry>()
            .set_active_index(1);
        app.world_mut().send_event(CameraSwitched {
            previous: Some(3),
            index: 1,
        });
        app.update();

        let world = app.world();
        assert_eq!(*world.resource::<SelectionState>(), SelectionState::default());
        assert!(world.resource::<HoverState>().hovered().is_none());
        assert_eq!(world.get::<MeshMaterial3d<StandardMaterial>>(leaves).unwrap().0, material);
    }
}
