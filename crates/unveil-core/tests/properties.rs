//! Property tests for visibility queries and selective reveal.

use proptest::prelude::*;

use unveil_core::{
    Group, ObjectKind, Scene, SceneObject, Selector, Session, list_hidden_containers,
    list_hidden_entities, list_hidden_types, reveal,
};

const KINDS: [ObjectKind; 4] = [
    ObjectKind::Mesh,
    ObjectKind::Lamp,
    ObjectKind::Camera,
    ObjectKind::Empty,
];

/// Objects as (hidden, kind index); groups as member indices into objects.
fn scene_strategy() -> impl Strategy<Value = Scene> {
    prop::collection::vec((any::<bool>(), 0..KINDS.len()), 1..12).prop_flat_map(|objects| {
        let n = objects.len();
        let groups = prop::collection::vec(prop::collection::vec(0..n, 0..5), 0..5);
        (Just(objects), groups).prop_map(|(objects, groups)| build_scene(&objects, &groups))
    })
}

fn build_scene(objects: &[(bool, usize)], groups: &[Vec<usize>]) -> Scene {
    let mut scene = Scene::new("Generated");
    for (i, &(hidden, kind)) in objects.iter().enumerate() {
        let mut object = SceneObject::new(format!("obj{i}"), KINDS[kind].clone());
        object.hidden = hidden;
        scene.add_object(object).unwrap();
    }
    for (g, members) in groups.iter().enumerate() {
        let group = members
            .iter()
            .fold(Group::new(format!("group{g}")), |group, &m| {
                group.with_member(format!("obj{m}"))
            });
        scene.add_group(group).unwrap();
    }
    scene
}

fn flags(scene: &Scene) -> Vec<(String, bool, bool)> {
    scene
        .objects()
        .iter()
        .map(|o| (o.name.clone(), o.hidden, o.selected))
        .collect()
}

proptest! {
    #[test]
    fn hidden_entities_are_exactly_the_hidden_objects(scene in scene_strategy()) {
        let listed: Vec<&str> = list_hidden_entities(&scene, &Session::object_mode())
            .unwrap()
            .iter()
            .map(|e| e.name())
            .collect();
        let expected: Vec<&str> = scene
            .objects()
            .iter()
            .filter(|o| o.hidden)
            .map(|o| o.name.as_str())
            .collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn group_listed_iff_a_member_is_hidden(scene in scene_strategy()) {
        let listed: Vec<String> = list_hidden_containers(&scene, &Session::object_mode())
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        for group in scene.groups() {
            let any_hidden = group
                .objects
                .iter()
                .any(|m| scene.object(m).is_some_and(|o| o.hidden));
            prop_assert_eq!(listed.contains(&group.name), any_hidden);
        }
    }

    #[test]
    fn group_reveal_leaves_non_members_alone(mut scene in scene_strategy()) {
        prop_assume!(!scene.groups().is_empty());
        let group = scene.groups()[0].clone();
        let before = flags(&scene);

        reveal(&mut scene, &Session::object_mode(), &Selector::group(&group.name)).unwrap();

        for (old, object) in before.iter().zip(scene.objects()) {
            if group.contains(&object.name) {
                prop_assert!(!object.hidden);
            } else {
                prop_assert_eq!(old, &(object.name.clone(), object.hidden, object.selected));
            }
        }
        let still_listed = list_hidden_containers(&scene, &Session::object_mode())
            .unwrap()
            .iter()
            .any(|c| c.name() == group.name);
        prop_assert!(!still_listed);
    }

    #[test]
    fn reveal_by_type_removes_the_type(mut scene in scene_strategy(), kind in 0..KINDS.len()) {
        let kind = KINDS[kind].clone();
        let session = Session::object_mode();
        let targets: Vec<String> = scene
            .objects()
            .iter()
            .filter(|o| o.hidden && o.kind == kind)
            .map(|o| o.name.clone())
            .collect();

        reveal(&mut scene, &session, &Selector::all_of_type(kind.clone())).unwrap();

        prop_assert!(!list_hidden_types(&scene, &session).unwrap().contains(&kind));
        for name in &targets {
            prop_assert!(!scene.object(name).unwrap().hidden);
        }
    }

    #[test]
    fn single_object_reveal_twice_equals_once(mut scene in scene_strategy(), pick in any::<prop::sample::Index>()) {
        let name = scene.objects()[pick.index(scene.object_count())].name.clone();
        let session = Session::object_mode();
        let selector = Selector::object(&name);

        reveal(&mut scene, &session, &selector).unwrap();
        let once = flags(&scene);
        reveal(&mut scene, &session, &selector).unwrap();

        prop_assert_eq!(flags(&scene), once);
        prop_assert_eq!(scene.active_object(), Some(name.as_str()));
    }
}
