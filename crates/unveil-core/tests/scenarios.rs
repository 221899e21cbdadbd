//! End-to-end reveal scenarios over small hand-built scenes.

use unveil_core::{
    Armature, Bone, BoneGroup, Group, KindTag, ObjectKind, Pipeline, Scene, SceneObject, Selector,
    Session, UnveilError, VisibilityIndex, list_hidden_containers, list_hidden_entities,
    list_hidden_types, list_search_catalogue, reveal,
};

fn container_names(scene: &Scene, session: &Session) -> Vec<String> {
    list_hidden_containers(scene, session)
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

fn lamp_and_cube() -> Scene {
    let mut scene = Scene::new("Scenario A");
    scene
        .add_object(SceneObject::hidden("Cube", ObjectKind::Mesh))
        .unwrap();
    scene
        .add_object(SceneObject::hidden("Lamp", ObjectKind::Lamp))
        .unwrap();
    scene
        .add_group(Group::new("G1").with_member("Cube").with_member("Lamp"))
        .unwrap();
    scene.add_group(Group::new("G2").with_member("Lamp")).unwrap();
    scene
}

#[test]
fn revealing_a_group_empties_overlapping_groups() {
    let mut scene = lamp_and_cube();
    let session = Session::object_mode();
    assert_eq!(container_names(&scene, &session), vec!["G1", "G2"]);

    reveal(&mut scene, &session, &Selector::group("G1")).unwrap();

    assert!(!scene.object("Cube").unwrap().hidden);
    assert!(!scene.object("Lamp").unwrap().hidden);
    assert!(container_names(&scene, &session).is_empty());
}

#[test]
fn revealing_a_bone_group_leaves_ungrouped_bones_hidden() {
    let mut scene = Scene::new("Scenario B");
    scene
        .add_armature(
            Armature::new("Arm")
                .with_bone_group(BoneGroup::new("BG1"))
                .unwrap()
                .with_bone(Bone::new("b1").hide().in_group("BG1"))
                .unwrap()
                .with_bone(Bone::new("b2").hide())
                .unwrap(),
        )
        .unwrap();
    let session = Session::edit_armature("Arm");
    assert_eq!(container_names(&scene, &session), vec!["BG1"]);

    reveal(&mut scene, &session, &Selector::bone_group("Arm", "BG1")).unwrap();

    let arm = scene.armature("Arm").unwrap();
    assert!(!arm.bone("b1").unwrap().hidden);
    assert!(arm.bone("b2").unwrap().hidden);
    assert!(container_names(&scene, &session).is_empty());
}

#[test]
fn revealing_a_missing_object_changes_nothing() {
    let mut scene = lamp_and_cube();
    let before: Vec<SceneObject> = scene.objects().to_vec();

    let err = reveal(&mut scene, &Session::object_mode(), &Selector::object("Ghost")).unwrap_err();

    assert!(matches!(err, UnveilError::NotFound { what: "object", .. }));
    assert_eq!(scene.objects(), before.as_slice());
    assert_eq!(scene.active_object(), None);
}

#[test]
fn stale_catalogue_fails_loudly() {
    let mut scene = lamp_and_cube();
    let session = Session::object_mode();
    let catalogue = list_search_catalogue(&scene, &session).unwrap();

    scene.remove_object("Cube").unwrap();
    scene.rename_object("Lamp", "Sun").unwrap();

    for id in ["Cube", "Lamp"] {
        let selector = catalogue.selector_for(id).unwrap();
        let err = reveal(&mut scene, &session, &selector).unwrap_err();
        assert!(err.is_not_found(), "{id}");
    }
    assert!(scene.object("Sun").unwrap().hidden);
}

#[test]
fn catalogue_collisions_resolve_to_first_entry() {
    let mut scene = Scene::new("Collision");
    scene
        .add_object(SceneObject::hidden("Props", ObjectKind::Empty))
        .unwrap();
    scene
        .add_object(SceneObject::hidden("Chair", ObjectKind::Mesh))
        .unwrap();
    scene
        .add_group(Group::new("Props").with_member("Chair"))
        .unwrap();
    let session = Session::object_mode();
    let catalogue = list_search_catalogue(&scene, &session).unwrap();

    assert_eq!(catalogue.matches("Props").count(), 2);
    assert_eq!(catalogue.lookup("Props").unwrap().kind, KindTag::Object);

    let selector = catalogue.selector_for("Props").unwrap();
    reveal(&mut scene, &session, &selector).unwrap();
    assert!(!scene.object("Props").unwrap().hidden);
    assert!(scene.object("Chair").unwrap().hidden);

    assert!(matches!(
        catalogue.selector_for("Table"),
        Err(UnveilError::AmbiguousKind { .. })
    ));
}

#[test]
fn revealing_by_type_shrinks_groups() {
    let mut scene = lamp_and_cube();
    let session = Session::object_mode();
    reveal(&mut scene, &session, &Selector::all_of_type(ObjectKind::Mesh)).unwrap();

    assert_eq!(
        list_hidden_types(&scene, &session).unwrap(),
        vec![ObjectKind::Lamp]
    );
    // G1 still holds the hidden Lamp.
    assert_eq!(container_names(&scene, &session), vec!["G1", "G2"]);

    reveal(&mut scene, &session, &Selector::all_of_type(ObjectKind::Lamp)).unwrap();
    assert!(container_names(&scene, &session).is_empty());
    assert!(list_hidden_types(&scene, &session).unwrap().is_empty());
}

#[test]
fn single_object_reveal_is_idempotent() {
    let mut scene = lamp_and_cube();
    let session = Session::object_mode();
    let selector = Selector::object("Lamp");

    reveal(&mut scene, &session, &selector).unwrap();
    let once: Vec<SceneObject> = scene.objects().to_vec();
    let report = reveal(&mut scene, &session, &selector).unwrap();

    assert!(report.is_noop());
    assert_eq!(scene.objects(), once.as_slice());
    assert_eq!(scene.active_object(), Some("Lamp"));
}

#[test]
fn bone_search_drives_bone_reveal() {
    let json = r#"{
        "name": "Rigging",
        "objects": [{ "name": "Rig", "kind": "ARMATURE" }],
        "armatures": [{
            "name": "Rig",
            "bone_groups": [{ "name": "Fingers" }],
            "bones": [
                { "name": "finger.01", "hidden": true, "bone_group": "Fingers" },
                { "name": "finger.02", "hidden": true, "bone_group": "Fingers" },
                { "name": "hand", "hidden": true }
            ]
        }]
    }"#;
    let mut scene = Scene::from_json(json).unwrap();
    let session = Session::edit_armature("Rig");

    let catalogue = list_search_catalogue(&scene, &session).unwrap();
    let hits: Vec<(&str, KindTag)> = catalogue
        .search("finger", &Default::default())
        .iter()
        .map(|e| (e.id.as_str(), e.kind))
        .collect();
    assert_eq!(
        hits,
        vec![
            ("finger.01", KindTag::Bone),
            ("finger.02", KindTag::Bone),
            ("Fingers", KindTag::BoneGroup),
        ]
    );

    let selector = catalogue.selector_for("hand").unwrap();
    let report = reveal(&mut scene, &session, &selector).unwrap();
    assert_eq!(report.active.as_deref(), Some("hand"));

    let hidden: Vec<&str> = list_hidden_entities(&scene, &session)
        .unwrap()
        .iter()
        .map(|e| e.name())
        .collect();
    assert_eq!(hidden, vec!["finger.01", "finger.02"]);
    assert_eq!(
        scene.armature("Rig").unwrap().active_bone(),
        Some("hand")
    );
}

#[test]
fn reveal_all_clears_every_hidden_object() {
    let mut scene = lamp_and_cube();
    let session = Session::object_mode();
    let index = VisibilityIndex::new(&scene, &session).unwrap();
    assert_eq!(index.hidden_entities().len(), 2);

    reveal(&mut scene, &session, &Selector::RevealAll).unwrap();

    assert!(VisibilityIndex::new(&scene, &session).unwrap().is_empty());
    assert!(scene.objects().iter().all(|o| o.selected));
}
