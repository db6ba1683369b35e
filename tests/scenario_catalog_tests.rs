use microscope_sim::catalog::{Scenario, ScenarioCatalog};
use microscope_sim::core::{InitialOptics, OpticalField};
use microscope_sim::quiz::{AnnotationKind, AnnotationTemplate, Feedback};
use microscope_sim::state::{ImageSelection, SessionState};

#[test]
fn normal_blood_activation_sets_optics_and_quiz() {
    let catalog = ScenarioCatalog::builtin();
    let mut state = SessionState::default();
    state.optics.set_field(OpticalField::FineFocus, 1.5);
    state.optics.set_pan(120.0, -40.0);
    state.select_custom_image("old.png");

    let activation = catalog
        .activate("normal_blood", &mut state)
        .expect("builtin scenario");

    let ids: Vec<u32> = state.annotations.all().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(
        state
            .annotations
            .all()
            .iter()
            .all(|a| a.feedback == Feedback::Unanswered && a.user_answer.is_empty())
    );
    assert_eq!(state.optics.zoom(), 1.0);
    assert_eq!(state.optics.coarse_focus(), 2.0);
    assert_eq!(state.optics.fine_focus(), 0.0);
    assert_eq!(state.optics.brightness(), 1.0);
    assert_eq!(state.optics.pan(), (0.0, 0.0));
    assert_eq!(state.active_scenario_id.as_deref(), Some("normal_blood"));
    assert_eq!(state.custom_image_name, None);
    assert_eq!(
        state.image_selection(),
        ImageSelection::Scenario("normal_blood".to_owned())
    );

    assert_eq!(activation.scenario_id, "normal_blood");
    assert_eq!(
        activation.suggested_tutorial.as_deref(),
        Some("basic_identification_tutorial")
    );
    assert!(!activation.description.is_empty());
}

#[test]
fn iron_deficiency_activation_uses_its_overrides() {
    let catalog = ScenarioCatalog::builtin();
    let mut state = SessionState::default();

    let activation = catalog
        .activate("iron_deficiency_anemia", &mut state)
        .expect("builtin scenario");

    assert_eq!(state.annotations.len(), 2);
    assert_eq!(state.optics.zoom(), 2.0);
    assert_eq!(state.optics.coarse_focus(), 4.0);
    assert_eq!(state.optics.brightness(), 1.1);
    assert_eq!(state.optics.derive_visual_parameters().blur_radius, 0.0);
    assert_eq!(activation.suggested_tutorial, None);
}

#[test]
fn unknown_scenario_leaves_state_untouched() {
    let catalog = ScenarioCatalog::builtin();
    let mut state = SessionState::default();
    catalog
        .activate("normal_blood", &mut state)
        .expect("builtin scenario");
    state.annotations.submit(0, "Neutrophil");
    let before = state.clone();

    assert!(catalog.activate("does_not_exist", &mut state).is_none());
    assert_eq!(state, before);
}

#[test]
fn catalog_iterates_in_registration_order() {
    let catalog = ScenarioCatalog::builtin();
    let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["normal_blood", "iron_deficiency_anemia"]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn templates_without_ids_are_numbered_after_explicit_ones() {
    let mut catalog = ScenarioCatalog::default();
    let template = |id: Option<u32>| AnnotationTemplate {
        id,
        x_percent: 50.0,
        y_percent: 50.0,
        question: "Identify".to_owned(),
        correct_answer: Some("Eosinophil".to_owned()),
        kind: AnnotationKind::Identification,
    };
    catalog
        .register(Scenario {
            id: "eosinophilia".to_owned(),
            name: "Eosinophilia".to_owned(),
            image_ref: "images/eos.jpg".to_owned(),
            description: String::new(),
            initial_optics: InitialOptics {
                zoom: Some(4.0),
                ..InitialOptics::default()
            },
            annotations: vec![template(None), template(Some(5)), template(None)],
            linked_tutorial_id: None,
        })
        .expect("register");

    let mut state = SessionState::default();
    catalog
        .activate("eosinophilia", &mut state)
        .expect("registered scenario");

    let ids: Vec<u32> = state.annotations.all().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![6, 5, 7]);
    assert_eq!(state.optics.coarse_focus(), 8.0);
}

#[test]
fn duplicate_scenario_ids_are_rejected() {
    let mut catalog = ScenarioCatalog::builtin();
    let duplicate = catalog
        .get("normal_blood")
        .cloned()
        .expect("builtin scenario");
    assert!(catalog.register(duplicate).is_err());
    assert_eq!(catalog.len(), 2);
}
