use microscope_sim::catalog::{ScenarioCatalog, TutorialCatalog};
use microscope_sim::core::{
    ImageDimensions, Objective, OpticalField, OpticalState, Viewport, image_to_view,
};
use microscope_sim::interaction::ControlKind;
use microscope_sim::interaction::controls::{CONTRAST_SLIDER, objective_button};
use microscope_sim::quiz::AnnotationRegistry;
use microscope_sim::state::SessionState;
use microscope_sim::tutorial::{
    ActionEvent, StageContext, StepCondition, StepDirection, StepTrigger,
    TUTORIAL_COMPLETED_MESSAGE, Tutorial, TutorialRun, TutorialStep, TutorialTransition,
};

fn stage_without_image() -> StageContext {
    StageContext {
        image: None,
        viewport: Viewport::new(500, 500),
        zoom: 1.0,
    }
}

fn started_run(catalog: &TutorialCatalog, id: &str) -> TutorialRun {
    let mut run = TutorialRun::default();
    let transition = run.start(catalog, id, &AnnotationRegistry::default(), stage_without_image());
    assert!(matches!(transition, TutorialTransition::Moved { index: 0, .. }));
    run
}

fn forward(run: &mut TutorialRun, catalog: &TutorialCatalog) -> TutorialTransition {
    run.advance(
        catalog,
        StepDirection::Forward,
        &AnnotationRegistry::default(),
        stage_without_image(),
    )
}

#[test]
fn start_enters_first_step_with_highlight() {
    let catalog = TutorialCatalog::builtin();
    let mut run = TutorialRun::default();

    let transition = run.start(
        &catalog,
        "basic_microscopy_tutorial",
        &AnnotationRegistry::default(),
        stage_without_image(),
    );

    let TutorialTransition::Moved { index, effects } = transition else {
        panic!("expected a move, got {transition:?}");
    };
    assert_eq!(index, 0);
    assert_eq!(
        effects.highlight_target.as_deref(),
        Some(objective_button(Objective::Low).as_str())
    );
    assert_eq!(effects.recenter_pan, None);
    assert!(run.is_active());
    assert_eq!(run.step_index(), Some(0));

    let view = run.view(&catalog).expect("running view");
    assert_eq!(view.step_number, 1);
    assert_eq!(view.step_count, 6);
    assert_eq!(
        view.text,
        "Step 1: Welcome! Let's select an objective. Click 'Low (10x)'."
    );
    assert!(!view.can_go_back);
    assert!(!view.can_go_forward);
}

#[test]
fn builtin_step_texts_keep_the_lab_wording() {
    let catalog = TutorialCatalog::builtin();
    let texts = |id: &str| -> Vec<String> {
        catalog
            .get(id)
            .expect("builtin tutorial")
            .steps
            .iter()
            .map(|step| step.text.clone())
            .collect()
    };

    assert_eq!(
        texts("basic_microscopy_tutorial"),
        vec![
            "Welcome! Let's select an objective. Click 'Low (10x)'.",
            "Good. Now use the large Coarse Focus wheel (drag up/down) to bring the image into approximate focus.",
            "Excellent. Use the smaller Fine Focus wheel for a sharp image.",
            "Adjust the Illumination knob if the image is too dark/bright.",
            "To move around the slide, click and drag the image in the circular view.",
            "Tutorial complete!",
        ]
    );
    assert_eq!(
        texts("basic_identification_tutorial"),
        vec![
            "Pan to annotation point 0 (red circle). What cell is it?",
            "Now find point 1. What are these?",
            "Continue identifying other points.",
        ]
    );
}

#[test]
fn unknown_tutorial_is_ignored() {
    let catalog = TutorialCatalog::builtin();
    let mut run = TutorialRun::default();
    let transition = run.start(
        &catalog,
        "missing",
        &AnnotationRegistry::default(),
        stage_without_image(),
    );
    assert_eq!(transition, TutorialTransition::Ignored);
    assert!(!run.is_active());
    assert_eq!(run.view(&catalog), None);
}

#[test]
fn click_trigger_gates_forward_navigation() {
    let catalog = TutorialCatalog::builtin();
    let mut run = started_run(&catalog, "basic_microscopy_tutorial");
    let optics = OpticalState::default();

    assert_eq!(forward(&mut run, &catalog), TutorialTransition::Blocked);
    assert_eq!(run.step_index(), Some(0));

    assert!(!run.report_action(&catalog, &ActionEvent::click(CONTRAST_SLIDER), &optics));
    assert!(!run.report_action(
        &catalog,
        &ActionEvent::input(objective_button(Objective::Low), 1.0),
        &optics
    ));
    assert!(!run.report_action(
        &catalog,
        &ActionEvent::click(objective_button(Objective::High)),
        &optics
    ));
    assert_eq!(forward(&mut run, &catalog), TutorialTransition::Blocked);

    assert!(run.report_action(
        &catalog,
        &ActionEvent::click(objective_button(Objective::Low)),
        &optics
    ));
    assert!(run.is_step_completed(0));
    let view = run.view(&catalog).expect("view");
    assert!(view.can_go_forward);
    assert_eq!(view.highlight_target, None);

    assert!(matches!(
        forward(&mut run, &catalog),
        TutorialTransition::Moved { index: 1, .. }
    ));
}

#[test]
fn drag_trigger_accepts_any_drag_on_the_bound_field() {
    let catalog = TutorialCatalog::builtin();
    let mut run = started_run(&catalog, "basic_microscopy_tutorial");
    let optics = OpticalState::default();
    run.report_action(
        &catalog,
        &ActionEvent::click(objective_button(Objective::Low)),
        &optics,
    );
    forward(&mut run, &catalog);

    assert!(!run.report_action(
        &catalog,
        &ActionEvent::drag(ControlKind::FineFocus.selector(), OpticalField::FineFocus),
        &optics
    ));
    assert!(run.report_action(
        &catalog,
        &ActionEvent::drag(ControlKind::CoarseFocus.selector(), OpticalField::CoarseFocus),
        &optics
    ));
    assert!(run.is_step_completed(1));
}

#[test]
fn stepping_back_from_first_step_is_ignored() {
    let catalog = TutorialCatalog::builtin();
    let mut run = started_run(&catalog, "basic_identification_tutorial");

    let transition = run.advance(
        &catalog,
        StepDirection::Back,
        &AnnotationRegistry::default(),
        stage_without_image(),
    );
    assert_eq!(transition, TutorialTransition::Ignored);
    assert_eq!(run.step_index(), Some(0));
}

#[test]
fn advancing_past_last_step_completes_and_resets() {
    let catalog = TutorialCatalog::builtin();
    let mut run = started_run(&catalog, "basic_identification_tutorial");

    assert!(matches!(
        forward(&mut run, &catalog),
        TutorialTransition::Moved { index: 1, .. }
    ));
    assert!(matches!(
        forward(&mut run, &catalog),
        TutorialTransition::Moved { index: 2, .. }
    ));
    assert_eq!(
        forward(&mut run, &catalog),
        TutorialTransition::Completed {
            message: TUTORIAL_COMPLETED_MESSAGE.to_owned()
        }
    );
    assert!(!run.is_active());
    assert_eq!(run.tutorial_id(), None);
    assert_eq!(run.step_index(), None);
    assert_eq!(forward(&mut run, &catalog), TutorialTransition::Ignored);
}

#[test]
fn completion_flags_belong_to_the_run() {
    let catalog = TutorialCatalog::builtin();
    let optics = OpticalState::default();
    let mut run = started_run(&catalog, "basic_microscopy_tutorial");
    run.report_action(
        &catalog,
        &ActionEvent::click(objective_button(Objective::Low)),
        &optics,
    );
    assert!(run.is_step_completed(0));

    run.end();
    assert!(!run.is_step_completed(0));

    let mut restarted = started_run(&catalog, "basic_microscopy_tutorial");
    assert!(!restarted.is_step_completed(0));
    assert_eq!(forward(&mut restarted, &catalog), TutorialTransition::Blocked);
}

#[test]
fn identification_steps_recenter_on_annotations() {
    let tutorials = TutorialCatalog::builtin();
    let mut state = SessionState::default();
    ScenarioCatalog::builtin()
        .activate("normal_blood", &mut state)
        .expect("builtin scenario");
    let image = ImageDimensions::new(1_000, 800);
    let viewport = Viewport::new(400, 400);
    let stage = StageContext {
        image: Some(image),
        viewport,
        zoom: 1.0,
    };

    let mut run = TutorialRun::default();
    let TutorialTransition::Moved { effects, .. } = run.start(
        &tutorials,
        "basic_identification_tutorial",
        &state.annotations,
        stage,
    ) else {
        panic!("expected first step");
    };
    let pan = effects.recenter_pan.expect("recentered on annotation 0");
    let annotation = state.annotations.find(0).expect("annotation 0");
    let projected = image_to_view(annotation.position(), image, 1.0, pan);
    assert!((projected.x - 200.0).abs() <= 1e-9);
    assert!((projected.y - 200.0).abs() <= 1e-9);

    let TutorialTransition::Moved { effects, .. } =
        run.advance(&tutorials, StepDirection::Forward, &state.annotations, stage)
    else {
        panic!("expected second step");
    };
    assert!(effects.recenter_pan.is_some());
    assert_eq!(effects.highlight_target, None);
}

#[test]
fn input_condition_is_checked_against_event_value() {
    let mut catalog = TutorialCatalog::default();
    catalog
        .register(Tutorial::new(
            "contrast_drill",
            "Contrast drill",
            vec![
                TutorialStep::new("Raise the contrast above 150%.")
                    .with_trigger(StepTrigger::input(CONTRAST_SLIDER))
                    .with_condition(StepCondition::AtLeast(1.5)),
                TutorialStep::new("Done."),
            ],
        ))
        .expect("register");
    let mut run = started_run(&catalog, "contrast_drill");
    let optics = OpticalState::default();

    assert!(!run.report_action(&catalog, &ActionEvent::input(CONTRAST_SLIDER, 1.2), &optics));
    assert!(run.report_action(&catalog, &ActionEvent::input(CONTRAST_SLIDER, 1.6), &optics));
}

#[test]
fn drag_condition_is_checked_against_current_optics() {
    let mut catalog = TutorialCatalog::default();
    catalog
        .register(Tutorial::new(
            "focus_drill",
            "Focus drill",
            vec![
                TutorialStep::new("Bring coarse focus between 1.8 and 2.2.")
                    .with_trigger(StepTrigger::drag(OpticalField::CoarseFocus))
                    .with_condition(StepCondition::Between { min: 1.8, max: 2.2 }),
            ],
        ))
        .expect("register");
    let mut run = started_run(&catalog, "focus_drill");
    let event = ActionEvent::drag(ControlKind::CoarseFocus.selector(), OpticalField::CoarseFocus);

    let mut optics = OpticalState::default();
    optics.set_field(OpticalField::CoarseFocus, 5.0);
    assert!(!run.report_action(&catalog, &event, &optics));

    optics.set_field(OpticalField::CoarseFocus, 2.1);
    assert!(run.report_action(&catalog, &event, &optics));
    assert_eq!(
        forward(&mut run, &catalog),
        TutorialTransition::Completed {
            message: TUTORIAL_COMPLETED_MESSAGE.to_owned()
        }
    );
}

#[test]
fn reconcile_resets_runs_the_catalog_cannot_back() {
    let catalog = TutorialCatalog::builtin();
    let mut run: TutorialRun = serde_json::from_str(
        r#"{"tutorial_id":"basic_microscopy_tutorial","step_index":9,"is_active":true,"completed":[]}"#,
    )
    .expect("parse run");
    run.reconcile(&catalog);
    assert!(!run.is_active());
    assert_eq!(run, TutorialRun::default());

    let mut run: TutorialRun = serde_json::from_str(
        r#"{"tutorial_id":"basic_microscopy_tutorial","step_index":2,"is_active":true,"completed":[true,true]}"#,
    )
    .expect("parse run");
    run.reconcile(&catalog);
    assert!(run.is_active());
    assert_eq!(run.step_index(), Some(2));
    assert!(run.is_step_completed(1));
    assert!(!run.is_step_completed(2));
    assert_eq!(run.view(&catalog).expect("view").step_count, 6);
}
