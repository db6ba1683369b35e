use std::collections::HashSet;

use microscope_sim::catalog::{ScenarioCatalog, TutorialCatalog};
use microscope_sim::core::{
    ImageDimensions, ImagePoint, Objective, OpticalField, OpticalState, image_to_view,
    view_to_image,
};
use microscope_sim::persistence::PersistenceReconciler;
use microscope_sim::quiz::{Annotation, AnnotationKind, AnnotationRegistry, Feedback};
use microscope_sim::state::SessionState;
use proptest::prelude::*;

const BOUNDED_FIELDS: [OpticalField; 5] = [
    OpticalField::CoarseFocus,
    OpticalField::FineFocus,
    OpticalField::Brightness,
    OpticalField::Contrast,
    OpticalField::FieldDiaphragmOpenness,
];

fn objective_strategy() -> impl Strategy<Value = Objective> {
    prop::sample::select(Objective::ALL.to_vec())
}

fn annotation(id: u32) -> Annotation {
    Annotation {
        id,
        x_percent: 10.0,
        y_percent: 20.0,
        question: format!("question {id}"),
        correct_answer: None,
        kind: AnnotationKind::Custom,
        user_answer: String::new(),
        feedback: Feedback::Unanswered,
    }
}

#[derive(Debug, Clone)]
enum RegistryOp {
    Add,
    ReplaceAll(Vec<u32>),
    Clear,
}

fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        4 => Just(RegistryOp::Add),
        2 => prop::collection::vec(0u32..12, 0..8).prop_map(RegistryOp::ReplaceAll),
        1 => prop::collection::vec(
            prop_oneof![0u32..4, (u32::MAX - 3)..=u32::MAX],
            0..8
        )
        .prop_map(RegistryOp::ReplaceAll),
        1 => Just(RegistryOp::Clear),
    ]
}

proptest! {
    #[test]
    fn bounded_fields_stay_in_range(
        field_index in 0usize..BOUNDED_FIELDS.len(),
        value in prop::num::f64::ANY
    ) {
        let field = BOUNDED_FIELDS[field_index];
        let mut optics = OpticalState::default();
        let before = optics.field(field);
        let applied = optics.set_field(field, value);
        let (min, max) = field.bounds();
        let after = optics.field(field);

        if value.is_nan() {
            prop_assert!(!applied);
            prop_assert_eq!(after.to_bits(), before.to_bits());
        }
        prop_assert!(after.is_finite());
        prop_assert!(after >= min && after <= max);
    }

    #[test]
    fn blur_is_non_negative_and_repeatable(
        objective in objective_strategy(),
        coarse in -20.0f64..20.0,
        fine in -5.0f64..5.0,
        openness in -1.0f64..2.0
    ) {
        let mut optics = OpticalState::default();
        optics.set_objective(objective);
        optics.set_field(OpticalField::CoarseFocus, coarse);
        optics.set_field(OpticalField::FineFocus, fine);
        optics.set_field(OpticalField::FieldDiaphragmOpenness, openness);

        let first = optics.derive_visual_parameters();
        let second = optics.derive_visual_parameters();
        prop_assert!(first.blur_radius >= 0.0);
        prop_assert!(first.vignette_size >= 0.0);
        prop_assert!(first.vignette_opacity >= 0.0 && first.vignette_opacity <= 0.8);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn stage_transform_round_trips(
        x_percent in -50.0f64..150.0,
        y_percent in -50.0f64..150.0,
        width in 1u32..5_000,
        height in 1u32..5_000,
        objective in objective_strategy(),
        pan_x in -5_000.0f64..5_000.0,
        pan_y in -5_000.0f64..5_000.0
    ) {
        let image = ImageDimensions::new(width, height);
        let zoom = objective.magnification();
        let point = ImagePoint::new(x_percent, y_percent);
        let view = image_to_view(point, image, zoom, (pan_x, pan_y));
        let back = view_to_image(view, image, zoom, (pan_x, pan_y)).expect("inverse");

        prop_assert!((back.x_percent - x_percent).abs() <= 1e-7);
        prop_assert!((back.y_percent - y_percent).abs() <= 1e-7);
    }

    #[test]
    fn annotation_ids_stay_unique(ops in prop::collection::vec(registry_op_strategy(), 1..40)) {
        let mut registry = AnnotationRegistry::default();
        for op in ops {
            match op {
                RegistryOp::Add => {
                    registry.add(50.0, 50.0, "added", None, AnnotationKind::Custom);
                }
                RegistryOp::ReplaceAll(ids) => {
                    registry.replace_all(ids.into_iter().map(annotation).collect());
                }
                RegistryOp::Clear => registry.clear(),
            }

            let ids: HashSet<u32> = registry.all().iter().map(|a| a.id).collect();
            prop_assert_eq!(ids.len(), registry.len());
            if let Some(next_id) = registry.next_id() {
                prop_assert!(registry.all().iter().all(|a| a.id < next_id));
            }
        }
    }

    #[test]
    fn persistence_round_trip_preserves_session(
        objective in objective_strategy(),
        coarse in 0.0f64..10.0,
        fine in -2.0f64..2.0,
        brightness in 0.3f64..1.7,
        contrast in 0.0f64..3.0,
        openness in 0.0f64..1.0,
        pan_x in -10_000.0f64..10_000.0,
        pan_y in -10_000.0f64..10_000.0,
        points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0, "[a-z ]{0,12}"), 0..6),
        use_scenario in any::<bool>(),
        guide in any::<bool>()
    ) {
        let scenarios = ScenarioCatalog::builtin();
        let tutorials = TutorialCatalog::builtin();
        let mut state = SessionState::default();
        if use_scenario {
            scenarios.activate("iron_deficiency_anemia", &mut state).expect("builtin");
        } else {
            state.select_custom_image("slide.png");
        }
        state.optics.set_objective(objective);
        state.optics.set_field(OpticalField::CoarseFocus, coarse);
        state.optics.set_field(OpticalField::FineFocus, fine);
        state.optics.set_field(OpticalField::Brightness, brightness);
        state.optics.set_field(OpticalField::Contrast, contrast);
        state.optics.set_field(OpticalField::FieldDiaphragmOpenness, openness);
        state.optics.set_pan(pan_x, pan_y);
        for (x, y, answer) in points {
            let correct = Some("Neutrophil".to_owned());
            if let Some(id) = state.annotations.add(x, y, "q", correct, AnnotationKind::Custom) {
                state.annotations.submit(id, &answer);
            }
        }
        state.scanning_guide_visible = guide;

        let reconciler = PersistenceReconciler::new(&scenarios, &tutorials);
        let bytes = reconciler.serialize(&state).expect("serialize");
        let restored = reconciler.restore(&bytes).expect("restore");
        prop_assert_eq!(restored.state, state);
    }
}
