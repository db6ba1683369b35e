use criterion::{Criterion, criterion_group, criterion_main};
use microscope_sim::api::{MicroscopeSession, SessionConfig};
use microscope_sim::catalog::ScenarioCatalog;
use microscope_sim::core::{
    ImageDimensions, ImagePoint, OpticalField, OpticalState, ViewPoint, Viewport, image_to_view,
    view_to_image,
};
use microscope_sim::interaction::DragTarget;
use microscope_sim::persistence::{MemoryStore, SessionSnapshotContractV1};
use microscope_sim::quiz::AnnotationKind;
use microscope_sim::render::NullPresenter;
use microscope_sim::state::SessionState;
use std::hint::black_box;

fn bench_visual_parameters(c: &mut Criterion) {
    let mut optics = OpticalState::default();
    optics.set_field(OpticalField::CoarseFocus, 3.7);
    optics.set_field(OpticalField::FineFocus, -0.4);
    optics.set_field(OpticalField::FieldDiaphragmOpenness, 0.35);

    c.bench_function("derive_visual_parameters", |b| {
        b.iter(|| black_box(&optics).derive_visual_parameters())
    });
}

fn bench_stage_transform_round_trip(c: &mut Criterion) {
    let image = ImageDimensions::new(2_048, 1_536);
    let point = ImagePoint::new(37.5, 62.25);

    c.bench_function("stage_transform_round_trip", |b| {
        b.iter(|| {
            let view = image_to_view(black_box(point), image, 4.0, (-812.0, -431.0));
            let _ = view_to_image(view, image, 4.0, (-812.0, -431.0)).expect("inverse");
        })
    });
}

fn bench_snapshot_json_500_annotations(c: &mut Criterion) {
    let mut state = SessionState::default();
    ScenarioCatalog::builtin()
        .activate("normal_blood", &mut state)
        .expect("builtin scenario");
    for i in 0..500 {
        let t = f64::from(i);
        state.annotations.add(
            (t * 0.37) % 100.0,
            (t * 0.61) % 100.0,
            format!("Point of interest {i}"),
            Some("Neutrophil".to_owned()),
            AnnotationKind::Custom,
        );
    }
    let contract = SessionSnapshotContractV1::new(state, None);

    c.bench_function("session_snapshot_json_500_annotations", |b| {
        b.iter(|| {
            let bytes = black_box(&contract).to_json_bytes().expect("serialize");
            let _ = SessionSnapshotContractV1::from_json_compat_slice(&bytes).expect("parse");
        })
    });
}

fn bench_build_frame(c: &mut Criterion) {
    let config = SessionConfig::new(Viewport::new(800, 800));
    let mut session =
        MicroscopeSession::new(NullPresenter::default(), MemoryStore::default(), config)
            .expect("session init");
    let ticket = session.select_scenario(Some("normal_blood"));
    session
        .image_loaded(&ticket, Ok(ImageDimensions::new(1_200, 900)))
        .expect("image load");
    session.toggle_scanning_guide();
    session
        .begin_drag(DragTarget::Stage, ViewPoint::new(0.0, 0.0))
        .expect("drag");
    session.update_drag(ViewPoint::new(-120.0, -80.0));
    session.end_drag();

    c.bench_function("build_presentation_frame", |b| {
        b.iter(|| black_box(&session).build_frame())
    });
}

criterion_group!(
    benches,
    bench_visual_parameters,
    bench_stage_transform_round_trip,
    bench_snapshot_json_500_annotations,
    bench_build_frame
);
criterion_main!(benches);
