use microscope_sim::SessionConfig;
use microscope_sim::SimError;
use microscope_sim::api::MAX_SCANNING_GUIDE_DIVISIONS;
use microscope_sim::core::Viewport;
use microscope_sim::interaction::ControlSensitivity;
use microscope_sim::persistence::DEFAULT_STORAGE_KEY;

#[test]
fn config_json_round_trip() {
    let config = SessionConfig::new(Viewport::new(640, 480))
        .with_storage_key("lab_session")
        .with_placeholder_image_ref("slides/blank.png")
        .with_scanning_guide_divisions(8)
        .with_control_sensitivity(ControlSensitivity {
            coarse_focus: 0.08,
            fine_focus: 0.02,
            illumination: 0.01,
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = SessionConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_use_defaults() {
    let config = SessionConfig::from_json_str(r#"{"viewport":{"width":300,"height":300}}"#)
        .expect("parse");

    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(config.placeholder_image_ref, "images/placeholder-slide.jpg");
    assert_eq!(config.scanning_guide_divisions, 5);
    assert_eq!(config.control_sensitivity, ControlSensitivity::default());
    config.validate().expect("defaults are valid");
}

#[test]
fn invalid_values_are_rejected() {
    let base = SessionConfig::new(Viewport::new(400, 400));

    let cases = [
        base.clone().with_scanning_guide_divisions(1),
        base.clone().with_scanning_guide_divisions(MAX_SCANNING_GUIDE_DIVISIONS + 1),
        base.clone().with_scanning_guide_divisions(u32::MAX),
        base.clone().with_storage_key(""),
        base.clone().with_placeholder_image_ref(""),
        base.clone().with_control_sensitivity(ControlSensitivity {
            fine_focus: 0.0,
            ..ControlSensitivity::default()
        }),
        base.clone().with_control_sensitivity(ControlSensitivity {
            illumination: f64::NAN,
            ..ControlSensitivity::default()
        }),
    ];
    for config in cases {
        let err = config.validate().expect_err("invalid config");
        assert!(matches!(err, SimError::InvalidConfig(_)), "{config:?}");
    }

    base.with_scanning_guide_divisions(MAX_SCANNING_GUIDE_DIVISIONS)
        .validate()
        .expect("largest guide is valid");

    let err = SessionConfig::new(Viewport::new(0, 400))
        .validate()
        .expect_err("zero viewport");
    assert!(matches!(err, SimError::InvalidViewport { width: 0, .. }));
}

#[test]
fn malformed_json_is_an_invalid_config() {
    let err = SessionConfig::from_json_str("{\"viewport\": 3}").expect_err("bad json");
    assert!(matches!(err, SimError::InvalidConfig(_)));
}
