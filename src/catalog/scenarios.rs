use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::InitialOptics;
use crate::error::{SimError, SimResult};
use crate::quiz::{AnnotationKind, AnnotationTemplate};
use crate::state::SessionState;

/// Named preset: slide image, starting optics and quiz points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub image_ref: String,
    pub description: String,
    pub initial_optics: InitialOptics,
    pub annotations: Vec<AnnotationTemplate>,
    pub linked_tutorial_id: Option<String>,
}

/// Result of activating a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioActivation {
    pub scenario_id: String,
    pub description: String,
    /// Tutorial the host may preselect. Never started automatically.
    pub suggested_tutorial: Option<String>,
}

/// Read-only scenario registry. Iteration order is insertion order so
/// dropdowns stay stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioCatalog {
    scenarios: IndexMap<String, Scenario>,
}

impl ScenarioCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for scenario in builtin_scenarios() {
            catalog.scenarios.insert(scenario.id.clone(), scenario);
        }
        catalog
    }

    /// Adds a scenario with a unique, non-empty id.
    pub fn register(&mut self, scenario: Scenario) -> SimResult<()> {
        if scenario.id.is_empty() {
            return Err(SimError::InvalidData(
                "scenario id must not be empty".to_owned(),
            ));
        }
        if self.scenarios.contains_key(&scenario.id) {
            return Err(SimError::InvalidData(format!(
                "scenario with id `{}` is already registered",
                scenario.id
            )));
        }
        self.scenarios.insert(scenario.id.clone(), scenario);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Applies a scenario to the session: optics reset to the scenario's
    /// overrides, quiz replaced, scenario selected. Unknown ids leave the
    /// session untouched.
    pub fn activate(&self, id: &str, session: &mut SessionState) -> Option<ScenarioActivation> {
        let scenario = self.get(id)?;
        session.optics.reset_to(scenario.initial_optics);
        session
            .annotations
            .replace_from_templates(&scenario.annotations);
        session.active_scenario_id = Some(scenario.id.clone());
        session.custom_image_name = None;
        debug!(
            scenario_id = %scenario.id,
            annotations = session.annotations.len(),
            "activated scenario"
        );

        Some(ScenarioActivation {
            scenario_id: scenario.id.clone(),
            description: scenario.description.clone(),
            suggested_tutorial: scenario.linked_tutorial_id.clone(),
        })
    }
}

fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "normal_blood".to_owned(),
            name: "Normal Peripheral Blood Smear".to_owned(),
            image_ref: "images/normal_smear.jpg".to_owned(),
            description: "Observe and identify normal red cells, white cells, and platelets."
                .to_owned(),
            initial_optics: InitialOptics {
                zoom: Some(1.0),
                coarse_focus: Some(2.0),
                fine_focus: Some(0.0),
                brightness: Some(1.0),
                contrast: Some(1.0),
                field_diaphragm_openness: Some(1.0),
                pan_x: Some(0.0),
                pan_y: Some(0.0),
            },
            annotations: vec![
                AnnotationTemplate::new(
                    0,
                    25.0,
                    30.0,
                    "Identify this large cell with a multi-lobed nucleus.",
                    "Neutrophil",
                    AnnotationKind::Identification,
                ),
                AnnotationTemplate::new(
                    1,
                    60.0,
                    70.0,
                    "What are these small, purple, irregular fragments?",
                    "Platelets",
                    AnnotationKind::Identification,
                ),
                AnnotationTemplate::new(
                    2,
                    40.0,
                    50.0,
                    "Identify this cell with a large, round nucleus and scant cytoplasm.",
                    "Lymphocyte",
                    AnnotationKind::Identification,
                ),
                AnnotationTemplate::new(
                    3,
                    75.0,
                    20.0,
                    "What is the most numerous cell type here?",
                    "Red Blood Cell",
                    AnnotationKind::Identification,
                ),
            ],
            linked_tutorial_id: Some("basic_identification_tutorial".to_owned()),
        },
        Scenario {
            id: "iron_deficiency_anemia".to_owned(),
            name: "Iron Deficiency Anemia".to_owned(),
            image_ref: "images/ida_smear.jpg".to_owned(),
            description: "Observe microcytic, hypochromic red blood cells.".to_owned(),
            initial_optics: InitialOptics {
                zoom: Some(2.0),
                coarse_focus: Some(4.0),
                fine_focus: Some(0.0),
                brightness: Some(1.1),
                contrast: Some(1.0),
                field_diaphragm_openness: Some(1.0),
                pan_x: Some(0.0),
                pan_y: Some(0.0),
            },
            annotations: vec![
                AnnotationTemplate::new(
                    0,
                    30.0,
                    40.0,
                    "Describe the red blood cells in this field (size & color).",
                    "Microcytic hypochromic",
                    AnnotationKind::Description,
                ),
                AnnotationTemplate::new(
                    1,
                    55.0,
                    65.0,
                    "What condition is suggested by these RBC features?",
                    "Iron deficiency anemia",
                    AnnotationKind::DiagnosisHint,
                ),
            ],
            linked_tutorial_id: None,
        },
    ]
}
