//! Static presets: slide scenarios and guided tutorials.

mod scenarios;
mod tutorials;

pub use scenarios::{Scenario, ScenarioActivation, ScenarioCatalog};
pub use tutorials::TutorialCatalog;
