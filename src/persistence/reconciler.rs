use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::catalog::{ScenarioCatalog, TutorialCatalog};
use crate::error::{SimError, SimResult};
use crate::state::{ImageSelection, SessionState};

use super::{SessionSnapshotContractV1, SessionStore};

/// What the host has to do to bring back the slide image of a restored
/// session. Image bytes are never part of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRequirement {
    Placeholder,
    Scenario { id: String, image_ref: String },
    /// A user-supplied image that cannot be re-acquired automatically.
    ReuploadRequired { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestoredSession {
    pub state: SessionState,
    pub image: ImageRequirement,
    pub saved_at: Option<DateTime<Utc>>,
}

impl RestoredSession {
    /// Error describing an image the user has to supply again, if any.
    #[must_use]
    pub fn unavailable_image(&self) -> Option<SimError> {
        match &self.image {
            ImageRequirement::ReuploadRequired { name } => {
                Some(SimError::ImageUnavailable { name: name.clone() })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match &self.image {
            ImageRequirement::ReuploadRequired { name } => format!(
                "Previously used custom image: {name}. Please re-upload it to continue."
            ),
            _ => "Progress loaded!".to_owned(),
        }
    }
}

/// Serializes sessions and restores them against the current catalogs.
#[derive(Debug, Clone, Copy)]
pub struct PersistenceReconciler<'a> {
    scenarios: &'a ScenarioCatalog,
    tutorials: &'a TutorialCatalog,
}

impl<'a> PersistenceReconciler<'a> {
    #[must_use]
    pub fn new(scenarios: &'a ScenarioCatalog, tutorials: &'a TutorialCatalog) -> Self {
        Self {
            scenarios,
            tutorials,
        }
    }

    /// Full snapshot of the session, quiz answers included.
    pub fn serialize(&self, state: &SessionState) -> SimResult<Vec<u8>> {
        SessionSnapshotContractV1::new(state.clone(), Some(Utc::now())).to_json_bytes()
    }

    /// Parses a snapshot into a fresh session. On error nothing is returned,
    /// so the caller's state stays as it was.
    pub fn restore(&self, bytes: &[u8]) -> SimResult<RestoredSession> {
        let payload = SessionSnapshotContractV1::from_json_compat_slice(bytes)?;
        let mut state = payload.session;
        state.optics.sanitize();
        state.tutorial_run.reconcile(self.tutorials);

        let image = match state.image_selection() {
            ImageSelection::Scenario(id) => match self.scenarios.get(&id) {
                Some(scenario) => {
                    state.custom_image_name = None;
                    ImageRequirement::Scenario {
                        id,
                        image_ref: scenario.image_ref.clone(),
                    }
                }
                None => {
                    warn!(scenario_id = %id, "restored snapshot references unknown scenario");
                    state.active_scenario_id = None;
                    match state.custom_image_name.clone() {
                        Some(name) => ImageRequirement::ReuploadRequired { name },
                        None => ImageRequirement::Placeholder,
                    }
                }
            },
            ImageSelection::Custom(name) => ImageRequirement::ReuploadRequired { name },
            ImageSelection::Placeholder => ImageRequirement::Placeholder,
        };
        debug!(
            ?image,
            annotations = state.annotations.len(),
            tutorial_active = state.tutorial_run.is_active(),
            "restored session snapshot"
        );

        Ok(RestoredSession {
            state,
            image,
            saved_at: payload.saved_at,
        })
    }

    pub fn save(
        &self,
        store: &mut dyn SessionStore,
        key: &str,
        state: &SessionState,
    ) -> SimResult<()> {
        let bytes = self.serialize(state)?;
        store.set(key, &bytes)?;
        debug!(key, bytes = bytes.len(), "saved session snapshot");
        Ok(())
    }

    /// Loads the stored snapshot. `Ok(None)` when nothing was saved.
    pub fn load(
        &self,
        store: &dyn SessionStore,
        key: &str,
    ) -> SimResult<Option<RestoredSession>> {
        match store.get(key)? {
            Some(bytes) => self.restore(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Drops the stored snapshot and returns a fresh session.
    pub fn clear(&self, store: &mut dyn SessionStore, key: &str) -> SimResult<SessionState> {
        store.delete(key)?;
        debug!(key, "cleared session snapshot");
        Ok(SessionState::default())
    }
}
