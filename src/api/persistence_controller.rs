use tracing::{debug, warn};

use crate::error::SimResult;
use crate::interaction::InteractionState;
use crate::persistence::{ImageRequirement, PersistenceReconciler};
use crate::render::Presenter;

use super::{ImageLoadTicket, ImagePurpose, ImageSource, MicroscopeSession};

const SAVED_MESSAGE: &str = "Progress saved!";
const SAVE_FAILED_MESSAGE: &str = "Error saving progress.";
const NOTHING_SAVED_MESSAGE: &str = "No saved progress found.";
const LOAD_FAILED_MESSAGE: &str = "Error loading progress.";
const CLEARED_MESSAGE: &str = "Progress cleared.";

impl<P: Presenter> MicroscopeSession<P> {
    /// Writes the whole session, quiz answers included, to the store.
    pub fn save_progress(&mut self) -> SimResult<()> {
        let reconciler = PersistenceReconciler::new(&self.scenarios, &self.tutorials);
        let result = reconciler.save(&mut *self.store, &self.config.storage_key, &self.state);
        match &result {
            Ok(()) => self.set_status(SAVED_MESSAGE),
            Err(err) => {
                warn!(error = %err, "failed to save progress");
                self.set_status(SAVE_FAILED_MESSAGE);
            }
        }
        result
    }

    /// Replaces the session with the stored snapshot.
    ///
    /// Returns the image load that brings back the slide, or `Ok(None)`
    /// when nothing was saved. On error the current session is kept.
    pub fn load_progress(&mut self) -> SimResult<Option<ImageLoadTicket>> {
        let reconciler = PersistenceReconciler::new(&self.scenarios, &self.tutorials);
        let loaded = reconciler.load(&*self.store, &self.config.storage_key);
        let restored = match loaded {
            Ok(Some(restored)) => restored,
            Ok(None) => {
                self.set_status(NOTHING_SAVED_MESSAGE);
                return Ok(None);
            }
            Err(err) => {
                warn!(error = %err, "failed to load progress");
                self.set_status(LOAD_FAILED_MESSAGE);
                return Err(err);
            }
        };

        let message = restored.user_message();
        self.state = restored.state;
        self.interaction = InteractionState::default();
        self.suggested_tutorial = None;
        self.set_status(message);

        let ticket = match restored.image {
            ImageRequirement::Scenario { image_ref, .. } => {
                self.awaiting_reupload = None;
                self.images
                    .begin(ImageSource::Catalog(image_ref), ImagePurpose::KeepRestored)
            }
            ImageRequirement::ReuploadRequired { name } => {
                self.awaiting_reupload = Some(name);
                self.begin_placeholder(ImagePurpose::KeepRestored)
            }
            ImageRequirement::Placeholder => {
                self.awaiting_reupload = None;
                self.begin_placeholder(ImagePurpose::KeepRestored)
            }
        };
        debug!(
            saved_at = ?restored.saved_at,
            awaiting_reupload = ?self.awaiting_reupload,
            "progress loaded"
        );
        Ok(Some(ticket))
    }

    /// Deletes the stored snapshot and starts over on the placeholder slide.
    pub fn clear_progress(&mut self) -> SimResult<ImageLoadTicket> {
        let reconciler = PersistenceReconciler::new(&self.scenarios, &self.tutorials);
        let fresh = reconciler.clear(&mut *self.store, &self.config.storage_key)?;
        self.state = fresh;
        self.interaction = InteractionState::default();
        self.awaiting_reupload = None;
        self.suggested_tutorial = None;
        self.set_status(CLEARED_MESSAGE);
        Ok(self.begin_placeholder(ImagePurpose::KeepRestored))
    }
}
