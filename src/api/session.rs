use tracing::debug;

use crate::catalog::{ScenarioCatalog, TutorialCatalog};
use crate::core::{ImageDimensions, OpticalState, Viewport, VisualParameters};
use crate::error::SimResult;
use crate::interaction::{InteractionMode, InteractionState};
use crate::persistence::SessionStore;
use crate::quiz::AnnotationRegistry;
use crate::render::Presenter;
use crate::state::SessionState;
use crate::tutorial::{StageContext, TutorialView};

use super::{ImageLoadTicket, ImageLoader, SessionConfig};

pub const WELCOME_MESSAGE: &str =
    "Select a scenario or upload an image. Pick a tutorial if you like.";

/// Main orchestration facade consumed by host applications.
///
/// `MicroscopeSession` owns the explicit `SessionState` and coordinates
/// optics, quiz, tutorial, image acquisition, persistence and presenter calls.
pub struct MicroscopeSession<P: Presenter> {
    pub(super) presenter: P,
    pub(super) store: Box<dyn SessionStore>,
    pub(super) config: SessionConfig,
    pub(super) scenarios: ScenarioCatalog,
    pub(super) tutorials: TutorialCatalog,
    pub(super) state: SessionState,
    pub(super) interaction: InteractionState,
    pub(super) images: ImageLoader,
    /// Custom image a restored session is waiting for.
    pub(super) awaiting_reupload: Option<String>,
    pub(super) suggested_tutorial: Option<String>,
    pub(super) status: Option<String>,
}

impl<P: Presenter> MicroscopeSession<P> {
    /// Creates a session with the built-in scenario and tutorial catalogs.
    pub fn new(
        presenter: P,
        store: impl SessionStore + 'static,
        config: SessionConfig,
    ) -> SimResult<Self> {
        Self::with_catalogs(
            presenter,
            store,
            config,
            ScenarioCatalog::builtin(),
            TutorialCatalog::builtin(),
        )
    }

    pub fn with_catalogs(
        presenter: P,
        store: impl SessionStore + 'static,
        config: SessionConfig,
        scenarios: ScenarioCatalog,
        tutorials: TutorialCatalog,
    ) -> SimResult<Self> {
        config.validate()?;
        debug!(
            viewport_width = config.viewport.width,
            viewport_height = config.viewport.height,
            scenarios = scenarios.len(),
            tutorials = tutorials.len(),
            "creating microscope session"
        );
        Ok(Self {
            presenter,
            store: Box::new(store),
            config,
            scenarios,
            tutorials,
            state: SessionState::default(),
            interaction: InteractionState::default(),
            images: ImageLoader::default(),
            awaiting_reupload: None,
            suggested_tutorial: None,
            status: Some(WELCOME_MESSAGE.to_owned()),
        })
    }

    /// Restores saved progress, or falls back to the placeholder slide.
    ///
    /// Returns the image load the host has to fulfil.
    pub fn initialize(&mut self) -> ImageLoadTicket {
        match self.load_progress() {
            Ok(Some(ticket)) => return ticket,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable saved progress at startup");
            }
        }
        self.status = Some(WELCOME_MESSAGE.to_owned());
        self.show_placeholder()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn optics(&self) -> &OpticalState {
        &self.state.optics
    }

    #[must_use]
    pub fn annotations(&self) -> &AnnotationRegistry {
        &self.state.annotations
    }

    #[must_use]
    pub fn visual_parameters(&self) -> VisualParameters {
        self.state.optics.derive_visual_parameters()
    }

    #[must_use]
    pub fn scenarios(&self) -> &ScenarioCatalog {
        &self.scenarios
    }

    #[must_use]
    pub fn tutorials(&self) -> &TutorialCatalog {
        &self.tutorials
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Size of the slide on screen. `None` while a load is pending or a
    /// restored custom session waits for its re-upload, since the previous
    /// image no longer matches the restored annotations.
    #[must_use]
    pub fn image_dimensions(&self) -> Option<ImageDimensions> {
        if self.images.pending().is_some() || self.awaiting_reupload.is_some() {
            return None;
        }
        self.images.dimensions()
    }

    #[must_use]
    pub fn pending_image_load(&self) -> Option<&ImageLoadTicket> {
        self.images.pending()
    }

    /// Latest user-facing message (load results, errors, tutorial endings).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Tutorial linked to the last activated scenario. Never started
    /// automatically.
    #[must_use]
    pub fn suggested_tutorial(&self) -> Option<&str> {
        self.suggested_tutorial.as_deref()
    }

    #[must_use]
    pub fn awaiting_reupload(&self) -> Option<&str> {
        self.awaiting_reupload.as_deref()
    }

    #[must_use]
    pub fn tutorial_view(&self) -> Option<TutorialView> {
        self.state.tutorial_run.view(&self.tutorials)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Updates the viewfinder size used for projection and re-centring.
    pub fn set_viewport(&mut self, viewport: Viewport) -> SimResult<()> {
        self.config.viewport = viewport.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub(super) fn stage_context(&self) -> StageContext {
        StageContext {
            image: self.image_dimensions(),
            viewport: self.config.viewport,
            zoom: self.state.optics.zoom(),
        }
    }

    pub(super) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
