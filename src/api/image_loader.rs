use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ImageDimensions;
use crate::error::{SimError, SimResult};

/// What the session does with an image once it is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePurpose {
    /// Placeholder slide; the quiz and optics are reset.
    ResetToPlaceholder,
    /// Catalog scenario; activated when the image resolves.
    ActivateScenario(String),
    /// User-supplied image; the quiz and optics are reset.
    AdoptCustom(String),
    /// Image backing a restored session; restored state is kept as is.
    KeepRestored,
}

/// Source handed to the host's image provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Path or URL of a bundled slide.
    Catalog(String),
    /// Bytes the host already holds for a user upload, identified by file name.
    Upload { name: String },
}

impl ImageSource {
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::Catalog(reference) => reference,
            Self::Upload { name } => name,
        }
    }
}

/// Single-shot handle for one image acquisition. Only the ticket of the most
/// recently started load can still change the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLoadTicket {
    generation: u64,
    source: ImageSource,
    purpose: ImagePurpose,
}

impl ImageLoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    #[must_use]
    pub fn purpose(&self) -> &ImagePurpose {
        &self.purpose
    }
}

/// Host-side image acquisition (file reads, network fetches, decoding).
///
/// Implementations start the load described by the ticket and later report
/// the outcome through `MicroscopeSession::image_loaded`.
pub trait ImageProvider {
    fn request(&mut self, ticket: &ImageLoadTicket);
}

/// Image that finished loading with usable dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedImage {
    pub reference: String,
    pub dimensions: ImageDimensions,
}

/// Tracks the displayed image and the single pending load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageLoader {
    generation: u64,
    pending: Option<ImageLoadTicket>,
    current: Option<LoadedImage>,
}

impl ImageLoader {
    /// Starts a load, superseding any load still in flight.
    pub fn begin(&mut self, source: ImageSource, purpose: ImagePurpose) -> ImageLoadTicket {
        self.generation += 1;
        if let Some(previous) = &self.pending {
            debug!(
                superseded = previous.generation,
                generation = self.generation,
                "superseding pending image load"
            );
        }
        let ticket = ImageLoadTicket {
            generation: self.generation,
            source,
            purpose,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Settles a load. Returns `None` for stale tickets, which must not touch
    /// the session. Zero-size images are reported as failures.
    pub fn resolve(
        &mut self,
        ticket: &ImageLoadTicket,
        result: Result<ImageDimensions, String>,
    ) -> Option<SimResult<LoadedImage>> {
        if self.pending.as_ref() != Some(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "ignoring stale image load result"
            );
            return None;
        }
        self.pending = None;

        let reference = ticket.source.reference().to_owned();
        let outcome = result
            .map_err(|reason| SimError::ImageLoad {
                reference: reference.clone(),
                reason,
            })
            .and_then(ImageDimensions::validate)
            .map(|dimensions| LoadedImage {
                reference,
                dimensions,
            });
        if let Ok(image) = &outcome {
            self.current = Some(image.clone());
        }
        Some(outcome)
    }

    #[must_use]
    pub fn pending(&self) -> Option<&ImageLoadTicket> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn current(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.current.as_ref().map(|image| image.dimensions)
    }
}
