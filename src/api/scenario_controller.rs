use tracing::{debug, warn};

use crate::core::ImageDimensions;
use crate::error::{SimError, SimResult};
use crate::render::Presenter;

use super::{
    ImageLoadTicket, ImageProvider, ImagePurpose, ImageSource, LoadedImage, MicroscopeSession,
};

const PLACEHOLDER_MESSAGE: &str = "Select a scenario or upload an image.";
const LOADING_IMAGE_MESSAGE: &str = "Loading image...";
const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Error: Selected file is not a recognized image format. Please choose a PNG, JPEG, or GIF.";

impl<P: Presenter> MicroscopeSession<P> {
    /// Scenario dropdown selection. `None` (or an id missing from the
    /// catalog) switches back to the placeholder slide.
    ///
    /// The scenario is only applied once its image has loaded.
    pub fn select_scenario(&mut self, scenario_id: Option<&str>) -> ImageLoadTicket {
        let Some(scenario) = scenario_id.and_then(|id| self.scenarios.get(id)) else {
            if let Some(id) = scenario_id {
                debug!(scenario_id = id, "unknown scenario selected, showing placeholder");
            }
            return self.show_placeholder();
        };
        let source = ImageSource::Catalog(scenario.image_ref.clone());
        let purpose = ImagePurpose::ActivateScenario(scenario.id.clone());
        self.images.begin(source, purpose)
    }

    /// Starts loading a user-supplied image file.
    ///
    /// Files whose media type is not `image/*` are rejected before any load
    /// starts. Re-uploading the custom image of a restored session keeps the
    /// restored quiz and optics.
    pub fn begin_custom_image(
        &mut self,
        name: &str,
        media_type: &str,
    ) -> SimResult<ImageLoadTicket> {
        if !media_type.starts_with("image/") {
            self.set_status(UNSUPPORTED_FORMAT_MESSAGE);
            return Err(SimError::ImageLoad {
                reference: name.to_owned(),
                reason: format!("unsupported media type `{media_type}`"),
            });
        }
        let purpose = if self.awaiting_reupload.as_deref() == Some(name) {
            ImagePurpose::KeepRestored
        } else {
            ImagePurpose::AdoptCustom(name.to_owned())
        };
        self.set_status(LOADING_IMAGE_MESSAGE);
        Ok(self.images.begin(
            ImageSource::Upload {
                name: name.to_owned(),
            },
            purpose,
        ))
    }

    /// Hands the pending load, if any, to the host's provider.
    pub fn request_pending_image(&self, provider: &mut dyn ImageProvider) -> bool {
        match self.images.pending() {
            Some(ticket) => {
                provider.request(ticket);
                true
            }
            None => false,
        }
    }

    /// Reports the outcome of an image load and presents the resulting frame.
    ///
    /// Returns `Ok(false)` for superseded tickets, which change nothing and
    /// present nothing. Failures leave the optics and quiz untouched and are
    /// also reported through the status message.
    pub fn image_loaded(
        &mut self,
        ticket: &ImageLoadTicket,
        result: Result<ImageDimensions, String>,
    ) -> SimResult<bool> {
        let Some(outcome) = self.images.resolve(ticket, result) else {
            return Ok(false);
        };
        let applied = match outcome {
            Ok(image) => {
                debug!(
                    reference = %image.reference,
                    width = image.dimensions.width,
                    height = image.dimensions.height,
                    generation = ticket.generation(),
                    "image load resolved"
                );
                self.adopt_image(ticket, &image);
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, generation = ticket.generation(), "image load failed");
                self.set_status(load_failure_message(ticket, &err));
                Err(err)
            }
        };
        self.render()?;
        applied
    }

    pub(super) fn show_placeholder(&mut self) -> ImageLoadTicket {
        self.begin_placeholder(ImagePurpose::ResetToPlaceholder)
    }

    pub(super) fn begin_placeholder(&mut self, purpose: ImagePurpose) -> ImageLoadTicket {
        let source = ImageSource::Catalog(self.config.placeholder_image_ref.clone());
        self.images.begin(source, purpose)
    }

    fn adopt_image(&mut self, ticket: &ImageLoadTicket, image: &LoadedImage) {
        match ticket.purpose() {
            ImagePurpose::ResetToPlaceholder => {
                self.state.select_placeholder();
                self.awaiting_reupload = None;
                self.suggested_tutorial = None;
                self.set_status(PLACEHOLDER_MESSAGE);
            }
            ImagePurpose::ActivateScenario(id) => {
                match self.scenarios.activate(id, &mut self.state) {
                    Some(activation) => {
                        self.awaiting_reupload = None;
                        self.suggested_tutorial = activation.suggested_tutorial;
                        let message = if activation.description.is_empty() {
                            "Scenario loaded.".to_owned()
                        } else {
                            activation.description
                        };
                        self.set_status(message);
                    }
                    None => warn!(scenario_id = %id, "scenario vanished before its image loaded"),
                }
            }
            ImagePurpose::AdoptCustom(name) => {
                self.state.select_custom_image(name.clone());
                self.awaiting_reupload = None;
                self.suggested_tutorial = None;
                self.set_status(format!("Custom image \"{name}\" loaded successfully."));
            }
            ImagePurpose::KeepRestored => {
                if let ImageSource::Upload { name } = ticket.source() {
                    self.awaiting_reupload = None;
                    self.set_status(format!("Custom image \"{name}\" loaded successfully."));
                }
            }
        }
        debug!(reference = %image.reference, purpose = ?ticket.purpose(), "image adopted");
    }
}

fn load_failure_message(ticket: &ImageLoadTicket, err: &SimError) -> String {
    let invalid_dimensions = matches!(err, SimError::InvalidImageDimensions { .. });
    match (ticket.source(), ticket.purpose()) {
        (ImageSource::Upload { name }, _) if invalid_dimensions => format!(
            "Error: Image \"{name}\" loaded but appears to be invalid or has zero dimensions."
        ),
        (ImageSource::Upload { .. }, _) => "Error: Could not display the selected image. \
             It might be corrupted or an unsupported format."
            .to_owned(),
        (ImageSource::Catalog(reference), ImagePurpose::ResetToPlaceholder) => {
            format!("Error loading placeholder image \"{reference}\". Select scenario or upload.")
        }
        (ImageSource::Catalog(reference), _) if invalid_dimensions => {
            format!("Error: Scenario image \"{reference}\" loaded with invalid dimensions.")
        }
        (ImageSource::Catalog(reference), _) => {
            format!("Error: Could not load scenario image: \"{reference}\".")
        }
    }
}
