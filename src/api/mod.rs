//! Host-facing session facade.
//!
//! `MicroscopeSession` is split across controller files by concern; every
//! file adds an `impl` block to the same type.

mod drag_controller;
mod image_loader;
mod input;
mod optics_controller;
mod persistence_controller;
mod presentation_builder;
mod quiz_controller;
mod scenario_controller;
mod session;
mod session_config;
mod tutorial_controller;

pub use image_loader::{
    ImageLoadTicket, ImageLoader, ImageProvider, ImagePurpose, ImageSource, LoadedImage,
};
pub use input::{InputOutcome, UserInput};
pub use session::{MicroscopeSession, WELCOME_MESSAGE};
pub use session_config::{MAX_SCANNING_GUIDE_DIVISIONS, SessionConfig};
