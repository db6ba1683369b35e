//! microscope-sim: virtual microscope optical-state engine.
//!
//! The crate models the optics of a teaching microscope (objective, focus,
//! illumination, contrast, field diaphragm, stage position), quiz points
//! placed on the slide, guided tutorials, and saving/restoring a session.
//! Drawing, input wiring and image decoding stay with the host, which talks
//! to the core through `MicroscopeSession` and the `Presenter` trait.

pub mod api;
pub mod catalog;
pub mod core;
pub mod error;
pub mod interaction;
pub mod persistence;
pub mod quiz;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod tutorial;

pub use api::{MicroscopeSession, SessionConfig};
pub use error::{SimError, SimResult};
pub use state::SessionState;
