pub mod optics;
pub mod stage;
pub mod types;

pub use optics::{
    InitialOptics, Objective, OpticalField, OpticalReadouts, OpticalState, VisualParameters,
    ideal_coarse_focus,
};
pub use stage::{
    centering_pan, image_to_view, is_in_view, marker_font_px, marker_radius, view_to_image,
};
pub use types::{ImageDimensions, ImagePoint, ViewPoint, Viewport};
