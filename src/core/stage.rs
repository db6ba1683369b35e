//! Mapping between image-relative percent coordinates and viewfinder pixels.
//!
//! The slide image is drawn scaled by `zoom` around its top-left corner and
//! translated by the stage pan offset.

use crate::core::types::{ImageDimensions, ImagePoint, ViewPoint, Viewport};
use crate::error::{SimError, SimResult};

/// Projects an image-space point into viewfinder pixels.
#[must_use]
pub fn image_to_view(
    point: ImagePoint,
    image: ImageDimensions,
    zoom: f64,
    pan: (f64, f64),
) -> ViewPoint {
    let native_x = point.x_percent / 100.0 * f64::from(image.width);
    let native_y = point.y_percent / 100.0 * f64::from(image.height);
    ViewPoint::new(native_x * zoom + pan.0, native_y * zoom + pan.1)
}

/// Inverse of [`image_to_view`].
///
/// Fails with [`SimError::ImageNotReady`] while image dimensions are unknown.
pub fn view_to_image(
    point: ViewPoint,
    image: ImageDimensions,
    zoom: f64,
    pan: (f64, f64),
) -> SimResult<ImagePoint> {
    if !image.is_valid() {
        return Err(SimError::ImageNotReady);
    }
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(SimError::InvalidData(
            "zoom must be finite and > 0".to_owned(),
        ));
    }
    if !point.x.is_finite() || !point.y.is_finite() {
        return Err(SimError::InvalidData(
            "view point must be finite".to_owned(),
        ));
    }

    let native_x = (point.x - pan.0) / zoom;
    let native_y = (point.y - pan.1) / zoom;
    Ok(ImagePoint::new(
        native_x / f64::from(image.width) * 100.0,
        native_y / f64::from(image.height) * 100.0,
    ))
}

/// Pan offset that puts `point` in the middle of the viewport.
#[must_use]
pub fn centering_pan(
    point: ImagePoint,
    image: ImageDimensions,
    zoom: f64,
    viewport: Viewport,
) -> (f64, f64) {
    let projected = image_to_view(point, image, zoom, (0.0, 0.0));
    let center = viewport.center();
    (-(projected.x - center.x), -(projected.y - center.y))
}

/// Annotation marker radius. Markers shrink as magnification grows.
#[must_use]
pub fn marker_radius(zoom: f64) -> f64 {
    (8.0 / zoom.sqrt() + 4.0).max(3.0)
}

#[must_use]
pub fn marker_font_px(zoom: f64) -> f64 {
    (12.0 / zoom.sqrt()).max(8.0)
}

/// Whether a marker at `point` should be drawn. The viewport is expanded by
/// twice the marker radius so partially visible markers are kept.
#[must_use]
pub fn is_in_view(point: ViewPoint, viewport: Viewport, marker_radius: f64) -> bool {
    let margin = marker_radius * 2.0;
    point.x > -margin
        && point.x < f64::from(viewport.width) + margin
        && point.y > -margin
        && point.y < f64::from(viewport.height) + margin
}
