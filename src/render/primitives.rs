use serde::{Deserialize, Serialize};

use crate::core::ViewPoint;
use crate::error::{SimError, SimResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> SimResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Straight stroke between two viewfinder points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub from: ViewPoint,
    pub to: ViewPoint,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(from: ViewPoint, to: ViewPoint, stroke_width: f64, color: Color) -> Self {
        Self {
            from,
            to,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> SimResult<()> {
        let endpoints = [self.from.x, self.from.y, self.to.x, self.to.y];
        if endpoints.iter().any(|value| !value.is_finite()) {
            return Err(SimError::InvalidData(
                "guide line endpoints must be finite".to_owned(),
            ));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(SimError::InvalidData(format!(
                "guide line stroke width {} must be finite and > 0",
                self.stroke_width
            )));
        }
        self.color.validate()
    }
}

/// Filled circle with a numeric label marking one quiz point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPrimitive {
    pub annotation_id: u32,
    pub center: ViewPoint,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Color,
    pub label_font_px: f64,
}

impl MarkerPrimitive {
    pub fn validate(self) -> SimResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(SimError::InvalidData(
                "marker center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SimError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_font_px.is_finite() || self.label_font_px <= 0.0 {
            return Err(SimError::InvalidData(
                "marker label font size must be finite and > 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.stroke.validate()
    }
}
