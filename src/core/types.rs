use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Pixel size of the viewfinder surface annotations are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> SimResult<Self> {
        if !self.is_valid() {
            return Err(SimError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn center(self) -> ViewPoint {
        ViewPoint::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Native pixel size of the loaded slide image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Zero-size images count as failed loads.
    pub fn validate(self) -> SimResult<Self> {
        if !self.is_valid() {
            return Err(SimError::InvalidImageDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Position relative to the native image, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl ImagePoint {
    #[must_use]
    pub fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }
}

/// Position in viewfinder pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
