//! Stage 1: numeric "visual" signals for an image.
//!
//! `DimensionHeuristic` does not look at pixel content. Every signal is a
//! modulo hash of the image's pixel dimensions, which keeps output stable
//! for tests and demos but carries no information about the item in the
//! photo. Real inference belongs behind [`FeatureSource`].

use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};

const DEFAULT_SIDE: u32 = 100;

/// Displayed and natural pixel dimensions of an image. Zero means unset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            natural_width: width,
            natural_height: height,
        }
    }

    /// (width, height, natural_width, natural_height) with unset values
    /// replaced: sides default to 100, natural sides to the displayed ones.
    pub fn resolved(&self) -> (u64, u64, u64, u64) {
        let w = if self.width == 0 { DEFAULT_SIDE } else { self.width };
        let h = if self.height == 0 { DEFAULT_SIDE } else { self.height };
        let nw = if self.natural_width == 0 { w } else { self.natural_width };
        let nh = if self.natural_height == 0 { h } else { self.natural_height };
        (w as u64, h as u64, nw as u64, nh as u64)
    }
}

/// Signal vector consumed by the scorer. Every field lies in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageSignals {
    pub brightness: f64,
    pub colorfulness: f64,
    pub sharpness: f64,
    pub greenness: f64,
    pub complexity: f64,
    pub transparency: f64,
    pub reflectivity: f64,
    pub texture: f64,
}

impl ImageSignals {
    pub fn fields(&self) -> [f64; 8] {
        [
            self.brightness,
            self.colorfulness,
            self.sharpness,
            self.greenness,
            self.complexity,
            self.transparency,
            self.reflectivity,
            self.texture,
        ]
    }

    pub fn within_unit_range(&self) -> bool {
        self.fields().iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Clamps every field into [0, 1]; used on signals from external sources.
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(0.0, 1.0),
            colorfulness: self.colorfulness.clamp(0.0, 1.0),
            sharpness: self.sharpness.clamp(0.0, 1.0),
            greenness: self.greenness.clamp(0.0, 1.0),
            complexity: self.complexity.clamp(0.0, 1.0),
            transparency: self.transparency.clamp(0.0, 1.0),
            reflectivity: self.reflectivity.clamp(0.0, 1.0),
            texture: self.texture.clamp(0.0, 1.0),
        }
    }
}

/// Anything that can turn an image into a signal vector. A model-backed
/// source may fail; the classifier then falls back to
/// [`DimensionHeuristic`].
pub trait FeatureSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, image: &ImageDimensions) -> Result<ImageSignals, ClassifyError>;
}

/// Deterministic placeholder source keyed on pixel dimensions only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionHeuristic;

impl FeatureSource for DimensionHeuristic {
    fn name(&self) -> &'static str {
        "dimension-heuristic"
    }

    fn extract(&self, image: &ImageDimensions) -> Result<ImageSignals, ClassifyError> {
        Ok(extract_signals(image))
    }
}

fn ratio(value: u64, prime: u64, modulus: u64) -> f64 {
    ((value * prime) % modulus) as f64 / modulus as f64
}

pub fn extract_signals(image: &ImageDimensions) -> ImageSignals {
    let (w, h, nw, nh) = image.resolved();
    ImageSignals {
        brightness: ratio(w, 17, 255),
        colorfulness: ratio(h, 23, 255),
        sharpness: ratio(w + h, 31, 100),
        greenness: ratio(nw, 29, 255),
        complexity: ratio(nh + w, 41, 100),
        transparency: ratio(nw, 37, 100),
        reflectivity: ratio(nh, 43, 100),
        texture: ratio(w + nh, 47, 100),
    }
}
