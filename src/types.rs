use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` of 32-bit floats.
///
/// Doubles as a parameter distribution (uniform draws via `sample`) and,
/// for pause durations, as a span of microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> ValueRange {
        if min > max {
            panic!("ValueRange requires min <= max, got [{}, {}]", min, max);
        }
        ValueRange { min, max }
    }

    /// Uniform draw from the interval. An empty interval yields `min`
    /// without consuming randomness.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    /// Smallest interval covering both `self` and `other`.
    pub fn union(&self, other: &ValueRange) -> ValueRange {
        ValueRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for ValueRange {
    fn default() -> ValueRange {
        ValueRange { min: 0.0, max: 0.0 }
    }
}

/// Bucket-age window that biases shift register regeneration.
/// The all-`u32::MAX` sentinel disables aging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub const DISABLED: AgeRange = AgeRange {
        min: u32::MAX,
        max: u32::MAX,
    };

    pub fn new(min: u32, max: u32) -> AgeRange {
        if min > max {
            panic!("AgeRange requires min <= max, got [{}, {}]", min, max);
        }
        AgeRange { min, max }
    }

    pub fn enabled(&self) -> bool {
        self.min < self.max
    }
}

/// How a shift register shapes its output between bucket centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Linear,
    Quadratic,
    None,
}
