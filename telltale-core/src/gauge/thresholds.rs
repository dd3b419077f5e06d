//! Threshold bounds and color classification.

use telltale_display::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Red/yellow threshold bounds for one gauge, in the gauge's raw units.
///
/// Red bounds are the outermost and win outright; a value exactly on a
/// yellow bound is still in the normal band (strict comparisons).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    /// Display red if the value goes under this
    pub red_low: i32,
    /// Display yellow if the value goes under this
    pub yellow_low: i32,
    /// Display yellow if the value goes over this
    pub yellow_high: i32,
    /// Display red if the value goes over this
    pub red_high: i32,
}

impl Thresholds {
    pub const fn new(red_low: i32, yellow_low: i32, yellow_high: i32, red_high: i32) -> Self {
        Self {
            red_low,
            yellow_low,
            yellow_high,
            red_high,
        }
    }

    /// Bounds that never trigger (informational gauges)
    pub const fn none() -> Self {
        Self::new(i16::MIN as i32, i16::MIN as i32, i16::MAX as i32, i16::MAX as i32)
    }

    /// Bounds centered on a live target value
    pub const fn around(center: i32, outer: i32, inner: i32) -> Self {
        Self::new(center - outer, center - inner, center + inner, center + outer)
    }

    /// Classify a raw value. Red strictly dominates yellow.
    pub fn classify(&self, value: i32) -> Color {
        if value > self.red_high || value < self.red_low {
            Color::Red
        } else if value > self.yellow_high || value < self.yellow_low {
            Color::Yellow
        } else {
            Color::Ok
        }
    }
}
