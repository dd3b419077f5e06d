//! Dashboard configuration type definitions.
//!
//! One [`GaugeConfig`] per display field, collected into a [`DashConfig`]
//! indexed by [`GaugeId`]. The default table reproduces the production dash
//! layout: v0-v6 are the main gauges with labels l0-l6 to their right,
//! b0-b3 run along the bottom, c0 is the clock, and `warn` is a full-width
//! warning line. Threshold bounds are in raw, unscaled units.

use heapless::String;
use telltale_protocol::GaugeId;

use crate::gauge::{Thresholds, MAX_DECIMALS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum panel object name length
pub const MAX_OBJECT_LEN: usize = 8;

/// Maximum label text length
pub const MAX_LABEL_LEN: usize = 12;

/// Maximum unit suffix length
pub const MAX_SUFFIX_LEN: usize = 8;

/// Number of gauges on the dash
pub const GAUGE_COUNT: usize = GaugeId::ALL.len();

/// Errors validating a gauge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Scale factor of zero would divide by zero when rendering
    ZeroScale,
    /// More decimal digits than the renderer supports
    TooManyDecimals,
}

/// Configuration for one display gauge
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaugeConfig {
    /// Panel object showing the value
    pub object: String<MAX_OBJECT_LEN>,
    /// Panel object showing the label, if the gauge has one
    pub label_object: Option<String<MAX_OBJECT_LEN>>,
    /// Label text to keep refreshed
    pub label_text: Option<String<MAX_LABEL_LEN>>,
    /// Unit suffix appended to the rendered value
    pub suffix: String<MAX_SUFFIX_LEN>,
    /// Fixed-decimal scaling factor (raw units per displayed unit)
    pub scale: u16,
    /// Digits after the decimal point
    pub decimals: u8,
    /// Red/yellow bounds in raw units
    pub thresholds: Thresholds,
    /// Minimum time between refreshes of this gauge
    pub refresh_ms: u32,
}

impl GaugeConfig {
    /// Check the formatting parameters are renderable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::TooManyDecimals);
        }
        Ok(())
    }
}

/// Complete dashboard configuration, one entry per [`GaugeId`] in
/// registry order
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashConfig {
    pub gauges: [GaugeConfig; GAUGE_COUNT],
}

fn fixed<const N: usize>(text: &str) -> String<N> {
    let mut s = String::new();
    let _ = s.push_str(text);
    s
}

#[allow(clippy::too_many_arguments)]
fn gauge(
    object: &str,
    label: Option<(&str, &str)>,
    suffix: &str,
    scale: u16,
    decimals: u8,
    thresholds: Thresholds,
    refresh_ms: u32,
) -> GaugeConfig {
    GaugeConfig {
        object: fixed(object),
        label_object: label.map(|(obj, _)| fixed(obj)),
        label_text: label.map(|(_, text)| fixed(text)),
        suffix: fixed(suffix),
        scale,
        decimals,
        thresholds,
        refresh_ms,
    }
}

impl Default for DashConfig {
    /// The production dash layout. Entry order matches [`GaugeId::ALL`].
    fn default() -> Self {
        let t = Thresholds::new;
        Self {
            gauges: [
                // Map
                gauge("v0", Some(("l0", "MAP kPa")), "", 10, 0, t(0, 0, 2600, 2800), 20),
                // Afr - bounds are retargeted live from the AFR target frame
                gauge("v1", Some(("l1", "AFR")), "", 10, 1, t(100, 105, 150, 155), 100),
                // AfrTarget
                gauge("v4", Some(("l4", "AFR trgt")), "", 10, 1, Thresholds::none(), 200),
                // Rpm
                gauge("v2", Some(("l2", "RPM")), "", 1, 0, t(0, 0, 6500, 7000), 100),
                // VehicleSpeed
                gauge("v3", Some(("l3", "VSS mph")), "", 1, 0, Thresholds::none(), 200),
                // Spark
                gauge("v5", Some(("l5", "Advance")), "", 10, 1, Thresholds::none(), 50),
                // Egt
                gauge("v6", Some(("l6", "EGT degF")), "", 1, 0, t(500, 700, 1600, 1800), 100),
                // Coolant
                gauge("b0", None, "cltF", 10, 0, t(600, 1500, 2000, 2200), 1010),
                // ManifoldAir
                gauge("b1", None, "matF", 10, 0, t(200, 400, 1400, 1600), 200),
                // OilTemp - sensor reports 0.1 degF, shown in whole degrees
                gauge("b2", None, "oilF", 10, 0, Thresholds::none(), 1000),
                // Battery
                gauge("b3", None, "v", 10, 1, t(120, 130, 147, 150), 500),
                // Clock
                gauge("c0", None, "", 1, 0, Thresholds::none(), 200),
                // Warning
                gauge("warn", None, "", 1, 0, Thresholds::none(), 50),
            ],
        }
    }
}

impl DashConfig {
    /// Configuration entry for one gauge
    pub fn get(&self, id: GaugeId) -> &GaugeConfig {
        &self.gauges[id.index()]
    }
}
