//! Owned registry of every gauge on the dash.
//!
//! The registry replaces ambient per-gauge globals: the controller owns one
//! registry and is the single writer for all gauge state.

use heapless::Vec;
use telltale_display::DisplayLink;
use telltale_protocol::GaugeId;

use super::Gauge;
use crate::config::{ConfigError, DashConfig, GAUGE_COUNT};

/// All dash gauges, indexed by [`GaugeId`]
#[derive(Debug)]
pub struct GaugeRegistry {
    gauges: Vec<Gauge, GAUGE_COUNT>,
}

impl GaugeRegistry {
    /// Build the registry from a dashboard configuration
    pub fn from_config(config: &DashConfig) -> Result<Self, ConfigError> {
        let mut gauges = Vec::new();
        for gauge_config in config.gauges.iter() {
            let gauge = Gauge::new(gauge_config)?;
            // Capacity equals the config table length
            let _ = gauges.push(gauge);
        }
        Ok(Self { gauges })
    }

    /// Borrow one gauge
    pub fn get(&self, id: GaugeId) -> &Gauge {
        &self.gauges[id.index()]
    }

    /// Mutably borrow one gauge
    pub fn get_mut(&mut self, id: GaugeId) -> &mut Gauge {
        &mut self.gauges[id.index()]
    }

    /// Rewrite every configured label field
    pub fn refresh_labels<L: DisplayLink>(&mut self, link: &mut L) {
        for gauge in self.gauges.iter_mut() {
            gauge.update_label(link);
        }
    }

    /// Run the staleness watchdog over every gauge
    pub fn sweep_watchdogs<L: DisplayLink>(&mut self, now_ms: u32, link: &mut L) {
        for gauge in self.gauges.iter_mut() {
            gauge.watchdog(now_ms, link);
        }
    }
}
