//! Gauge model: one display field with formatting, threshold-color,
//! debounce, and staleness logic.
//!
//! Each gauge owns the last text and color it sent so redundant panel
//! writes can be suppressed. Color and text are debounced independently:
//! an identical color is re-sent only after `refresh_ms`, identical text
//! only after `5 * refresh_ms` - color changes are cheaper and more urgent
//! to reflect than re-sending identical numeric text.
//!
//! A gauge that has not been fed for `5 * refresh_ms` is declared stale by
//! the watchdog sweep and forced to a neutral gray placeholder; no data is
//! better than bad data. A sensor fault is a third, distinct display state.

mod format;
mod registry;
mod thresholds;

pub use format::{render, FAULT_TEXT, MAX_DECIMALS, MAX_TEXT_LEN, STALE_TEXT};
pub use registry::GaugeRegistry;
pub use thresholds::Thresholds;

use heapless::String;
use telltale_display::{color_command, text_command, Color, DisplayLink};

use crate::config::{ConfigError, GaugeConfig, MAX_LABEL_LEN, MAX_OBJECT_LEN, MAX_SUFFIX_LEN};
use crate::tick::elapsed;

/// Missed-update multiple after which a gauge is stale
const STALE_REFRESH_MULTIPLE: u32 = 5;

/// One display field and its held panel state
#[derive(Debug)]
pub struct Gauge {
    object: String<MAX_OBJECT_LEN>,
    label_object: Option<String<MAX_OBJECT_LEN>>,
    label_text: Option<String<MAX_LABEL_LEN>>,
    suffix: String<MAX_SUFFIX_LEN>,
    scale: u16,
    decimals: u8,
    thresholds: Thresholds,
    refresh_ms: u32,
    // Held panel state for debouncing
    last_text: String<MAX_TEXT_LEN>,
    last_color: Option<Color>,
    last_text_sent_ms: u32,
    last_color_sent_ms: u32,
    last_update_ms: u32,
    stale: bool,
    faulted: bool,
}

impl Gauge {
    /// Create a gauge from its configuration
    pub fn new(config: &GaugeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            object: config.object.clone(),
            label_object: config.label_object.clone(),
            label_text: config.label_text.clone(),
            suffix: config.suffix.clone(),
            scale: config.scale,
            decimals: config.decimals,
            thresholds: config.thresholds,
            refresh_ms: config.refresh_ms,
            last_text: String::new(),
            last_color: None,
            last_text_sent_ms: 0,
            last_color_sent_ms: 0,
            last_update_ms: 0,
            stale: false,
            faulted: false,
        })
    }

    /// Current threshold bounds
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Replace the threshold bounds (live-retargeted gauges)
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    /// True once the watchdog has declared this gauge stale
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True while the gauge shows a sensor fault
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Feed a raw value: classify its color, render it, and transmit
    /// whatever changed.
    pub fn update<L: DisplayLink>(&mut self, now_ms: u32, raw: i32, link: &mut L) {
        let color = self.thresholds.classify(raw);
        self.send_color(now_ms, color, link);
        let text = render(raw, self.scale, self.decimals, self.suffix.as_str());
        self.send_text(now_ms, text.as_str(), link);
        self.mark_fresh(now_ms);
    }

    /// Set the gauge's text directly (warning line, clock readout).
    /// Debounced like any text write; counts as a fresh update.
    pub fn set_text<L: DisplayLink>(&mut self, now_ms: u32, text: &str, link: &mut L) {
        self.send_text(now_ms, text, link);
        self.mark_fresh(now_ms);
    }

    /// Rewrite the label field. Not subject to debounce.
    pub fn update_label<L: DisplayLink>(&mut self, link: &mut L) {
        if let (Some(object), Some(text)) = (&self.label_object, &self.label_text) {
            if let Ok(cmd) = text_command(object.as_str(), text.as_str()) {
                link.write(&cmd);
            }
        }
    }

    /// Declare the gauge stale if it has missed its update window.
    ///
    /// Forces the neutral color and placeholder through the debounce - the
    /// display must never show a value implied fresh when it is not.
    pub fn watchdog<L: DisplayLink>(&mut self, now_ms: u32, link: &mut L) {
        if self.stale {
            return;
        }
        let window = self.refresh_ms.saturating_mul(STALE_REFRESH_MULTIPLE);
        if elapsed(now_ms, self.last_update_ms) > window {
            self.force_color(now_ms, Color::Stale, link);
            self.force_text(now_ms, STALE_TEXT, link);
            self.stale = true;
        }
    }

    /// Show a sensor fault. Distinct from staleness: the sensor answered,
    /// but with an unrepresentable reading.
    pub fn mark_fault<L: DisplayLink>(&mut self, now_ms: u32, link: &mut L) {
        if !self.faulted {
            self.force_color(now_ms, Color::Red, link);
            self.force_text(now_ms, FAULT_TEXT, link);
            self.faulted = true;
        }
        // A fault report is fresh information; keep the watchdog quiet
        self.last_update_ms = now_ms;
        self.stale = false;
    }

    fn mark_fresh(&mut self, now_ms: u32) {
        self.last_update_ms = now_ms;
        self.stale = false;
        self.faulted = false;
    }

    fn send_color<L: DisplayLink>(&mut self, now_ms: u32, color: Color, link: &mut L) {
        if self.last_color == Some(color)
            && elapsed(now_ms, self.last_color_sent_ms) < self.refresh_ms
        {
            return;
        }
        self.force_color(now_ms, color, link);
    }

    fn force_color<L: DisplayLink>(&mut self, now_ms: u32, color: Color, link: &mut L) {
        if let Ok(cmd) = color_command(self.object.as_str(), color) {
            link.write(&cmd);
        }
        self.last_color = Some(color);
        self.last_color_sent_ms = now_ms;
    }

    fn send_text<L: DisplayLink>(&mut self, now_ms: u32, text: &str, link: &mut L) {
        let window = self.refresh_ms.saturating_mul(STALE_REFRESH_MULTIPLE);
        if self.last_text.as_str() == text && elapsed(now_ms, self.last_text_sent_ms) < window {
            return;
        }
        self.force_text(now_ms, text, link);
    }

    fn force_text<L: DisplayLink>(&mut self, now_ms: u32, text: &str, link: &mut L) {
        if let Ok(cmd) = text_command(self.object.as_str(), text) {
            link.write(&cmd);
        }
        self.last_text.clear();
        let _ = self.last_text.push_str(text);
        self.last_text_sent_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashConfig;
    use crate::testutil::RecordingLink;
    use telltale_protocol::GaugeId;

    fn make_gauge(id: GaugeId) -> Gauge {
        Gauge::new(DashConfig::default().get(id)).unwrap()
    }

    #[test]
    fn test_first_update_sends_color_and_text() {
        let mut gauge = make_gauge(GaugeId::Battery);
        let mut link = RecordingLink::new();

        gauge.update(0, 138, &mut link);
        assert_eq!(link.count(), 2);
        assert!(link.saw("b3.pco=GREEN"));
        assert!(link.saw("b3.txt=\"13.8v\""));
    }

    #[test]
    fn test_identical_update_is_debounced() {
        let mut gauge = make_gauge(GaugeId::Battery); // refresh 500ms
        let mut link = RecordingLink::new();

        gauge.update(0, 138, &mut link);
        link.clear();

        // Same value shortly after: both channels suppressed
        gauge.update(100, 138, &mut link);
        assert_eq!(link.count(), 0);

        // Color re-sends after refresh_ms, text only after 5x
        gauge.update(600, 138, &mut link);
        assert_eq!(link.count(), 1);
        assert!(link.saw("pco=GREEN"));

        link.clear();
        gauge.update(2600, 138, &mut link);
        assert_eq!(link.count(), 2);
    }

    #[test]
    fn test_color_change_sends_immediately() {
        let mut gauge = make_gauge(GaugeId::Battery);
        let mut link = RecordingLink::new();

        gauge.update(0, 138, &mut link); // green
        link.clear();

        // 125 raw = 12.5v, under yellow_low 130: color change is urgent
        gauge.update(10, 125, &mut link);
        assert!(link.saw("b3.pco=YELLOW"));
        assert!(link.saw("b3.txt=\"12.5v\""));
    }

    #[test]
    fn test_watchdog_declares_stale_once() {
        let mut gauge = make_gauge(GaugeId::Afr); // refresh 100ms
        let mut link = RecordingLink::new();

        gauge.update(0, 147, &mut link);
        link.clear();

        // Inside the window: nothing
        gauge.watchdog(400, &mut link);
        assert_eq!(link.count(), 0);
        assert!(!gauge.is_stale());

        // Past 5x refresh: gray placeholder, forced through debounce
        gauge.watchdog(501, &mut link);
        assert!(gauge.is_stale());
        assert!(link.saw("v1.pco=GRAY"));
        assert!(link.saw("v1.txt=\"---\""));

        // Repeat sweeps stay quiet while stale
        link.clear();
        gauge.watchdog(1000, &mut link);
        assert_eq!(link.count(), 0);
    }

    #[test]
    fn test_update_recovers_from_stale() {
        let mut gauge = make_gauge(GaugeId::Afr);
        let mut link = RecordingLink::new();

        gauge.watchdog(501, &mut link);
        assert!(gauge.is_stale());

        gauge.update(600, 147, &mut link);
        assert!(!gauge.is_stale());
        assert!(link.saw("v1.txt=\"14.7\""));
    }

    #[test]
    fn test_fault_state_distinct_from_stale() {
        let mut gauge = make_gauge(GaugeId::OilTemp);
        let mut link = RecordingLink::new();

        gauge.mark_fault(0, &mut link);
        assert!(gauge.is_faulted());
        assert!(!gauge.is_stale());
        assert!(link.saw("b2.pco=RED"));
        assert!(link.saw("b2.txt=\"ERR\""));

        // Repeated faults do not spam the panel but stay fresh
        link.clear();
        gauge.mark_fault(200, &mut link);
        assert_eq!(link.count(), 0);
        gauge.watchdog(300, &mut link);
        assert!(!gauge.is_stale());

        // A good reading clears the fault
        gauge.update(400, 1850, &mut link);
        assert!(!gauge.is_faulted());
    }

    #[test]
    fn test_label_not_debounced() {
        let mut gauge = make_gauge(GaugeId::Rpm);
        let mut link = RecordingLink::new();

        gauge.update_label(&mut link);
        gauge.update_label(&mut link);
        assert_eq!(link.count(), 2);
        assert!(link.saw("l2.txt=\"RPM\""));
    }

    #[test]
    fn test_retargeting_moves_bounds() {
        let mut gauge = make_gauge(GaugeId::Afr);
        let mut link = RecordingLink::new();

        gauge.set_thresholds(Thresholds::around(130, 10, 5));
        gauge.update(0, 147, &mut link);
        assert!(link.saw("v1.pco=RED")); // 147 > 130 + 10
    }
}
