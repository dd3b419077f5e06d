//! Dashboard controller: one cooperative pass over bus traffic and
//! periodic maintenance.
//!
//! The board's run loop calls [`DashBoard::poll`] as fast as it likes. Each
//! pass drains at most one received frame and then services whichever
//! periodic ticks have come due. Nothing blocks; the gauge debouncing keeps
//! panel traffic bounded no matter how hot the loop runs.

use telltale_display::{raw_command, DisplayLink, COMMAND_TERMINATOR};
use telltale_protocol::{
    decode, sample_page, FrameEffect, GaugeId, SAMPLE_PAGE_HIGH_ID, SAMPLE_PAGE_LOW_ID,
};

use crate::config::{ConfigError, DashConfig};
use crate::gauge::{GaugeRegistry, Thresholds};
use crate::led::StatusLed;
use crate::tick::{Tick, TickError};
use crate::traits::{AnalogSource, BusTransport, LedPin, TempSensor, WallClock};

/// How long the warning LED stays lit after a knock frame
const WARN_LED_PULSE_MS: u32 = 500;

/// Red band distance from the live AFR target, 0.1 ratio
const AFR_RED_MARGIN: i32 = 10;
/// Yellow band distance from the live AFR target, 0.1 ratio
const AFR_YELLOW_MARGIN: i32 = 5;

/// Warning line text while knock retard is active
const KNOCK_TEXT: &str = "KNOCK";

/// Panel statement that re-arms the panel's own connection watchdog
const PANEL_WATCHDOG_RESET: &str = "clk.val=0";

/// Number of analog channels broadcast in the sample pages
const ANALOG_CHANNELS: u8 = 8;

/// Errors constructing a dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// A gauge configuration failed validation
    Config(ConfigError),
    /// A maintenance tick was misconfigured
    Tick(TickError),
}

impl From<ConfigError> for SetupError {
    fn from(err: ConfigError) -> Self {
        SetupError::Config(err)
    }
}

impl From<TickError> for SetupError {
    fn from(err: TickError) -> Self {
        SetupError::Tick(err)
    }
}

/// The instrument cluster's single logical thread of control.
///
/// Owns every gauge plus the hardware seams: bus transceiver, panel link,
/// wall clock, analog sampler, oil temperature sensor, and warning LED.
pub struct DashBoard<B, L, C, A, S, P>
where
    B: BusTransport,
    L: DisplayLink,
    C: WallClock,
    A: AnalogSource,
    S: TempSensor,
    P: LedPin,
{
    bus: B,
    link: L,
    clock: C,
    analog: A,
    oil: S,
    warn_led: StatusLed<P>,
    gauges: GaugeRegistry,
    // Maintenance schedule. Phases stagger the ticks across passes so no
    // single pass does all the periodic work at once.
    label_tick: Tick,
    watchdog_tick: Tick,
    clock_tick: Tick,
    led_tick: Tick,
    sample_low_tick: Tick,
    sample_high_tick: Tick,
    oil_tick: Tick,
}

impl<B, L, C, A, S, P> DashBoard<B, L, C, A, S, P>
where
    B: BusTransport,
    L: DisplayLink,
    C: WallClock,
    A: AnalogSource,
    S: TempSensor,
    P: LedPin,
{
    /// Build a dashboard from its configuration and hardware seams
    pub fn new(
        config: &DashConfig,
        bus: B,
        link: L,
        clock: C,
        analog: A,
        oil: S,
        warn_pin: P,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            bus,
            link,
            clock,
            analog,
            oil,
            warn_led: StatusLed::new(warn_pin),
            gauges: GaugeRegistry::from_config(config)?,
            label_tick: Tick::new(1000, 100)?,
            watchdog_tick: Tick::new(200, 130)?,
            clock_tick: Tick::new(200, 160)?,
            led_tick: Tick::new(20, 1)?,
            sample_low_tick: Tick::new(50, 15)?,
            sample_high_tick: Tick::new(50, 25)?,
            oil_tick: Tick::new(200, 3)?,
        })
    }

    /// Put the panel in a known state after power-up.
    ///
    /// The bare terminator flushes any partial command the panel may hold
    /// from before the cluster reset; the page change lands on the gauge
    /// screen.
    pub fn reset_panel(&mut self) {
        self.link.write(&COMMAND_TERMINATOR);
        if let Ok(cmd) = raw_command("page main0") {
            self.link.write(&cmd);
        }
    }

    /// Run one cooperative pass: at most one received frame, then any
    /// maintenance that has come due.
    pub fn poll(&mut self, now_ms: u32) {
        self.service_bus(now_ms);
        self.service_ticks(now_ms);
    }

    fn service_bus(&mut self, now_ms: u32) {
        if !self.bus.frame_pending() {
            return;
        }
        let Some(frame) = self.bus.read_frame() else {
            return;
        };
        match decode(frame.id, &frame.data) {
            Ok(effect) => self.apply_effect(now_ms, effect),
            Err(err) => {
                // Unknown traffic is logged and dropped, never fatal
                #[cfg(feature = "defmt")]
                defmt::warn!("dropping frame {=u32}: {}", frame.id, err);
                let _ = err;
            }
        }
    }

    fn apply_effect(&mut self, now_ms: u32, effect: FrameEffect) {
        match effect {
            FrameEffect::Updates(updates) => {
                for update in updates.iter() {
                    self.gauges
                        .get_mut(update.gauge)
                        .update(now_ms, update.value, &mut self.link);
                }
            }
            FrameEffect::SparkAndAfrTarget { spark, afr_target } => {
                self.gauges
                    .get_mut(GaugeId::Spark)
                    .update(now_ms, spark, &mut self.link);
                let target = afr_target as i32;
                self.gauges
                    .get_mut(GaugeId::AfrTarget)
                    .update(now_ms, target, &mut self.link);
                // The measured-AFR gauge is judged against the live target
                self.gauges.get_mut(GaugeId::Afr).set_thresholds(
                    Thresholds::around(target, AFR_RED_MARGIN, AFR_YELLOW_MARGIN),
                );
            }
            FrameEffect::KnockWarning { active } => {
                let text = if active { KNOCK_TEXT } else { "" };
                self.gauges
                    .get_mut(GaugeId::Warning)
                    .set_text(now_ms, text, &mut self.link);
                if active {
                    self.warn_led.illuminate(now_ms, WARN_LED_PULSE_MS);
                }
            }
            FrameEffect::ClockRequest => {
                if let Ok(reply) = self.clock.now().broadcast_frame() {
                    self.bus.send_frame(&reply);
                }
            }
            FrameEffect::ClockSet(datetime) => {
                self.clock.set(datetime);
            }
            FrameEffect::Ignored => {}
        }
    }

    fn service_ticks(&mut self, now_ms: u32) {
        if self.led_tick.due(now_ms) {
            self.warn_led.sweep(now_ms);
        }
        if self.oil_tick.due(now_ms) {
            self.sample_oil(now_ms);
        }
        if self.sample_low_tick.due(now_ms) {
            self.broadcast_samples(SAMPLE_PAGE_LOW_ID, 0);
        }
        if self.sample_high_tick.due(now_ms) {
            self.broadcast_samples(SAMPLE_PAGE_HIGH_ID, ANALOG_CHANNELS / 2);
        }
        if self.label_tick.due(now_ms) {
            self.gauges.refresh_labels(&mut self.link);
        }
        if self.watchdog_tick.due(now_ms) {
            self.gauges.sweep_watchdogs(now_ms, &mut self.link);
            if let Ok(cmd) = raw_command(PANEL_WATCHDOG_RESET) {
                self.link.write(&cmd);
            }
        }
        if self.clock_tick.due(now_ms) {
            let readout = self.clock.now().format_hms();
            self.gauges
                .get_mut(GaugeId::Clock)
                .set_text(now_ms, readout.as_str(), &mut self.link);
        }
    }

    fn sample_oil(&mut self, now_ms: u32) {
        match self.oil.read_deci_degf() {
            Ok(deci_degf) => {
                self.gauges
                    .get_mut(GaugeId::OilTemp)
                    .update(now_ms, deci_degf as i32, &mut self.link);
            }
            Err(fault) => {
                self.gauges
                    .get_mut(GaugeId::OilTemp)
                    .mark_fault(now_ms, &mut self.link);
                #[cfg(feature = "defmt")]
                defmt::warn!("oil sensor fault: {}", fault);
                let _ = fault;
            }
        }
    }

    fn broadcast_samples(&mut self, page_id: u32, first_channel: u8) {
        let mut samples = [0u16; 4];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = self.analog.read(first_channel + i as u8);
        }
        self.bus.send_frame(&sample_page(page_id, samples));
    }
}
