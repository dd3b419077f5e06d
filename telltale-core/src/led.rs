//! Status LED auto-off logic.
//!
//! An LED is illuminated for a duration and extinguished later by the
//! periodic sweep, so callers never block on LED timing. The shutoff
//! comparison is wrap-safe.

use crate::traits::LedPin;

/// One indicator LED with timed auto-off
#[derive(Debug)]
pub struct StatusLed<P: LedPin> {
    pin: P,
    shutoff_ms: u32,
    lit: bool,
}

impl<P: LedPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            shutoff_ms: 0,
            lit: false,
        }
    }

    /// True while the LED is driven on
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Turn the LED on for at least `duration_ms`. Extending an already-lit
    /// LED keeps the furthest shutoff time.
    pub fn illuminate(&mut self, now_ms: u32, duration_ms: u32) {
        let candidate = now_ms.wrapping_add(duration_ms);
        if !self.lit || (candidate.wrapping_sub(self.shutoff_ms) as i32) > 0 {
            self.shutoff_ms = candidate;
        }
        self.pin.set_lit(true);
        self.lit = true;
    }

    /// Extinguish the LED once its shutoff time has passed
    pub fn sweep(&mut self, now_ms: u32) {
        if !self.lit {
            return;
        }
        // Wrap-safe: lit periods are far shorter than half the timer range
        if (now_ms.wrapping_sub(self.shutoff_ms) as i32) > 0 {
            self.pin.set_lit(false);
            self.lit = false;
            self.shutoff_ms = now_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPin {
        lit: bool,
    }

    impl LedPin for TestPin {
        fn set_lit(&mut self, lit: bool) {
            self.lit = lit;
        }
    }

    #[test]
    fn test_illuminate_then_sweep_off() {
        let mut pin = TestPin { lit: false };
        let mut led = StatusLed::new(&mut pin);

        led.illuminate(100, 500);
        assert!(led.is_lit());

        led.sweep(400); // still within duration
        assert!(led.is_lit());

        led.sweep(601);
        assert!(!led.is_lit());
        assert!(!pin.lit);
    }

    #[test]
    fn test_extension_keeps_furthest_shutoff() {
        let mut pin = TestPin { lit: false };
        let mut led = StatusLed::new(&mut pin);

        led.illuminate(0, 500);
        led.illuminate(100, 100); // would shut off earlier; ignored
        led.sweep(300);
        assert!(led.is_lit());
        led.sweep(501);
        assert!(!led.is_lit());
    }

    #[test]
    fn test_shutoff_across_wrap() {
        let mut pin = TestPin { lit: false };
        let mut led = StatusLed::new(&mut pin);

        led.illuminate(u32::MAX - 10, 100); // shutoff wraps past zero
        led.sweep(u32::MAX);
        assert!(led.is_lit());
        led.sweep(95); // past the wrapped shutoff at 89
        assert!(!led.is_lit());
    }
}
