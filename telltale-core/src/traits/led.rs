//! Indicator LED pin trait.

/// One indicator LED output pin
pub trait LedPin {
    /// Drive the LED on or off
    fn set_lit(&mut self, lit: bool);
}

impl<P: LedPin> LedPin for &mut P {
    fn set_lit(&mut self, lit: bool) {
        (**self).set_lit(lit);
    }
}
