//! Real-time clock trait.

use telltale_protocol::DateTime;

/// Trait for the battery-backed real-time clock chip
pub trait WallClock {
    /// Read the current date and time
    fn now(&mut self) -> DateTime;

    /// Set the clock
    fn set(&mut self, datetime: DateTime);
}

impl<C: WallClock> WallClock for &mut C {
    fn now(&mut self) -> DateTime {
        (**self).now()
    }

    fn set(&mut self, datetime: DateTime) {
        (**self).set(datetime);
    }
}
