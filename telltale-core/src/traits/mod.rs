//! Hardware abstraction traits
//!
//! These traits define the interface between the telemetry core and the
//! board-specific line drivers: bus transceiver, real-time clock chip,
//! analog/thermal sensor reads, and indicator LED pins. The display panel
//! link lives in `telltale-display`.

pub mod bus;
pub mod clock;
pub mod led;
pub mod sensor;

pub use bus::BusTransport;
pub use clock::WallClock;
pub use led::LedPin;
pub use sensor::{AnalogSource, SensorFault, TempSensor};
