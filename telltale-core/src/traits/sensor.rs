//! Analog and thermal sensor traits.
//!
//! The sensor-specific transfer functions (thermistor beta equation,
//! thermocouple cold-junction math) live with the board drivers; the core
//! only consumes the resulting integers.

/// Reasons a sensor reading cannot be represented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFault {
    /// No sensor present (open circuit, NaN from the converter)
    Disconnected,
    /// Reading outside the sensor's representable range
    OutOfRange,
}

/// Raw analog sample source (the ADC channels broadcast to the bus)
pub trait AnalogSource {
    /// Read one channel's raw sample
    fn read(&mut self, channel: u8) -> u16;
}

impl<A: AnalogSource> AnalogSource for &mut A {
    fn read(&mut self, channel: u8) -> u16 {
        (**self).read(channel)
    }
}

/// Pre-decoded temperature sensor
pub trait TempSensor {
    /// Temperature in 0.1 degF, or the fault that prevented a reading
    fn read_deci_degf(&mut self) -> Result<i16, SensorFault>;
}

impl<S: TempSensor> TempSensor for &mut S {
    fn read_deci_degf(&mut self) -> Result<i16, SensorFault> {
        (**self).read_deci_degf()
    }
}
