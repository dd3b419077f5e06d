//! Wall-clock wire formats.
//!
//! The engine controller can both set the cluster's clock and ask for it:
//! - Clock-set frames carry a packed BCD date/time.
//! - A clock request triggers a plain-binary broadcast reply with the layout
//!   `[sec, min, hour, dow, day, month, year>>8, year&0xff]`.

use core::fmt::Write;

use crate::frame::{BusFrame, FrameError};
use heapless::String;

/// Identifier of the clock request frame (no payload semantics)
pub const CLOCK_REQUEST_ID: u32 = 28_869_304;

/// Identifier of the clock-set frame (packed BCD payload)
pub const CLOCK_SET_ID: u32 = 644;

/// Extended identifier the clock broadcast reply is addressed to
pub const CLOCK_BROADCAST_ID: u32 = 0x935_2838;

/// Errors decoding a clock-set payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Payload shorter than the 7 meaningful bytes
    Truncated,
}

/// Calendar date and time as kept by the cluster's real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Day of week, 0-6
    pub day_of_week: u8,
}

/// Convert one packed BCD byte to its integer value
pub fn bcd_to_u8(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Convert an integer 0-99 to packed BCD
pub fn u8_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

impl DateTime {
    /// Decode a clock-set payload.
    ///
    /// Layout: `[sec, min, hour, _, day, month, year, _]`, all BCD, year
    /// offset from 2000. The final byte would be the century but the
    /// controller always sends zero there.
    pub fn from_clock_set(payload: &[u8]) -> Result<Self, ClockError> {
        if payload.len() < 7 {
            return Err(ClockError::Truncated);
        }
        Ok(Self {
            second: bcd_to_u8(payload[0]),
            minute: bcd_to_u8(payload[1]),
            hour: bcd_to_u8(payload[2]),
            day: bcd_to_u8(payload[4]),
            month: bcd_to_u8(payload[5]),
            year: bcd_to_u8(payload[6]) as u16 + 2000,
            day_of_week: 0,
        })
    }

    /// Encode the broadcast reply payload
    pub fn to_broadcast(&self) -> [u8; 8] {
        [
            self.second,
            self.minute,
            self.hour,
            self.day_of_week,
            self.day,
            self.month,
            (self.year >> 8) as u8,
            (self.year & 0xFF) as u8,
        ]
    }

    /// Build the broadcast reply frame
    pub fn broadcast_frame(&self) -> Result<BusFrame, FrameError> {
        BusFrame::extended(CLOCK_BROADCAST_ID, &self.to_broadcast())
    }

    /// Format the time of day as `HH:MM:SS` for the clock gauge
    pub fn format_hms(&self) -> String<8> {
        let mut out = String::new();
        // Exactly 8 characters, which the capacity always holds
        let _ = write!(out, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_conversions() {
        assert_eq!(bcd_to_u8(0x59), 59);
        assert_eq!(bcd_to_u8(0x00), 0);
        assert_eq!(u8_to_bcd(59), 0x59);
        assert_eq!(u8_to_bcd(7), 0x07);
    }

    #[test]
    fn test_clock_set_decode() {
        // 12:34:56 on 2016-03-21
        let payload = [0x56, 0x34, 0x12, 0x00, 0x21, 0x03, 0x16, 0x00];
        let dt = DateTime::from_clock_set(&payload).unwrap();
        assert_eq!(dt.second, 56);
        assert_eq!(dt.minute, 34);
        assert_eq!(dt.hour, 12);
        assert_eq!(dt.day, 21);
        assert_eq!(dt.month, 3);
        assert_eq!(dt.year, 2016);
    }

    #[test]
    fn test_clock_set_truncated() {
        assert_eq!(
            DateTime::from_clock_set(&[0x56, 0x34]),
            Err(ClockError::Truncated)
        );
    }

    #[test]
    fn test_broadcast_layout() {
        let dt = DateTime {
            year: 2016,
            month: 3,
            day: 21,
            hour: 12,
            minute: 34,
            second: 56,
            day_of_week: 1,
        };
        let buf = dt.to_broadcast();
        assert_eq!(buf, [56, 34, 12, 1, 21, 3, 0x07, 0xE0]); // 2016 = 0x07E0
    }

    #[test]
    fn test_broadcast_frame_addressing() {
        let dt = DateTime {
            year: 2020,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            day_of_week: 3,
        };
        let frame = dt.broadcast_frame().unwrap();
        assert_eq!(frame.id, CLOCK_BROADCAST_ID);
        assert!(frame.extended);
        assert_eq!(frame.data.len(), 8);
    }

    #[test]
    fn test_format_hms() {
        let dt = DateTime {
            year: 2020,
            month: 1,
            day: 1,
            hour: 7,
            minute: 5,
            second: 9,
            day_of_week: 3,
        };
        assert_eq!(dt.format_hms().as_str(), "07:05:09");
    }

    #[test]
    fn test_format_hms_full_width() {
        let dt = DateTime {
            year: 2024,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 58,
            day_of_week: 2,
        };
        assert_eq!(dt.format_hms().as_str(), "23:59:58");
    }
}
