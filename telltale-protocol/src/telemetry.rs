//! Outbound analog-sample telemetry pages.
//!
//! The cluster periodically broadcasts its raw ADC samples back onto the
//! bus for logging equipment, four channels per frame, big-endian.

use crate::frame::BusFrame;

/// Identifier for the page carrying analog channels 0-3
pub const SAMPLE_PAGE_LOW_ID: u32 = 0x20;
/// Identifier for the page carrying analog channels 4-7
pub const SAMPLE_PAGE_HIGH_ID: u32 = 0x21;

/// Build one sample-page frame from four raw analog readings
pub fn sample_page(id: u32, samples: [u16; 4]) -> BusFrame {
    let mut data = [0u8; 8];
    for (i, sample) in samples.iter().enumerate() {
        data[i * 2] = (sample >> 8) as u8;
        data[i * 2 + 1] = (sample & 0xFF) as u8;
    }
    let mut payload = heapless::Vec::new();
    // 8 bytes always fit the 8-byte frame payload
    let _ = payload.extend_from_slice(&data);
    BusFrame {
        id,
        extended: false,
        data: payload,
    }
}
