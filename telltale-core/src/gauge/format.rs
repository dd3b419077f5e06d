//! Fixed-point text rendering.
//!
//! Raw values arrive as integers in tenths (or whole units) of their
//! physical quantity. Rendering left-shifts by the decimal count, divides
//! by the scale factor with truncating semantics, and splits integer and
//! fractional digits. The left shift is done in `i64` so no 32-bit input
//! can overflow it.

use core::fmt::Write;
use heapless::String;

/// Maximum rendered text length, suffix included
pub const MAX_TEXT_LEN: usize = 16;

/// Maximum supported decimal digits
pub const MAX_DECIMALS: u8 = 4;

/// Placeholder shown when a gauge's data has gone stale
pub const STALE_TEXT: &str = "---";

/// Placeholder shown for a sensor fault
pub const FAULT_TEXT: &str = "ERR";

/// Placeholder when a value exceeds the displayable width
const OVERFLOW_TEXT: &str = "####";

/// Render a raw value as fixed-point text with a unit suffix.
///
/// Never fails: a value too wide for the display degrades to the overflow
/// placeholder rather than wrapping or truncating digits.
pub fn render(raw: i32, scale: u16, decimals: u8, suffix: &str) -> String<MAX_TEXT_LEN> {
    let decimals = decimals.min(MAX_DECIMALS) as u32;
    let scale = scale.max(1); // validated at config time
    let pow10 = 10i64.pow(decimals);

    let shifted = raw as i64 * pow10;
    let scaled = shifted / scale as i64; // truncating division
    let negative = scaled < 0;
    let magnitude = scaled.unsigned_abs();
    let int_part = magnitude / pow10 as u64;
    let frac_part = magnitude % pow10 as u64;

    let mut out: String<MAX_TEXT_LEN> = String::new();
    let fits = (|| -> Result<(), core::fmt::Error> {
        if negative {
            out.write_char('-')?;
        }
        write!(out, "{int_part}")?;
        if decimals > 0 {
            write!(out, ".{frac_part:0width$}", width = decimals as usize)?;
        }
        out.write_str(suffix)?;
        Ok(())
    })();

    match fits {
        Ok(()) => out,
        Err(_) => {
            let mut placeholder = String::new();
            let _ = placeholder.push_str(OVERFLOW_TEXT);
            placeholder
        }
    }
}
