//! Panel command encoding.
//!
//! Command format (bit-exact wire contract with the panel firmware):
//! ```text
//! <object>.txt="<text>"<FF FF FF>     set a field's text
//! <object>.pco=<color><FF FF FF>      set a field's foreground color
//! <statement><FF FF FF>               raw statement (page change, etc.)
//! ```

use heapless::Vec;

/// Every panel command ends with this terminator sequence
pub const COMMAND_TERMINATOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Maximum encoded command length in bytes
pub const MAX_COMMAND_LEN: usize = 48;

/// One encoded panel command, terminator included
pub type CommandBuf = Vec<u8, MAX_COMMAND_LEN>;

/// Errors building a panel command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Encoded command exceeds [`MAX_COMMAND_LEN`]
    TooLong,
}

/// Gauge foreground colors understood by the panel.
///
/// The wire values are the panel's named colors. `Stale` renders gray to
/// distinguish "no recent data" from both normal readings and faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Reading beyond a red bound, or sensor fault
    Red,
    /// Reading beyond a yellow bound
    Yellow,
    /// Reading in the normal band
    Ok,
    /// No fresh data (watchdog expired)
    Stale,
}

impl Color {
    /// Panel wire name for this color
    pub fn wire_name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
            Color::Ok => "GREEN",
            Color::Stale => "GRAY",
        }
    }
}

fn push_str(buf: &mut CommandBuf, s: &str) -> Result<(), CommandError> {
    buf.extend_from_slice(s.as_bytes())
        .map_err(|_| CommandError::TooLong)
}

fn terminate(mut buf: CommandBuf) -> Result<CommandBuf, CommandError> {
    buf.extend_from_slice(&COMMAND_TERMINATOR)
        .map_err(|_| CommandError::TooLong)?;
    Ok(buf)
}

/// Build a text-set command for a panel object
pub fn text_command(object: &str, text: &str) -> Result<CommandBuf, CommandError> {
    let mut buf = CommandBuf::new();
    push_str(&mut buf, object)?;
    push_str(&mut buf, ".txt=\"")?;
    push_str(&mut buf, text)?;
    push_str(&mut buf, "\"")?;
    terminate(buf)
}

/// Build a color-set command for a panel object
pub fn color_command(object: &str, color: Color) -> Result<CommandBuf, CommandError> {
    let mut buf = CommandBuf::new();
    push_str(&mut buf, object)?;
    push_str(&mut buf, ".pco=")?;
    push_str(&mut buf, color.wire_name())?;
    terminate(buf)
}

/// Build a raw panel statement (page change, panel-watchdog reset)
pub fn raw_command(statement: &str) -> Result<CommandBuf, CommandError> {
    let mut buf = CommandBuf::new();
    push_str(&mut buf, statement)?;
    terminate(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_command() {
        let cmd = text_command("v0", "104.5").unwrap();
        assert_eq!(&cmd[..], b"v0.txt=\"104.5\"\xff\xff\xff");
    }

    #[test]
    fn test_color_command() {
        let cmd = color_command("v1", Color::Yellow).unwrap();
        assert_eq!(&cmd[..], b"v1.pco=YELLOW\xff\xff\xff");
    }

    #[test]
    fn test_raw_command() {
        let cmd = raw_command("page main0").unwrap();
        assert_eq!(&cmd[..], b"page main0\xff\xff\xff");
    }

    #[test]
    fn test_terminator_always_present() {
        for cmd in [
            text_command("warn", "KNOCK").unwrap(),
            color_command("b3", Color::Stale).unwrap(),
            raw_command("clk.val=0").unwrap(),
        ] {
            assert_eq!(&cmd[cmd.len() - 3..], &COMMAND_TERMINATOR);
        }
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";
        assert_eq!(text_command("v0", long), Err(CommandError::TooLong));
    }
}
