//! Shared test doubles for the core crate's unit tests.

use heapless::Vec;
use telltale_display::DisplayLink;

/// Display link that records every command written to it
pub struct RecordingLink {
    pub commands: Vec<Vec<u8, 48>, 64>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Number of commands written so far
    pub fn count(&self) -> usize {
        self.commands.len()
    }

    /// Last command as text (commands are ASCII plus the terminator)
    pub fn last_str(&self) -> &str {
        let last = self.commands.last().expect("no commands written");
        core::str::from_utf8(&last[..last.len() - 3]).expect("non-ascii command")
    }

    /// True if any recorded command contains the given text
    pub fn saw(&self, needle: &str) -> bool {
        self.commands.iter().any(|cmd| {
            core::str::from_utf8(&cmd[..cmd.len() - 3])
                .map(|s| s.contains(needle))
                .unwrap_or(false)
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DisplayLink for RecordingLink {
    fn write(&mut self, command: &[u8]) {
        let mut stored = Vec::new();
        let _ = stored.extend_from_slice(command);
        let _ = self.commands.push(stored);
    }
}
