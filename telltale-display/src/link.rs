//! Display link trait.

/// Byte sink carrying encoded commands to the panel.
///
/// The panel never acknowledges anything, so writes are fire-and-forget and
/// must not block: implementations either queue the bytes for a bounded
/// serial transmit or drop the command on overflow.
pub trait DisplayLink {
    /// Write one complete encoded command (terminator included)
    fn write(&mut self, command: &[u8]);
}

impl<L: DisplayLink> DisplayLink for &mut L {
    fn write(&mut self, command: &[u8]) {
        (**self).write(command);
    }
}
