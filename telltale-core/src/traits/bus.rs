//! Bus transceiver trait.

use telltale_protocol::BusFrame;

/// Trait for the vehicle bus transceiver.
///
/// All operations are non-blocking: `read_frame` drains at most one frame
/// already sitting in the receive buffer, and `send_frame` hands one frame
/// to the transmit mailbox fire-and-forget - there is no acknowledgement
/// or retry protocol at this layer.
pub trait BusTransport {
    /// True if a received frame is waiting in the buffer
    fn frame_pending(&mut self) -> bool;

    /// Take one waiting frame, if any
    fn read_frame(&mut self) -> Option<BusFrame>;

    /// Queue one frame for transmission
    fn send_frame(&mut self, frame: &BusFrame);
}

impl<B: BusTransport> BusTransport for &mut B {
    fn frame_pending(&mut self) -> bool {
        (**self).frame_pending()
    }

    fn read_frame(&mut self) -> Option<BusFrame> {
        (**self).read_frame()
    }

    fn send_frame(&mut self, frame: &BusFrame) {
        (**self).send_frame(frame);
    }
}
