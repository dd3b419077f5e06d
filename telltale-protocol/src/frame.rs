//! Bus frame type shared by the receive and transmit paths.

use heapless::Vec;

/// Maximum payload size of one bus frame in bytes
pub const MAX_FRAME_DATA: usize = 8;

/// Errors that can occur constructing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds the 8-byte frame limit
    PayloadTooLarge,
}

/// One bus frame: numeric identifier plus up to 8 payload bytes.
///
/// `extended` distinguishes 29-bit identifiers from standard 11-bit ones;
/// the wall-clock broadcast is the only extended frame the cluster sends.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusFrame {
    /// Frame identifier
    pub id: u32,
    /// Extended (29-bit) identifier flag
    pub extended: bool,
    /// Payload data
    pub data: Vec<u8, MAX_FRAME_DATA>,
}

impl BusFrame {
    /// Create a new frame with the given identifier and payload
    pub fn new(id: u32, extended: bool, data: &[u8]) -> Result<Self, FrameError> {
        let mut payload = Vec::new();
        payload
            .extend_from_slice(data)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            id,
            extended,
            data: payload,
        })
    }

    /// Create a standard-identifier frame
    pub fn standard(id: u32, data: &[u8]) -> Result<Self, FrameError> {
        Self::new(id, false, data)
    }

    /// Create an extended-identifier frame
    pub fn extended(id: u32, data: &[u8]) -> Result<Self, FrameError> {
        Self::new(id, true, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_construction() {
        let frame = BusFrame::standard(1520, &[0, 0, 0, 0, 0, 0, 0x0B, 0xB8]).unwrap();
        assert_eq!(frame.id, 1520);
        assert!(!frame.extended);
        assert_eq!(frame.data.len(), 8);
    }

    #[test]
    fn test_payload_too_large() {
        let result = BusFrame::standard(1520, &[0u8; 9]);
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_short_payload() {
        let frame = BusFrame::extended(0x935_2838, &[1, 2, 3]).unwrap();
        assert_eq!(frame.data.len(), 3);
        assert!(frame.extended);
    }
}
