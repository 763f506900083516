//! Fixed record header for the event stream
//!
//! Every record starts with a 12-byte header:
//! - Bytes 0-3: Sequence number (LE) - 0-based append order in the frame
//! - Bytes 4-7: Record kind (LE) - caller-defined tag
//! - Bytes 8-11: Payload length (LE)
//!
//! The fields are encoded explicitly so the 12-byte contract holds on
//! every platform, never by copying an in-memory struct.

use pulse_core::{PulseError, PulseResult};

/// Record header size in bytes
pub const EVENT_HEADER_SIZE: usize = 12;

/// Record header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventHeader {
    /// 0-based append order within the current frame
    pub seq: u32,
    /// Caller-defined record tag
    pub kind: u32,
    /// Payload length in bytes
    pub payload_len: u32,
}

impl EventHeader {
    pub fn new(seq: u32, kind: u32, payload_len: u32) -> Self {
        EventHeader {
            seq,
            kind,
            payload_len,
        }
    }

    /// Parse a header from bytes
    pub fn parse(buf: &[u8]) -> PulseResult<Self> {
        if buf.len() < EVENT_HEADER_SIZE {
            return Err(PulseError::BufferTooShort {
                expected: EVENT_HEADER_SIZE,
                actual: buf.len(),
            });
        }

        // Bytes 0-3: Sequence number
        let seq = u32::from_le_bytes(buf[0..4].try_into().unwrap());

        // Bytes 4-7: Record kind
        let kind = u32::from_le_bytes(buf[4..8].try_into().unwrap());

        // Bytes 8-11: Payload length
        let payload_len = u32::from_le_bytes(buf[8..12].try_into().unwrap());

        Ok(EventHeader {
            seq,
            kind,
            payload_len,
        })
    }

    /// Serialize the header to bytes
    pub fn serialize(&self, buf: &mut [u8]) -> PulseResult<()> {
        if buf.len() < EVENT_HEADER_SIZE {
            return Err(PulseError::BufferTooShort {
                expected: EVENT_HEADER_SIZE,
                actual: buf.len(),
            });
        }

        // Bytes 0-3: Sequence number
        buf[0..4].copy_from_slice(&self.seq.to_le_bytes());

        // Bytes 4-7: Record kind
        buf[4..8].copy_from_slice(&self.kind.to_le_bytes());

        // Bytes 8-11: Payload length
        buf[8..12].copy_from_slice(&self.payload_len.to_le_bytes());

        Ok(())
    }

    /// Serialize the header to a new array
    pub fn to_bytes(&self) -> [u8; EVENT_HEADER_SIZE] {
        let mut buf = [0u8; EVENT_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.seq.to_le_bytes());
        buf[4..8].copy_from_slice(&self.kind.to_le_bytes());
        buf[8..12].copy_from_slice(&self.payload_len.to_le_bytes());
        buf
    }
}
