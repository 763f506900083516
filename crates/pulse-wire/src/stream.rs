//! Append-only event arena for one frame
//!
//! The stream is a fixed-capacity byte arena plus an index of record
//! start offsets. Records are appended during `tick` and read back by
//! states that run later in the same frame; `reset` rewinds the stream
//! at the start of the next frame without touching the bytes.

use bytes::Bytes;
use pulse_core::{PulseError, PulseResult};

use crate::{EventHeader, EVENT_HEADER_SIZE};

/// Default arena capacity in bytes
pub const DEFAULT_ARENA_CAPACITY: usize = 4096;

/// Per-frame event stream
#[derive(Debug)]
pub struct EventStream {
    /// Byte arena; records are packed back to back
    arena: Box<[u8]>,
    /// Record start offsets, in append order
    offsets: Vec<usize>,
    /// Next free byte in the arena
    cursor: usize,
}

impl EventStream {
    /// Stream with the default arena capacity
    pub fn new() -> Self {
        EventStream::with_capacity(DEFAULT_ARENA_CAPACITY)
    }

    /// Stream with a custom arena capacity
    pub fn with_capacity(capacity: usize) -> Self {
        EventStream {
            arena: vec![0u8; capacity].into_boxed_slice(),
            offsets: Vec::new(),
            cursor: 0,
        }
    }

    /// Arena capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.len()
    }

    /// Number of records appended since the last reset
    #[inline]
    pub fn record_count(&self) -> u32 {
        self.offsets.len() as u32
    }

    /// True if no records were appended since the last reset
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Bytes written since the last reset
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Rewind the stream for a new frame
    ///
    /// Clears the record index and the write cursor. Old bytes stay in
    /// the arena but are unreachable until overwritten. Idempotent.
    pub fn reset(&mut self) {
        self.offsets.clear();
        self.cursor = 0;
    }

    /// Append a record with no payload
    pub fn push(&mut self, kind: u32) -> PulseResult<()> {
        self.push_with(kind, &[])
    }

    /// Append a record with a payload
    ///
    /// The record is rejected whole if it does not fit; a failed append
    /// leaves the stream exactly as it was.
    pub fn push_with(&mut self, kind: u32, payload: &[u8]) -> PulseResult<()> {
        // The header stores the length as u32; longer payloads cannot be
        // encoded no matter how large the arena is.
        let Ok(payload_len) = u32::try_from(payload.len()) else {
            return Err(PulseError::PayloadTooLarge(payload.len()));
        };

        let needed = EVENT_HEADER_SIZE + payload.len();
        let available = self.arena.len() - self.cursor;
        if needed > available {
            return Err(PulseError::CapacityExceeded { needed, available });
        }

        let header = EventHeader::new(self.record_count(), kind, payload_len);
        let start = self.cursor;
        header.serialize(&mut self.arena[start..start + EVENT_HEADER_SIZE])?;
        self.arena[start + EVENT_HEADER_SIZE..start + needed].copy_from_slice(payload);

        self.offsets.push(start);
        self.cursor = start + needed;
        Ok(())
    }

    /// Header of the record at `index`
    fn header_at(&self, index: u32) -> PulseResult<EventHeader> {
        let Some(&start) = self.offsets.get(index as usize) else {
            return Err(PulseError::IndexOutOfRange {
                index,
                len: self.record_count(),
            });
        };
        EventHeader::parse(&self.arena[start..start + EVENT_HEADER_SIZE])
    }

    /// Kind tag of the record at `index`
    pub fn kind_of(&self, index: u32) -> PulseResult<u32> {
        Ok(self.header_at(index)?.kind)
    }

    /// Payload size of the record at `index`
    ///
    /// Callers use this to size the buffer handed to `read_into`.
    pub fn size_of(&self, index: u32) -> PulseResult<usize> {
        Ok(self.header_at(index)?.payload_len as usize)
    }

    /// Copy the payload of the record at `index` into `out`
    ///
    /// Returns the number of bytes copied.
    pub fn read_into(&self, index: u32, out: &mut [u8]) -> PulseResult<usize> {
        let header = self.header_at(index)?;
        let size = header.payload_len as usize;
        if out.len() < size {
            return Err(PulseError::BufferTooShort {
                expected: size,
                actual: out.len(),
            });
        }

        let start = self.offsets[index as usize] + EVENT_HEADER_SIZE;
        out[..size].copy_from_slice(&self.arena[start..start + size]);
        Ok(size)
    }

    /// Owned copy of the payload of the record at `index`
    pub fn payload(&self, index: u32) -> PulseResult<Bytes> {
        let header = self.header_at(index)?;
        let start = self.offsets[index as usize] + EVENT_HEADER_SIZE;
        let end = start + header.payload_len as usize;
        Ok(Bytes::copy_from_slice(&self.arena[start..end]))
    }

    /// True if any record this frame carries the given kind
    ///
    /// Linear scan; per-frame record counts are small.
    pub fn contains_kind(&self, kind: u32) -> bool {
        for i in 0..self.record_count() {
            if matches!(self.kind_of(i), Ok(k) if k == kind) {
                return true;
            }
        }
        false
    }

    /// Bytes written this frame (headers and payloads, back to back)
    pub fn as_bytes(&self) -> &[u8] {
        &self.arena[..self.cursor]
    }
}

impl Default for EventStream {
    fn default() -> Self {
        EventStream::new()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut stream = EventStream::new();

        stream.push_with(7, &[0x41, 0x42]).unwrap();
        stream.push(3).unwrap();

        assert_eq!(stream.record_count(), 2);

        assert_eq!(stream.kind_of(0).unwrap(), 7);
        assert_eq!(stream.size_of(0).unwrap(), 2);
        let mut buf = [0u8; 2];
        assert_eq!(stream.read_into(0, &mut buf).unwrap(), 2);
        assert_eq!(buf, [0x41, 0x42]);

        assert_eq!(stream.kind_of(1).unwrap(), 3);
        assert_eq!(stream.size_of(1).unwrap(), 0);
        assert_eq!(stream.read_into(1, &mut []).unwrap(), 0);
    }

    #[test]
    fn test_sequence_ids_follow_append_order() {
        let mut stream = EventStream::new();
        for kind in 0..4 {
            stream.push(kind).unwrap();
        }

        for i in 0..4 {
            let start = i as usize * EVENT_HEADER_SIZE;
            let header = EventHeader::parse(&stream.as_bytes()[start..]).unwrap();
            assert_eq!(header.seq, i);
            assert_eq!(header.kind, i);
        }
    }

    #[test]
    fn test_record_layout() {
        let mut stream = EventStream::new();
        stream.push_with(9, &[0xAA, 0xBB, 0xCC]).unwrap();

        let bytes = stream.as_bytes();
        assert_eq!(bytes.len(), EVENT_HEADER_SIZE + 3);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[9, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[3, 0, 0, 0]);
        assert_eq!(&bytes[12..], &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_reset_behaves_like_new() {
        let mut stream = EventStream::new();
        stream.push_with(1, b"hello").unwrap();
        stream.push(2).unwrap();

        stream.reset();

        assert_eq!(stream.record_count(), 0);
        assert!(stream.is_empty());
        assert_eq!(stream.len(), 0);
        assert!(matches!(
            stream.kind_of(0),
            Err(PulseError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            stream.read_into(0, &mut [0u8; 16]),
            Err(PulseError::IndexOutOfRange { .. })
        ));

        // Idempotent
        stream.reset();
        assert_eq!(stream.record_count(), 0);
    }

    #[test]
    fn test_capacity_exceeded_leaves_stream_unchanged() {
        let mut stream = EventStream::with_capacity(EVENT_HEADER_SIZE + 4);
        stream.push_with(1, &[1, 2, 3, 4]).unwrap();
        let count = stream.record_count();
        let len = stream.len();

        let result = stream.push(2);
        assert!(matches!(
            result,
            Err(PulseError::CapacityExceeded { needed: 12, available: 0 })
        ));
        assert_eq!(stream.record_count(), count);
        assert_eq!(stream.len(), len);

        // The surviving record is untouched
        assert_eq!(stream.kind_of(0).unwrap(), 1);
        assert_eq!(stream.payload(0).unwrap().as_ref(), &[1, 2, 3, 4]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_payload_len_must_fit_header_field() {
        // Zeroed pages; only the length is ever read
        let huge = vec![0u8; u32::MAX as usize + 1];

        let mut stream = EventStream::new();
        assert!(matches!(
            stream.push_with(1, &huge),
            Err(PulseError::PayloadTooLarge(_))
        ));
        assert_eq!(stream.record_count(), 0);
        assert_eq!(stream.len(), 0);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut stream = EventStream::with_capacity(0);
        assert!(matches!(
            stream.push(1),
            Err(PulseError::CapacityExceeded { needed: 12, available: 0 })
        ));
        assert_eq!(stream.record_count(), 0);
    }

    #[test]
    fn test_contains_kind() {
        let mut stream = EventStream::new();
        stream.push(5).unwrap();
        stream.push_with(9, &[1]).unwrap();

        assert!(stream.contains_kind(5));
        assert!(stream.contains_kind(9));
        assert!(!stream.contains_kind(7));

        stream.reset();
        assert!(!stream.contains_kind(5));
    }

    #[test]
    fn test_read_into_buffer_too_short() {
        let mut stream = EventStream::new();
        stream.push_with(1, &[1, 2, 3, 4]).unwrap();

        let mut buf = [0u8; 2];
        assert!(matches!(
            stream.read_into(0, &mut buf),
            Err(PulseError::BufferTooShort { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_read_into_oversized_buffer() {
        let mut stream = EventStream::new();
        stream.push_with(1, &[7, 8]).unwrap();

        let mut buf = [0xFFu8; 8];
        assert_eq!(stream.read_into(0, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[7, 8]);
    }

    proptest! {
        #[test]
        fn prop_append_then_read_back(
            records in prop::collection::vec(
                (any::<u32>(), prop::collection::vec(any::<u8>(), 0..64)),
                0..32,
            )
        ) {
            let mut stream = EventStream::with_capacity(32 * (EVENT_HEADER_SIZE + 64));
            for (kind, payload) in &records {
                stream.push_with(*kind, payload).unwrap();
            }

            prop_assert_eq!(stream.record_count() as usize, records.len());
            for (i, (kind, payload)) in records.iter().enumerate() {
                let i = i as u32;
                prop_assert_eq!(stream.kind_of(i).unwrap(), *kind);
                prop_assert_eq!(stream.size_of(i).unwrap(), payload.len());
                let owned = stream.payload(i).unwrap();
                prop_assert_eq!(owned.as_ref(), payload.as_slice());
            }
        }
    }
}
