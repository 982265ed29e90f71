use zerocopy::byteorder::big_endian::U32 as U32BE;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::constant::Mode;
use crate::protocol::primitive::{write_int_1, write_int_4};

/// Response frame header (zero-copy)
///
/// Layout matches the FrancoDB wire protocol: a single 4-byte
/// big-endian body length. The request header additionally carries a
/// leading mode byte and is written by [`write_request`].
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable, IntoBytes)]
pub struct FrameHeader {
    length: U32BE,
}

impl FrameHeader {
    pub fn encode(length: usize) -> Self {
        Self {
            length: U32BE::new(length as u32),
        }
    }

    pub fn length(&self) -> usize {
        self.length.get() as usize
    }
}

/// Append a complete request frame: `[mode tag][4-byte BE length][payload]`.
///
/// The caller sends the buffer with a single `write_all`; the frame is
/// never chunked.
pub fn write_request(out: &mut Vec<u8>, mode: Mode, payload: &[u8]) {
    write_int_1(out, mode.as_byte());
    write_int_4(out, payload.len() as u32);
    out.extend_from_slice(payload);
}
