/// Default FrancoDB server port.
pub const DEFAULT_PORT: u16 = 2501;

/// Upper bound on a single frame body. The server refuses payloads above
/// 10MB, so a length prefix beyond this is a protocol violation rather
/// than a large result.
pub const MAX_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Response encoding requested per query.
///
/// The mode byte is the first byte of every request frame.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Text = b'Q',
    Json = b'J',
    Binary = b'B',
}

impl Mode {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// First byte of a binary-mode response body.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTag {
    Err = 0xFF,
    Message = 0x01,
    Table = 0x02,
}

impl ResponseTag {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0xFF => Some(Self::Err),
            0x01 => Some(Self::Message),
            0x02 => Some(Self::Table),
            _ => None,
        }
    }
}
