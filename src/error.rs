use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The server reported a query failure, either through the binary
    /// `0xFF` response or the text-mode `ERROR` marker.
    #[error("Server Error: {0}")]
    ServerError(String),

    /// A LOGIN reply carried no success token. The session is closed
    /// before this is returned.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The session is closed; no I/O was attempted.
    #[error("Database is not connected")]
    NotConnected,

    #[error("Bad config error: {0}")]
    BadConfigError(String),

    /// Binary response body starting with a byte outside {0xFF, 0x01, 0x02}.
    #[error("Unknown response tag: {0:#04x}")]
    UnknownResponseTag(u8),

    /// A body ran out of bytes before satisfying its own declared lengths.
    #[error("Unexpected end of frame")]
    UnexpectedEof,

    /// A body decoded cleanly but left bytes unconsumed, or is otherwise
    /// malformed.
    #[error("Invalid frame")]
    InvalidFrame,

    /// The length prefix exceeds [`crate::constant::MAX_FRAME_SIZE`].
    #[error("Frame length {0} exceeds the protocol limit")]
    FrameTooLarge(usize),

    #[error("Response is not valid UTF-8")]
    InvalidUtf8,
}

impl From<std::convert::Infallible> for Error {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}

impl From<simdutf8::basic::Utf8Error> for Error {
    fn from(_: simdutf8::basic::Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

pub type Result<T> = std::result::Result<T, Error>;
