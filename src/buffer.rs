/// A pair of reusable buffers for protocol communication.
///
/// `Conn` uses a single `BufferSet` for all its operations, so repeated
/// `execute` calls do not allocate once the buffers have grown to the
/// working size.
#[derive(Debug, Default)]
pub struct BufferSet {
    /// Holds the most recent response body.
    /// Bytes are valid during an operation.
    pub read_buffer: Vec<u8>,

    /// Holds the outbound request frame (mode tag + header + payload).
    /// Bytes are valid during an operation.
    pub write_buffer: Vec<u8>,
}

impl BufferSet {
    pub fn new() -> Self {
        Self {
            read_buffer: Vec::new(),
            write_buffer: Vec::new(),
        }
    }
}
