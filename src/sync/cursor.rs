use std::io::Write;

use crate::constant::Mode;
use crate::error::{Error, Result};
use crate::protocol::packet::write_request;
use crate::protocol::response::{Response, decode_response};

use super::conn::{Conn, read_frame};

/// Raw bytes of the most recent request/response exchange.
///
/// Supplied by the caller when wire-level diagnostics are wanted; the
/// plain [`Cursor::execute`] path keeps no copy of the exchange.
#[derive(Debug, Default, Clone)]
pub struct WireCapture {
    /// The full request frame, header included.
    pub request: Vec<u8>,
    /// The response body, after the length prefix.
    pub response: Vec<u8>,
}

impl WireCapture {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, request: &[u8], response: &[u8]) {
        self.request.clear();
        self.request.extend_from_slice(request);
        self.response.clear();
        self.response.extend_from_slice(response);
    }
}

/// Handles query execution against the owning [`Conn`].
///
/// Strictly request/response: `execute` does not return until the full
/// response frame has been read and decoded, so there is no pipelining.
pub struct Cursor<'conn> {
    conn: &'conn mut Conn,
}

impl<'conn> Cursor<'conn> {
    pub(crate) fn new(conn: &'conn mut Conn) -> Self {
        Self { conn }
    }

    /// Execute an FQL statement and decode the response per `mode`.
    pub fn execute(&mut self, fql: &str, mode: Mode) -> Result<Response> {
        self.execute_inner(fql, mode, None)
    }

    /// Like [`Cursor::execute`], additionally copying the raw exchange
    /// bytes into `capture` for inspection.
    pub fn execute_captured(
        &mut self,
        fql: &str,
        mode: Mode,
        capture: &mut WireCapture,
    ) -> Result<Response> {
        self.execute_inner(fql, mode, Some(capture))
    }

    #[tracing::instrument(skip_all)]
    fn execute_inner(
        &mut self,
        fql: &str,
        mode: Mode,
        capture: Option<&mut WireCapture>,
    ) -> Result<Response> {
        let conn = &mut *self.conn;
        let stream = conn.stream.as_mut().ok_or(Error::NotConnected)?;

        let write_buffer = &mut conn.buffer_set.write_buffer;
        write_buffer.clear();
        write_request(write_buffer, mode, fql.as_bytes());

        stream.get_mut().write_all(write_buffer)?;
        stream.get_mut().flush()?;

        let read_buffer = &mut conn.buffer_set.read_buffer;
        read_frame(stream, read_buffer)?;

        if let Some(capture) = capture {
            capture.record(write_buffer, read_buffer);
        }

        decode_response(mode, read_buffer)
    }
}
