use std::io::Read;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use zerocopy::{FromZeros, IntoBytes};

use crate::buffer::BufferSet;
use crate::constant::{MAX_FRAME_SIZE, Mode};
use crate::error::{Error, Result};
use crate::protocol::packet::FrameHeader;
use crate::protocol::response::Response;

use super::cursor::Cursor;

/// A session with a FrancoDB server.
///
/// The connection owns the socket exclusively; [`Cursor`]s borrow it
/// mutably, so at most one request is in flight at a time and there is no
/// internal locking. Callers sharing a `Conn` across threads wrap it in
/// their own mutual exclusion.
pub struct Conn {
    pub(crate) stream: Option<std::io::BufReader<TcpStream>>,
    pub(crate) buffer_set: BufferSet,
}

impl Conn {
    /// Create a new FrancoDB connection from connection options or a
    /// `maayn://` URL.
    ///
    /// Connects within `opts.timeout`, then performs the optional LOGIN
    /// and USE steps through an internal cursor.
    pub fn new<O: TryInto<crate::opts::Opts>>(opts: O) -> Result<Self>
    where
        Error: From<O::Error>,
    {
        let opts: crate::opts::Opts = opts.try_into()?;

        let host = opts.host.as_ref().ok_or_else(|| {
            Error::BadConfigError("Missing host in connection options".to_string())
        })?;

        let stream = connect_stream(host, opts.port, opts.timeout)?;
        stream.set_nodelay(opts.tcp_nodelay)?;
        stream.set_read_timeout(opts.timeout)?;
        stream.set_write_timeout(opts.timeout)?;

        let mut conn = Self {
            stream: Some(std::io::BufReader::new(stream)),
            buffer_set: BufferSet::new(),
        };

        // LOGIN is only attempted with full credentials; a user without
        // a password connects anonymously.
        if !opts.user.is_empty()
            && let Some(password) = opts.password.as_deref()
        {
            conn.login(&opts.user, password)?;
        }

        if let Some(db) = &opts.db {
            conn.use_database(db)?;
        }

        Ok(conn)
    }

    /// Authenticate by sending a `LOGIN` query.
    ///
    /// The server acknowledges with a message containing `OK` or
    /// `SUCCESS`. Any other outcome closes the session and returns
    /// [`Error::AuthFailed`]; a session is never left half-authenticated.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let fql = format!("LOGIN {} {};\n", username, password);

        // Scrutinee temporaries live for the whole match; the cursor
        // borrow must end before the arms can call close().
        let outcome = self.cursor().execute(&fql, Mode::Text);

        match outcome {
            Ok(Response::Message(text))
                if text.contains("OK") || text.contains("SUCCESS") =>
            {
                Ok(())
            }
            Ok(Response::Message(text)) => {
                self.close();
                Err(Error::AuthFailed(text))
            }
            Ok(Response::Table(_)) => {
                self.close();
                Err(Error::AuthFailed(
                    "unexpected table result for LOGIN".to_string(),
                ))
            }
            Err(Error::ServerError(message)) => {
                self.close();
                Err(Error::AuthFailed(message))
            }
            Err(err) => {
                self.close();
                Err(err)
            }
        }
    }

    /// Switch the session to another database.
    pub fn use_database(&mut self, database: &str) -> Result<()> {
        let fql = format!("USE {};\n", database);
        self.cursor().execute(&fql, Mode::Text)?;
        Ok(())
    }

    /// Factory method to create a cursor borrowing this connection.
    pub fn cursor(&mut self) -> Cursor<'_> {
        Cursor::new(self)
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Close the session. Idempotent: closing twice, or a session that
    /// never connected, is a no-op. Shuts the socket down both ways so a
    /// read blocked in another thread fails instead of hanging.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.get_ref().shutdown(Shutdown::Both);
        }
    }
}

impl Drop for Conn {
    fn drop(&mut self) {
        self.close();
    }
}

fn connect_stream(host: &str, port: u16, timeout: Option<Duration>) -> Result<TcpStream> {
    let mut last_err = None;

    for addr in (host, port).to_socket_addrs()? {
        let attempt = match timeout {
            Some(limit) => TcpStream::connect_timeout(&addr, limit),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }

    Err(last_err
        .unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
        })
        .into())
}

/// Read one response frame into `buffer`, replacing its contents.
///
/// Reads the 4-byte big-endian length prefix, then exactly that many body
/// bytes, looping across however many deliveries the transport needs.
/// End-of-stream before the body is complete surfaces as the underlying
/// IO error; no partial body is ever returned.
#[tracing::instrument(skip_all)]
pub fn read_frame<R: Read>(reader: &mut R, buffer: &mut Vec<u8>) -> Result<usize> {
    let mut header = FrameHeader::new_zeroed();
    reader.read_exact(header.as_mut_bytes())?;

    let length = header.length();
    if length > MAX_FRAME_SIZE {
        return Err(Error::FrameTooLarge(length));
    }

    buffer.clear();
    buffer.resize(length, 0);
    reader.read_exact(buffer)?;

    Ok(length)
}
