//! Slice readers and buffer writers for the wire format.
//!
//! Every multi-byte integer on the FrancoDB wire is big-endian (network
//! order), both directions.

use crate::error::{Error, Result};
use zerocopy::FromBytes;
use zerocopy::byteorder::big_endian::U32 as U32BE;

/// Read 1-byte integer
pub fn read_int_1(data: &[u8]) -> Result<(u8, &[u8])> {
    if data.is_empty() {
        return Err(Error::UnexpectedEof);
    }
    Ok((data[0], &data[1..]))
}

/// Read 4-byte big-endian integer
pub fn read_int_4(data: &[u8]) -> Result<(u32, &[u8])> {
    if data.len() < 4 {
        return Err(Error::UnexpectedEof);
    }
    let value = U32BE::ref_from_bytes(&data[..4])
        .map_err(|_| Error::InvalidFrame)?
        .get();
    Ok((value, &data[4..]))
}

/// Read fixed-length string
pub fn read_string_fix(data: &[u8], len: usize) -> Result<(&[u8], &[u8])> {
    if data.len() < len {
        return Err(Error::UnexpectedEof);
    }
    Ok((&data[..len], &data[len..]))
}

/// Read a string prefixed by a 4-byte big-endian length
pub fn read_string_len4(data: &[u8]) -> Result<(&[u8], &[u8])> {
    let (len, rest) = read_int_4(data)?;
    read_string_fix(rest, len as usize)
}

/// Write 1-byte integer
pub fn write_int_1(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Write 4-byte big-endian integer
pub fn write_int_4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Write fixed-length bytes
pub fn write_bytes_fix(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
}

/// Write a string prefixed by a 4-byte big-endian length
pub fn write_string_len4(out: &mut Vec<u8>, data: &[u8]) {
    write_int_4(out, data.len() as u32);
    out.extend_from_slice(data);
}
