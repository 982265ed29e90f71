use simdutf8::basic::from_utf8;

use crate::col::Column;
use crate::constant::{Mode, ResponseTag};
use crate::error::{Error, Result};
use crate::protocol::primitive::*;
use crate::value::Value;

/// A decoded server response.
///
/// Server-reported failures never appear here; they surface as
/// [`Error::ServerError`] from the decoder instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Text-mode or JSON-mode body, or a binary simple message. JSON
    /// bodies are returned opaque; this layer performs no JSON parsing.
    Message(String),
    /// Binary-mode table result.
    Table(TableResult),
}

impl Response {
    /// The message text, if this is not a table result.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Response::Message(s) => Some(s),
            Response::Table(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableResult {
    pub columns: Vec<Column>,
    /// Every row has exactly `columns.len()` values.
    pub rows: Vec<Vec<Value>>,
}

impl TableResult {
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Decode a fully-buffered response body according to the request mode.
pub fn decode_response(mode: Mode, body: &[u8]) -> Result<Response> {
    match mode {
        Mode::Text => decode_text_body(body),
        Mode::Json => {
            let text = from_utf8(body)?.trim();
            Ok(Response::Message(text.to_string()))
        }
        Mode::Binary => decode_binary_body(body),
    }
}

/// Text-mode bodies carry no structure; the server signals failure by
/// prefixing the message with `ERROR`. A body starting with `{` is a
/// JSON fallback from the server and is passed through untouched.
fn decode_text_body(body: &[u8]) -> Result<Response> {
    let text = from_utf8(body)?.trim();
    if text.contains("ERROR") && !text.starts_with('{') {
        return Err(Error::ServerError(text.to_string()));
    }
    Ok(Response::Message(text.to_string()))
}

/// Binary response body layout, after the frame length prefix:
///
/// ```text
/// 0xFF  [u32 len][UTF-8 message]                          error
/// 0x01  [u32 len][UTF-8 message]                          simple message
/// 0x02  [u32 num_cols][u32 num_rows]
///       per column: [type byte][u32 len][UTF-8 name]
///       per row, per column: [u32 len][UTF-8 value]       table result
/// ```
///
/// A well-formed body is consumed exactly; trailing bytes are rejected.
fn decode_binary_body(body: &[u8]) -> Result<Response> {
    let (tag, rest) = read_int_1(body)?;
    let tag = ResponseTag::from_u8(tag).ok_or(Error::UnknownResponseTag(tag))?;

    match tag {
        ResponseTag::Err => {
            let (message, rest) = read_string_len4(rest)?;
            expect_consumed(rest)?;
            Err(Error::ServerError(from_utf8(message)?.to_string()))
        }
        ResponseTag::Message => {
            let (message, rest) = read_string_len4(rest)?;
            expect_consumed(rest)?;
            Ok(Response::Message(from_utf8(message)?.to_string()))
        }
        ResponseTag::Table => {
            let (num_cols, rest) = read_int_4(rest)?;
            let (num_rows, mut rest) = read_int_4(rest)?;

            // A zero-column row consumes no body bytes, so the row loop
            // would trust the declared count unchecked.
            if num_cols == 0 && num_rows > 0 {
                return Err(Error::InvalidFrame);
            }

            // The counts are untrusted; sizing comes from actually
            // decoding that many entries, not from pre-allocation.
            let mut columns = Vec::new();
            for _ in 0..num_cols {
                let (type_tag, r) = read_int_1(rest)?;
                let (name, r) = read_string_len4(r)?;
                columns.push(Column::new(from_utf8(name)?.to_string(), type_tag));
                rest = r;
            }

            let mut rows = Vec::new();
            for _ in 0..num_rows {
                let mut row = Vec::new();
                for _ in 0..num_cols {
                    let (cell, r) = read_string_len4(rest)?;
                    row.push(Value::coerce(from_utf8(cell)?));
                    rest = r;
                }
                rows.push(row);
            }

            expect_consumed(rest)?;
            Ok(Response::Table(TableResult { columns, rows }))
        }
    }
}

fn expect_consumed(rest: &[u8]) -> Result<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidFrame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table_body(columns: &[(&str, u8)], rows: &[&[&str]]) -> Vec<u8> {
        let mut body = Vec::new();
        write_int_1(&mut body, ResponseTag::Table as u8);
        write_int_4(&mut body, columns.len() as u32);
        write_int_4(&mut body, rows.len() as u32);
        for (name, type_tag) in columns {
            write_int_1(&mut body, *type_tag);
            write_string_len4(&mut body, name.as_bytes());
        }
        for row in rows {
            for cell in row.iter() {
                write_string_len4(&mut body, cell.as_bytes());
            }
        }
        body
    }

    #[test]
    fn test_decode_error_body() {
        let mut body = vec![0xFF];
        write_string_len4(&mut body, b"table not found");

        let err = decode_binary_body(&body).unwrap_err();
        assert_eq!(err.to_string(), "Server Error: table not found");
    }

    #[test]
    fn test_decode_simple_message() {
        let mut body = vec![0x01];
        write_string_len4(&mut body, b"LOGIN OK (Role: ADMIN)");

        let response = decode_binary_body(&body).unwrap();
        assert_eq!(
            response,
            Response::Message("LOGIN OK (Role: ADMIN)".to_string())
        );
    }

    #[test]
    fn test_decode_table_result() {
        let body = table_body(&[("id", 0), ("name", 0)], &[&["1", "Alice"]]);

        let Response::Table(table) = decode_binary_body(&body).unwrap() else {
            panic!("expected table result");
        };
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.columns[0].name, "id");
        assert_eq!(table.columns[1].name, "name");
        assert_eq!(
            table.rows,
            vec![vec![Value::Int(1), Value::Text("Alice".to_string())]]
        );
    }

    #[test]
    fn test_decode_table_shape() {
        let body = table_body(
            &[("a", 1), ("b", 2), ("c", 3)],
            &[&["1", "2", "3"], &["4", "5", "6"]],
        );

        let Response::Table(table) = decode_binary_body(&body).unwrap() else {
            panic!("expected table result");
        };
        assert_eq!(
            table.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(table.num_rows(), 2);
        for row in &table.rows {
            assert_eq!(row.len(), table.num_columns());
        }
    }

    #[test]
    fn test_decode_table_missing_row_bytes() {
        // Declares two rows but carries only one.
        let mut body = table_body(&[("id", 0)], &[&["1"]]);
        body[5..9].copy_from_slice(&2u32.to_be_bytes());

        let err = decode_binary_body(&body).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof));
    }

    #[test]
    fn test_decode_table_zero_columns_nonzero_rows() {
        // Rows of zero columns are free to decode, so a 9-byte body
        // could otherwise declare millions of them.
        let mut body = vec![ResponseTag::Table as u8];
        write_int_4(&mut body, 0);
        write_int_4(&mut body, 10_000_000);

        let err = decode_binary_body(&body).unwrap_err();
        assert!(matches!(err, Error::InvalidFrame));
    }

    #[test]
    fn test_decode_empty_table() {
        let body = table_body(&[], &[]);

        let Response::Table(table) = decode_binary_body(&body).unwrap() else {
            panic!("expected table result");
        };
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn test_decode_unknown_tag() {
        let err = decode_binary_body(&[0x7E, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::UnknownResponseTag(0x7E)));
    }

    #[test]
    fn test_decode_empty_body() {
        let err = decode_binary_body(&[]).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof));
    }

    #[test]
    fn test_decode_trailing_bytes_rejected() {
        let mut body = vec![0x01];
        write_string_len4(&mut body, b"ok");
        body.push(0xAB);

        let err = decode_binary_body(&body).unwrap_err();
        assert!(matches!(err, Error::InvalidFrame));
    }

    #[test]
    fn test_text_mode_error_heuristic() {
        let err = decode_response(Mode::Text, b"ERROR: Authentication failed\n").unwrap_err();
        assert!(matches!(err, Error::ServerError(_)));
        assert_eq!(err.to_string(), "Server Error: ERROR: Authentication failed");
    }

    #[test]
    fn test_text_mode_json_body_not_an_error() {
        // A `{`-prefixed body is never treated as an error, even if it
        // mentions ERROR somewhere inside.
        let body = br#"{ "success": false, "error": "ERROR: nope" }"#;
        let response = decode_response(Mode::Text, body).unwrap();
        assert!(response.as_message().unwrap().starts_with('{'));
    }

    #[test]
    fn test_text_mode_trims_whitespace() {
        let response = decode_response(Mode::Text, b"Goodbye!\n").unwrap();
        assert_eq!(response, Response::Message("Goodbye!".to_string()));
    }

    #[test]
    fn test_json_mode_is_opaque() {
        let body = br#"{ "success": true, "message": "ERROR counts are fine here" }"#;
        let response = decode_response(Mode::Json, body).unwrap();
        assert_eq!(response.as_message().unwrap(), from_utf8(body).unwrap());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode_response(Mode::Text, &[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8));
    }
}
