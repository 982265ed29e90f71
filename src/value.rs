/// A decoded table cell.
///
/// The wire format transmits every cell as a length-prefixed UTF-8 string
/// with no per-cell type tag; the variant is derived client-side by
/// syntactic inspection in [`Value::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Reinterpret a transmitted cell string as the most specific primitive.
    ///
    /// Rules, in order:
    /// - an optional single leading `-` followed by ASCII digits, fitting
    ///   in `i64` → [`Value::Int`]
    /// - parses as `f64` and contains at least one ASCII digit (so bare
    ///   words like `inf` or `nan` stay text) → [`Value::Float`]
    /// - anything else → [`Value::Text`]
    ///
    /// This is a heuristic and necessarily ambiguous: a string-typed cell
    /// that happens to be all digits, e.g. the zip code `"00501"`, comes
    /// back as `Int(501)` with its leading zeros lost. The wire format
    /// gives the client no way to tell the two apart.
    pub fn coerce(s: &str) -> Value {
        if is_integer_literal(s)
            && let Ok(n) = s.parse::<i64>()
        {
            return Value::Int(n);
        }

        if s.bytes().any(|b| b.is_ascii_digit())
            && let Ok(f) = s.parse::<f64>()
        {
            return Value::Float(f);
        }

        Value::Text(s.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// `-?[0-9]+` over ASCII, nothing else.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
