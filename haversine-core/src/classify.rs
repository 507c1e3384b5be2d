//! Classification of bare (unquoted) tokens.
//!
//! Rules, in order:
//! - `true` / `false` / `null` → Bool / Null
//! - a token made only of digits, `.` and `-` is numeric and must match
//!   `-?[0-9]+(\.[0-9]+)?`, otherwise it is a [`Error::MalformedToken`]
//! - everything else, including the empty token, is a String

use phf::phf_map;

use crate::error::{Error, Result};
use crate::value::Value;

static LITERALS: phf::Map<&'static str, Value> = phf_map! {
    "true" => Value::Bool(true),
    "false" => Value::Bool(false),
    "null" => Value::Null,
};

/// Classify `token`. `offset` is the token's byte position, used for errors.
pub fn classify(token: &str, offset: usize) -> Result<Value> {
    if let Some(literal) = LITERALS.get(token) {
        return Ok(literal.clone());
    }

    let bytes = token.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(|&b| looks_numeric(b)) {
        return Ok(Value::String(token.to_owned()));
    }

    if !is_strict_number(bytes) {
        return Err(malformed(token, offset));
    }
    token
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| malformed(token, offset))
}

#[inline]
fn looks_numeric(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'-'
}

/// `-?digit+(.digit+)?`
pub fn is_strict_number(bytes: &[u8]) -> bool {
    let rest = bytes.strip_prefix(b"-").unwrap_or(bytes);

    let int_len = digit_run(rest);
    if int_len == 0 {
        return false;
    }

    match &rest[int_len..] {
        [] => true,
        [b'.', frac @ ..] => !frac.is_empty() && digit_run(frac) == frac.len(),
        _ => false,
    }
}

#[inline]
fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn malformed(token: &str, offset: usize) -> Error {
    Error::MalformedToken {
        token: token.to_owned(),
        offset,
    }
}
