//! Single-pass document parser.
//!
//! The driver walks the input once, left to right. Open containers live on
//! an explicit stack of frames; each frame owns its partially built
//! container and, for objects, the key waiting for a nested value. A frame
//! is attached to its parent when its closing bracket is seen, and the
//! first top-level container to close becomes the root.
//!
//! ```
//! use haversine_core::{parse, ValueKind};
//!
//! let root = parse(r#"{"pairs":[{"x0":1.5, "y0":-2}]}"#).unwrap();
//! let pairs = root.field("pairs").unwrap().as_array().unwrap();
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].field("y0").unwrap().get::<f64>().unwrap(), -2.0);
//! assert_eq!(root.kind(), ValueKind::Object);
//! ```
//!
//! Input that ends early is not an error: open frames are unwound at end of
//! input and whatever was built so far is returned. Containers that never
//! received an entry are dropped during that unwind, so `{` alone parses
//! to `Null`.

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::scanner::Scanner;
use crate::value::{Value, ValueKind};

/// Default limit on open containers.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open containers. Opening one more
    /// fails with [`Error::UnsupportedNesting`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse `text` with default options.
pub fn parse(text: &str) -> Result<Value> {
    parse_with(text, ParseOptions::default())
}

/// Parse `text` with explicit options.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Value> {
    Parser::new(text, options).run()
}

/// An open container.
#[derive(Debug)]
struct Frame {
    container: Value,
    /// Key under which the next nested container is stored (objects only).
    pending: Option<String>,
}

impl Frame {
    fn new(container: Value) -> Self {
        Frame {
            container,
            pending: None,
        }
    }

    fn is_empty(&self) -> bool {
        match &self.container {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => true,
        }
    }

    fn closes_with(&self, b: u8) -> bool {
        matches!(
            (self.container.kind(), b),
            (ValueKind::Object, b'}') | (ValueKind::Array, b']')
        )
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    stack: Vec<Frame>,
    root: Value,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, options: ParseOptions) -> Self {
        Parser {
            scanner: Scanner::new(text),
            stack: Vec::new(),
            root: Value::Null,
            max_depth: options.max_depth,
        }
    }

    fn run(mut self) -> Result<Value> {
        loop {
            self.scanner.skip_whitespace();
            let Some(b) = self.scanner.peek() else {
                break;
            };

            match b {
                b'{' => self.open(Value::object())?,
                b'[' => self.open(Value::array())?,
                b'}' | b']' => {
                    self.scanner.bump();
                    if self.close(b)? {
                        // Root container complete; trailing text is ignored.
                        return Ok(self.root);
                    }
                }
                b'"' => self.quoted()?,
                b',' | b':' => self.scanner.bump(),
                _ if self.top_kind() == Some(ValueKind::Array) => self.element_token()?,
                _ => self.scanner.bump(),
            }
        }

        self.finish()
    }

    fn top_kind(&self) -> Option<ValueKind> {
        self.stack.last().map(|frame| frame.container.kind())
    }

    fn open(&mut self, container: Value) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Error::UnsupportedNesting {
                depth: self.stack.len() + 1,
                offset: self.scanner.pos(),
            });
        }
        self.stack.push(Frame::new(container));
        self.scanner.bump();
        Ok(())
    }

    /// Handle a closing bracket. Returns `true` once the root is complete.
    fn close(&mut self, b: u8) -> Result<bool> {
        match self.stack.last() {
            Some(frame) if frame.closes_with(b) => {}
            // Stray or mismatched closer.
            _ => return Ok(false),
        }
        if let Some(frame) = self.stack.pop() {
            self.attach(frame.container)?;
        }
        Ok(self.stack.is_empty())
    }

    /// Store a finished container in its parent, or make it the root.
    fn attach(&mut self, child: Value) -> Result<()> {
        let Some(parent) = self.stack.last_mut() else {
            self.root = child;
            return Ok(());
        };
        match parent.container.kind() {
            ValueKind::Array => parent.container.as_array_mut()?.push(child),
            _ => {
                if let Some(key) = parent.pending.take() {
                    *parent.container.field_mut(&key)? = child;
                }
            }
        }
        Ok(())
    }

    fn quoted(&mut self) -> Result<()> {
        match self.top_kind() {
            Some(ValueKind::Object) => self.member(),
            Some(_) => {
                let text = self.scanner.scan_quoted_string();
                self.push_element(Value::from(text))?;
                self.scanner.bump();
                Ok(())
            }
            None => {
                // Quoted text outside any container carries no structure.
                self.scanner.scan_key();
                self.scanner.bump();
                Ok(())
            }
        }
    }

    /// `"key" : value` inside an object.
    fn member(&mut self) -> Result<()> {
        let key = self.scanner.scan_key();
        self.scanner.bump();
        self.set_field(key, Value::Null)?;

        self.scanner.scan_to_colon();
        if self.scanner.peek() != Some(b':') {
            return Ok(());
        }
        self.scanner.bump();
        self.scanner.skip_whitespace();

        match self.scanner.peek() {
            Some(b'"') => {
                let text = self.scanner.scan_quoted_string();
                self.set_field(key, Value::from(text))?;
                self.scanner.bump();
            }
            Some(b'{' | b'[') => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.pending = Some(key.to_owned());
                }
            }
            Some(b',' | b'}' | b']') | None => {}
            Some(_) => {
                if let Some(value) = self.bare_value()? {
                    self.set_field(key, value)?;
                }
            }
        }
        Ok(())
    }

    /// Bare token inside an array.
    fn element_token(&mut self) -> Result<()> {
        match self.bare_value()? {
            Some(value) => self.push_element(value),
            None => Ok(()),
        }
    }

    /// Scan and classify a bare token. A malformed token that runs into end
    /// of input was cut off, and is dropped like the rest of the truncated
    /// tail instead of failing the parse.
    fn bare_value(&mut self) -> Result<Option<Value>> {
        let offset = self.scanner.pos();
        let token = self.scanner.scan_unquoted_token();
        match classify(token, offset) {
            Ok(value) => Ok(Some(value)),
            Err(Error::MalformedToken { .. }) if self.scanner.is_eof() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<()> {
        if let Some(frame) = self.stack.last_mut() {
            *frame.container.field_mut(key)? = value;
        }
        Ok(())
    }

    fn push_element(&mut self, value: Value) -> Result<()> {
        if let Some(frame) = self.stack.last_mut() {
            frame.container.as_array_mut()?.push(value);
        }
        Ok(())
    }

    /// End of input with containers still open.
    fn finish(mut self) -> Result<Value> {
        while let Some(frame) = self.stack.pop() {
            if frame.is_empty() {
                continue;
            }
            self.attach(frame.container)?;
        }
        Ok(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn obj(entries: &[(&str, Value)]) -> Value {
        let mut v = Value::object();
        for (k, val) in entries {
            *v.field_mut(k).unwrap() = val.clone();
        }
        v
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(parse("").unwrap(), Value::Null);
        assert_eq!(parse(" \n\t").unwrap(), Value::Null);
    }

    #[test]
    fn test_lone_brackets() {
        for input in ["{", "}", "[", "]", "}{", "]]"] {
            assert_eq!(parse(input).unwrap(), Value::Null, "input {input:?}");
        }
    }

    #[test]
    fn test_truncated_object_keeps_members() {
        assert_eq!(parse(r#"{"a":1"#).unwrap(), obj(&[("a", Value::from(1))]));
        assert_eq!(parse(r#"{"a":1,"b"#).unwrap(), obj(&[("a", Value::from(1)), ("b", Value::Null)]));
        assert_eq!(parse(r#"{"a":"unterminated"#).unwrap(), obj(&[("a", Value::from("unterminated"))]));
        assert_eq!(parse(r#"{"a""#).unwrap(), obj(&[("a", Value::Null)]));
    }

    #[test]
    fn test_truncated_array() {
        let v = parse(r#"{"pairs":[{"x0":1},{"x0":2"#).unwrap();
        let pairs = v.field("pairs").unwrap().as_array().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].field("x0").unwrap().get::<f64>().unwrap(), 2.0);

        // The nested empty container is dropped but its key remains.
        assert_eq!(parse(r#"{"a":[{"#).unwrap(), obj(&[("a", Value::Null)]));
    }

    #[test]
    fn test_nested_objects() {
        let v = parse(r#"{"outer":{"inner":{"leaf":true}},"after":3}"#).unwrap();
        let leaf = v
            .field("outer").unwrap()
            .field("inner").unwrap()
            .field("leaf").unwrap();
        assert_eq!(leaf.get::<bool>().unwrap(), true);
        assert_eq!(v.field("after").unwrap().get::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_arrays_of_arrays_and_scalars() {
        let v = parse(r#"[[1, 2], [], ["a", true, null], -0.5]"#).unwrap();
        assert_eq!(
            v,
            Value::from(vec![
                Value::from(vec![Value::from(1), Value::from(2)]),
                Value::array(),
                Value::from(vec![Value::from("a"), Value::from(true), Value::Null]),
                Value::from(-0.5),
            ])
        );
    }

    #[test]
    fn test_number_before_array_close() {
        let v = parse(r#"{"a":[1,2],"b":3}"#).unwrap();
        assert_eq!(v.field("a").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(v.field("b").unwrap().get::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_last_write_wins() {
        let v = parse(r#"{"k":1,"k":"two"}"#).unwrap();
        assert_eq!(v.as_object().unwrap().len(), 1);
        assert_eq!(v.field("k").unwrap().get::<&str>().unwrap(), "two");
    }

    #[test]
    fn test_quoted_values_stay_strings() {
        let v = parse(r#"{"a":"true","b":"12"}"#).unwrap();
        assert_eq!(v.field("a").unwrap().kind(), ValueKind::String);
        assert_eq!(v.field("b").unwrap().kind(), ValueKind::String);
    }

    #[test]
    fn test_trailing_text_ignored() {
        let v = parse(r#"{"a":1} {"b":2}"#).unwrap();
        assert_eq!(v, obj(&[("a", Value::from(1))]));
    }

    #[test]
    fn test_mismatched_closer_ignored() {
        let v = parse(r#"{"a":1]}"#).unwrap();
        assert_eq!(v, obj(&[("a", Value::from(1))]));
    }

    #[test]
    fn test_missing_value_left_null() {
        let v = parse(r#"{"a":,"b":2,"c": }"#).unwrap();
        assert_eq!(v.field("a").unwrap(), &Value::Null);
        assert_eq!(v.field("b").unwrap().get::<f64>().unwrap(), 2.0);
        assert_eq!(v.field("c").unwrap(), &Value::Null);
    }

    #[test]
    fn test_bare_values_agree_in_objects_and_arrays() {
        for token in [".5", "+1", "abc", "?", "nil", "1.", "-", "12", "true"] {
            let in_object = parse(&format!(r#"{{"a":{token},"b":0}}"#))
                .map(|v| v.field("a").unwrap().clone());
            let in_array = parse(&format!("[{token},0]"))
                .map(|v| v.as_array().unwrap()[0].clone());
            match (in_object, in_array) {
                (Ok(a), Ok(b)) => assert_eq!(a, b, "token {token:?}"),
                (Err(Error::MalformedToken { token: a, .. }), Err(Error::MalformedToken { token: b, .. })) => {
                    assert_eq!(a, token);
                    assert_eq!(b, token);
                }
                (a, b) => panic!("token {token:?}: object {a:?}, array {b:?}"),
            }
        }

        assert!(matches!(parse(r#"{"a":.5}"#), Err(Error::MalformedToken { .. })));
        assert_eq!(parse(r#"{"a":abc}"#).unwrap(), obj(&[("a", Value::from("abc"))]));
        assert_eq!(parse(r#"{"a":+1}"#).unwrap(), obj(&[("a", Value::from("+1"))]));
    }

    #[test]
    fn test_malformed_token_offset() {
        let err = parse(r#"{"a":1.2.3}"#).unwrap_err();
        match err {
            Error::MalformedToken { token, offset } => {
                assert_eq!(token, "1.2.3");
                assert_eq!(offset, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse("[--5]"), Err(Error::MalformedToken { .. })));
    }

    #[test]
    fn test_token_cut_by_end_of_input() {
        assert_eq!(parse(r#"{"a":1,"b":-"#).unwrap(), obj(&[("a", Value::from(1)), ("b", Value::Null)]));
        assert_eq!(parse("[1, 2.").unwrap(), Value::from(vec![Value::from(1)]));
        // A complete prefix is still a number.
        assert_eq!(parse("[1, 2.5").unwrap(), Value::from(vec![Value::from(1), Value::from(2.5)]));
    }

    #[test]
    fn test_depth_limit() {
        let shallow = ParseOptions { max_depth: 2 };
        assert!(parse_with(r#"{"pairs":[{"x":1}]}"#, shallow).is_err());
        assert!(parse_with(r#"{"pairs":[1,2]}"#, shallow).is_ok());

        let err = parse_with("[[[", ParseOptions { max_depth: 2 }).unwrap_err();
        assert!(matches!(err, Error::UnsupportedNesting { depth: 3, offset: 2 }));

        let deep = "[".repeat(DEFAULT_MAX_DEPTH + 1);
        assert!(matches!(parse(&deep), Err(Error::UnsupportedNesting { .. })));
    }

    #[test]
    fn test_top_level_scalars_ignored() {
        assert_eq!(parse(r#""just text""#).unwrap(), Value::Null);
        assert_eq!(parse("42").unwrap(), Value::Null);
        assert_eq!(parse(r#""k": [1]"#).unwrap(), Value::from(vec![Value::from(1)]));
    }
}
