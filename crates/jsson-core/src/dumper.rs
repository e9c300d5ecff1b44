//! Compact JSON serializer.
//!
//! Walks a [`Value`] depth-first and emits canonical compact text: no whitespace
//! between tokens, object members in iteration (insertion) order.
//!
//! - Integers are written in exact decimal.
//! - Reals use the shortest text that parses back to the same `f64`, and always
//!   contain a `.` or an exponent so they re-parse as reals. Non-finite reals have
//!   no JSON form and are written as `null`.
//! - Strings escape `"`, `\` and every control character below `U+0020`.
//!
//! Dumping into memory cannot fail.
//!
//! # Example
//! ```
//! use jsson_core::{dump, Object, Value};
//! let mut obj = Object::new();
//! obj.insert("name", "Alice");
//! obj.insert("scores", Value::from(vec![Value::from(95), Value::from(87.5)]));
//! assert_eq!(dump(&Value::Object(obj)), r#"{"name":"Alice","scores":[95,87.5]}"#);
//! ```

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{ErrorCode, JsonError, Result};
use crate::value::{Array, Object, Value};

/// Serialize `value` to compact JSON text.
pub fn dump(value: &Value) -> String {
    let mut out = String::new();
    dump_value(value, &mut out);
    out
}

/// Serialize `value` into an `io::Write` sink.
pub fn dump_to_writer<W: io::Write>(value: &Value, mut writer: W) -> io::Result<()> {
    writer.write_all(dump(value).as_bytes())
}

/// Serialize `value` into the file at `path`, creating or truncating it. A file
/// that cannot be written fails with `CannotOpenFile`.
pub fn dump_file(value: &Value, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "writing JSON file");
    std::fs::write(path, dump(value)).map_err(|e| {
        JsonError::new(
            ErrorCode::CannotOpenFile,
            format!("{}: {}", path.display(), e),
        )
    })
}

fn dump_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(true) => out.push_str("true"),
        Value::Boolean(false) => out.push_str("false"),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Real(f) => dump_real(*f, out),
        Value::String(s) => dump_string(s, out),
        Value::Array(arr) => dump_array(arr, out),
        Value::Object(obj) => dump_object(obj, out),
    }
}

fn dump_real(f: f64, out: &mut String) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    // `{:?}` prints the shortest round-trip digits and keeps ".0" / "e" markers.
    out.push_str(&format!("{f:?}"));
}

fn dump_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn dump_array(arr: &Array, out: &mut String) {
    out.push('[');
    for (i, item) in arr.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        dump_value(item, out);
    }
    out.push(']');
}

fn dump_object(obj: &Object, out: &mut String) {
    out.push('{');
    for (i, (key, value)) in obj.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        dump_string(key, out);
        out.push(':');
        dump_value(value, out);
    }
    out.push('}');
}
