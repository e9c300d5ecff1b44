//! # jsson-core
//!
//! Pure-Rust JSON value tree with a strict RFC 8259 parser, a compact canonical
//! dumper, a UTF-8 codec, and a tagged binary encoding for single scalar values.
//!
//! ## Quick start
//!
//! ```rust
//! use jsson_core::{dump, parse, Value};
//!
//! let json = r#"{"title":"Jsson Demo","count":42,"values":[1,2,3],"active":true}"#;
//! let value = parse(json).unwrap();
//! assert_eq!(value.get("count").unwrap(), &Value::Integer(42));
//!
//! // Text → tree → text is byte-identical for compact input
//! assert_eq!(dump(&value), json);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value`, `Array`, `Object` and typed accessors
//! - [`parser`]: JSON text → `Value`
//! - [`dumper`]: `Value` → compact JSON text
//! - [`utf8`]: UTF-8 validation, encoding and decoding
//! - [`pack`](mod@pack): tagged binary encoding of individual scalars
//! - [`options`]: parser configuration (`ParseOptions`)
//! - [`error`]: `ErrorCode` taxonomy and `JsonError`
//! - [`interop`]: serde / `serde_json` bridges

pub mod dumper;
pub mod error;
pub mod interop;
pub mod options;
pub mod pack;
pub mod parser;
pub mod utf8;
pub mod value;

pub use dumper::{dump, dump_file, dump_to_writer};
pub use error::{error_message, ErrorCode, JsonError, Result};
pub use options::ParseOptions;
pub use pack::{pack, pack_value, unpack, BinaryType};
pub use parser::{
    parse, parse_bytes, parse_bytes_with_options, parse_file, parse_file_with_options,
    parse_with_options,
};
pub use value::{Array, Object, Value, ValueType};
