//! Tagged binary encoding for individual scalar and string values.
//!
//! Each unit is one tag byte followed by a fixed-layout payload:
//!
//! | Tag | Type | Payload |
//! |---|---|---|
//! | `i` | Integer | 8 bytes, big-endian two's complement |
//! | `d` | Real | 8 bytes, big-endian IEEE-754 bit pattern |
//! | `b` | Boolean | 1 byte, `0` or `1` |
//! | `s` | String | 4-byte big-endian length, then that many UTF-8 bytes |
//! | `N` | Null | none |
//! | `E` | Error | 4-byte big-endian [`ErrorCode`] number |
//!
//! The tag set is its own wire contract: [`BinaryType`] is not the same thing as
//! [`ValueType`](crate::ValueType), and a value is only packed under a tag whose
//! payload shape matches it exactly.
//!
//! # Example
//! ```
//! use jsson_core::pack::{pack, unpack, BinaryType};
//! let bytes = pack(BinaryType::String, "example").unwrap();
//! let mut pos = 0;
//! let s: String = unpack(&bytes, &mut pos).unwrap();
//! assert_eq!(s, "example");
//! assert_eq!(pos, 12);
//! ```

use std::fmt;

use crate::error::{ErrorCode, JsonError, Result};
use crate::utf8;
use crate::value::Value;

/// Tag byte identifying a unit's payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BinaryType {
    Integer = b'i',
    Real = b'd',
    Boolean = b'b',
    String = b's',
    Null = b'N',
    Error = b'E',
}

impl BinaryType {
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'i' => Some(BinaryType::Integer),
            b'd' => Some(BinaryType::Real),
            b'b' => Some(BinaryType::Boolean),
            b's' => Some(BinaryType::String),
            b'N' => Some(BinaryType::Null),
            b'E' => Some(BinaryType::Error),
            _ => None,
        }
    }

    /// The natural tag for a scalar value; `None` for arrays and objects.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(BinaryType::Null),
            Value::Boolean(_) => Some(BinaryType::Boolean),
            Value::Integer(_) => Some(BinaryType::Integer),
            Value::Real(_) => Some(BinaryType::Real),
            Value::String(_) => Some(BinaryType::String),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BinaryType::Integer => "integer",
            BinaryType::Real => "real",
            BinaryType::Boolean => "boolean",
            BinaryType::String => "string",
            BinaryType::Null => "null",
            BinaryType::Error => "error",
        }
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime shape of a value, as seen by the codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(&'a str),
    /// Raw bytes offered as a string; validated before packing.
    Bytes(&'a [u8]),
    Error(ErrorCode),
}

impl Scalar<'_> {
    /// The tag whose payload shape fits this scalar.
    pub fn binary_type(&self) -> BinaryType {
        match self {
            Scalar::Null => BinaryType::Null,
            Scalar::Boolean(_) => BinaryType::Boolean,
            Scalar::Integer(_) => BinaryType::Integer,
            Scalar::Real(_) => BinaryType::Real,
            Scalar::Text(_) | Scalar::Bytes(_) => BinaryType::String,
            Scalar::Error(_) => BinaryType::Error,
        }
    }
}

/// Types that can be offered to [`pack`].
pub trait Pack {
    /// This value's scalar shape, or `None` if it has no binary form.
    fn to_scalar(&self) -> Option<Scalar<'_>>;
}

impl Pack for i64 {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Integer(*self))
    }
}

impl Pack for i32 {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Integer(i64::from(*self)))
    }
}

impl Pack for f64 {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Real(*self))
    }
}

impl Pack for bool {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Boolean(*self))
    }
}

impl Pack for str {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Text(self))
    }
}

impl Pack for String {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Text(self))
    }
}

impl Pack for [u8] {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Bytes(self))
    }
}

impl Pack for () {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Null)
    }
}

impl Pack for ErrorCode {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Error(*self))
    }
}

impl<T: Pack> Pack for Option<T> {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Some(inner) => inner.to_scalar(),
            None => Some(Scalar::Null),
        }
    }
}

impl Pack for Value {
    fn to_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Value::Null => Some(Scalar::Null),
            Value::Boolean(b) => Some(Scalar::Boolean(*b)),
            Value::Integer(n) => Some(Scalar::Integer(*n)),
            Value::Real(f) => Some(Scalar::Real(*f)),
            Value::String(s) => Some(Scalar::Text(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Encode `value` as one unit tagged `ty`.
///
/// Fails with `InvalidArgument` when the value's shape does not match `ty` (or it
/// has no binary form at all), and with `InvalidUTF8` for raw byte strings that
/// are not valid UTF-8.
pub fn pack<T: Pack + ?Sized>(ty: BinaryType, value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    pack_into(ty, value, &mut out)?;
    Ok(out)
}

/// Append one unit to `out`. Nothing is written on failure.
pub fn pack_into<T: Pack + ?Sized>(ty: BinaryType, value: &T, out: &mut Vec<u8>) -> Result<()> {
    let scalar = value.to_scalar().ok_or_else(|| {
        JsonError::new(
            ErrorCode::InvalidArgument,
            format!("arrays and objects cannot be packed as {ty}"),
        )
    })?;

    match (ty, scalar) {
        (BinaryType::Integer, Scalar::Integer(n)) => {
            out.push(ty.tag());
            out.extend_from_slice(&n.to_be_bytes());
        }
        (BinaryType::Real, Scalar::Real(f)) => {
            out.push(ty.tag());
            out.extend_from_slice(&f.to_bits().to_be_bytes());
        }
        (BinaryType::Boolean, Scalar::Boolean(b)) => {
            out.push(ty.tag());
            out.push(u8::from(b));
        }
        (BinaryType::String, Scalar::Text(s)) => write_string(s.as_bytes(), out)?,
        (BinaryType::String, Scalar::Bytes(raw)) => {
            if !utf8::is_valid(raw) {
                return Err(JsonError::new(
                    ErrorCode::InvalidUTF8,
                    "string payload is not valid UTF-8",
                ));
            }
            write_string(raw, out)?;
        }
        (BinaryType::Null, Scalar::Null) => out.push(ty.tag()),
        (BinaryType::Error, Scalar::Error(code)) => {
            out.push(ty.tag());
            out.extend_from_slice(&code.as_u32().to_be_bytes());
        }
        (ty, scalar) => {
            return Err(JsonError::new(
                ErrorCode::InvalidArgument,
                format!("cannot pack {} value as {ty}", scalar.binary_type()),
            ));
        }
    }
    Ok(())
}

fn write_string(bytes: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| {
        JsonError::new(
            ErrorCode::InvalidArgument,
            format!("string of {} bytes exceeds the 32-bit length field", bytes.len()),
        )
    })?;
    out.push(BinaryType::String.tag());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

/// Pack a scalar value under its natural tag (see [`BinaryType::of`]).
pub fn pack_value(value: &Value) -> Result<Vec<u8>> {
    let ty = BinaryType::of(value).ok_or_else(|| {
        JsonError::new(
            ErrorCode::InvalidArgument,
            format!("{} values have no binary form", value.value_type()),
        )
    })?;
    pack(ty, value)
}

/// Types that [`unpack`] can produce.
pub trait Unpack: Sized {
    /// Convert a decoded unit, failing with `WrongType` when the unit's tag does
    /// not fit `Self`.
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self>;
}

fn wrong_unit(expected: &str, found: &Scalar<'_>) -> JsonError {
    JsonError::new(
        ErrorCode::WrongType,
        format!("expected {expected} unit, found {}", found.binary_type()),
    )
}

impl Unpack for i64 {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Integer(n) => Ok(n),
            other => Err(wrong_unit("integer", &other)),
        }
    }
}

impl Unpack for f64 {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Real(f) => Ok(f),
            other => Err(wrong_unit("real", &other)),
        }
    }
}

impl Unpack for bool {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Boolean(b) => Ok(b),
            other => Err(wrong_unit("boolean", &other)),
        }
    }
}

impl Unpack for String {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Text(s) => Ok(s.to_string()),
            other => Err(wrong_unit("string", &other)),
        }
    }
}

impl Unpack for () {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Null => Ok(()),
            other => Err(wrong_unit("null", &other)),
        }
    }
}

impl Unpack for ErrorCode {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Error(code) => Ok(code),
            other => Err(wrong_unit("error", &other)),
        }
    }
}

impl<T: Unpack> Unpack for Option<T> {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Null => Ok(None),
            other => T::from_scalar(other).map(Some),
        }
    }
}

/// Any non-error unit. An `Error` unit surfaces its carried code as the failure.
impl Unpack for Value {
    fn from_scalar(scalar: Scalar<'_>) -> Result<Self> {
        match scalar {
            Scalar::Null => Ok(Value::Null),
            Scalar::Boolean(b) => Ok(Value::Boolean(b)),
            Scalar::Integer(n) => Ok(Value::Integer(n)),
            Scalar::Real(f) => Ok(Value::Real(f)),
            Scalar::Text(s) => Ok(Value::String(s.to_string())),
            Scalar::Bytes(raw) => String::from_utf8(raw.to_vec())
                .map(Value::String)
                .map_err(|_| JsonError::new(ErrorCode::InvalidUTF8, "string payload is not valid UTF-8")),
            Scalar::Error(code) => Err(JsonError::new(code, "unpacked an error unit")),
        }
    }
}

/// Bounds-checked cursor over a packed buffer.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        let remaining = self.bytes.len().saturating_sub(self.pos);
        if remaining < n {
            return Err(JsonError::at(
                ErrorCode::PrematureEndOfInput,
                self.pos,
                format!("{what} needs {n} bytes, {remaining} left"),
            ));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N, what)?);
        Ok(arr)
    }
}

/// Decode the unit at `start`, returning it and the position just past it.
fn read_unit(bytes: &[u8], start: usize) -> Result<(Scalar<'_>, usize)> {
    let mut reader = Reader { bytes, pos: start };
    let tag = reader.take(1, "type tag")?[0];
    let ty = BinaryType::from_tag(tag).ok_or_else(|| {
        JsonError::at(
            ErrorCode::Unknown,
            start,
            format!("unknown type tag {tag:#04x}"),
        )
    })?;

    let scalar = match ty {
        BinaryType::Integer => Scalar::Integer(i64::from_be_bytes(reader.take_array("integer")?)),
        BinaryType::Real => Scalar::Real(f64::from_bits(u64::from_be_bytes(
            reader.take_array("real")?,
        ))),
        BinaryType::Boolean => {
            let payload_at = reader.pos;
            match reader.take(1, "boolean")?[0] {
                0 => Scalar::Boolean(false),
                1 => Scalar::Boolean(true),
                other => {
                    return Err(JsonError::at(
                        ErrorCode::InvalidFormat,
                        payload_at,
                        format!("boolean payload {other:#04x} is neither 0 nor 1"),
                    ));
                }
            }
        }
        BinaryType::String => {
            let len = u32::from_be_bytes(reader.take_array("string length")?) as usize;
            let payload_at = reader.pos;
            let raw = reader.take(len, "string payload")?;
            if !utf8::is_valid(raw) {
                return Err(JsonError::at(
                    ErrorCode::InvalidUTF8,
                    payload_at,
                    "string payload is not valid UTF-8",
                ));
            }
            let text = std::str::from_utf8(raw).map_err(|_| {
                JsonError::at(ErrorCode::InvalidUTF8, payload_at, "string payload is not valid UTF-8")
            })?;
            Scalar::Text(text)
        }
        BinaryType::Null => Scalar::Null,
        BinaryType::Error => {
            let payload_at = reader.pos;
            let n = u32::from_be_bytes(reader.take_array("error code")?);
            let code = ErrorCode::from_u32(n).ok_or_else(|| {
                JsonError::at(
                    ErrorCode::InvalidFormat,
                    payload_at,
                    format!("{n} is not an error code"),
                )
            })?;
            Scalar::Error(code)
        }
    };
    Ok((scalar, reader.pos))
}

/// Decode one unit starting at `*position` as a `T`.
///
/// On success `*position` moves past the unit; on failure it is left unchanged.
/// Missing bytes fail with `PrematureEndOfInput`, an unknown tag with `Unknown`,
/// and a tag that does not fit `T` with `WrongType`.
pub fn unpack<T: Unpack>(bytes: &[u8], position: &mut usize) -> Result<T> {
    let (scalar, next) = read_unit(bytes, *position)?;
    let value = T::from_scalar(scalar)?;
    *position = next;
    Ok(value)
}

/// Decode consecutive units until the buffer is exhausted.
pub fn unpack_all<T: Unpack>(bytes: &[u8]) -> Result<Vec<T>> {
    let mut position = 0;
    let mut values = Vec::new();
    while position < bytes.len() {
        values.push(unpack(bytes, &mut position)?);
    }
    Ok(values)
}
