//! Error taxonomy shared by the parser, dumper, UTF-8 codec and binary codec.
//!
//! Every failure carries one [`ErrorCode`] from a single closed set. The code has a
//! fixed human-readable message ([`error_message`]) and a stable number (`1..=19`)
//! so it can travel inside a packed `Error` unit.

use std::fmt;

use thiserror::Error;

/// The kind of failure. Closed set; numbering is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    InvalidArgument = 1,
    InvalidNumber = 2,
    InvalidUTF8 = 3,
    OutOfMemory = 4,
    StackOverflow = 5,
    CannotOpenFile = 6,
    InvalidSyntax = 7,
    InvalidFormat = 8,
    WrongType = 9,
    NullCharacter = 10,
    NullValue = 11,
    NullByteInKey = 12,
    DuplicateKey = 13,
    NumericOverflow = 14,
    ItemNotFound = 15,
    IndexOutOfRange = 16,
    PrematureEndOfInput = 17,
    EndOfInputExpected = 18,
    Unknown = 19,
}

impl ErrorCode {
    /// All codes in numeric order.
    pub const ALL: [ErrorCode; 19] = [
        ErrorCode::InvalidArgument,
        ErrorCode::InvalidNumber,
        ErrorCode::InvalidUTF8,
        ErrorCode::OutOfMemory,
        ErrorCode::StackOverflow,
        ErrorCode::CannotOpenFile,
        ErrorCode::InvalidSyntax,
        ErrorCode::InvalidFormat,
        ErrorCode::WrongType,
        ErrorCode::NullCharacter,
        ErrorCode::NullValue,
        ErrorCode::NullByteInKey,
        ErrorCode::DuplicateKey,
        ErrorCode::NumericOverflow,
        ErrorCode::ItemNotFound,
        ErrorCode::IndexOutOfRange,
        ErrorCode::PrematureEndOfInput,
        ErrorCode::EndOfInputExpected,
        ErrorCode::Unknown,
    ];

    /// Fixed description of this code.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::InvalidNumber => "Invalid number",
            ErrorCode::InvalidUTF8 => "Invalid UTF-8",
            ErrorCode::OutOfMemory => "Out of memory",
            ErrorCode::StackOverflow => "Stack overflow",
            ErrorCode::CannotOpenFile => "Cannot open file",
            ErrorCode::InvalidSyntax => "Invalid syntax",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::WrongType => "Wrong type",
            ErrorCode::NullCharacter => "Null character",
            ErrorCode::NullValue => "Null value",
            ErrorCode::NullByteInKey => "Null byte in key",
            ErrorCode::DuplicateKey => "Duplicate key",
            ErrorCode::NumericOverflow => "Numeric overflow",
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::IndexOutOfRange => "Index out of range",
            ErrorCode::PrematureEndOfInput => "Premature end of input",
            ErrorCode::EndOfInputExpected => "End of input expected",
            ErrorCode::Unknown => "Unknown error",
        }
    }

    /// Stable numeric value of this code.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Inverse of [`ErrorCode::as_u32`]. Returns `None` for numbers outside `1..=19`.
    pub fn from_u32(n: u32) -> Option<ErrorCode> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Map an error code to its fixed description.
pub fn error_message(code: ErrorCode) -> &'static str {
    code.message()
}

/// A failure from any jsson operation: the kind, a detail string, and the byte
/// offset into the input when the failure was positional.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {detail}")]
pub struct JsonError {
    code: ErrorCode,
    detail: String,
    offset: Option<usize>,
}

impl JsonError {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
            offset: None,
        }
    }

    /// An error detected at byte `offset` of the input. The offset is appended to
    /// the detail text.
    pub fn at(code: ErrorCode, offset: usize, detail: impl Into<String>) -> Self {
        let detail = format!("{} at byte {}", detail.into(), offset);
        Self {
            code,
            detail,
            offset: Some(offset),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl From<ErrorCode> for JsonError {
    fn from(code: ErrorCode) -> Self {
        JsonError::new(code, code.message())
    }
}

/// Convenience alias used throughout jsson-core.
pub type Result<T> = std::result::Result<T, JsonError>;
