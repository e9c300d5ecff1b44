//! Parser configuration.

/// Default maximum nesting depth for arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs controlling how strictly the parser treats its input.
///
/// The defaults accept every RFC 8259 document up to [`DEFAULT_MAX_DEPTH`] levels
/// of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of arrays/objects. Exceeding it fails with
    /// `StackOverflow` instead of exhausting the call stack.
    pub max_depth: usize,
    /// Fail with `DuplicateKey` when an object repeats a key. When `false` the last
    /// occurrence wins.
    pub reject_duplicate_keys: bool,
    /// Accept `\u0000` escapes. When `false` they fail with `NullCharacter` in
    /// values and `NullByteInKey` in object keys.
    pub allow_nul: bool,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_duplicate_keys: false,
            allow_nul: true,
        }
    }

    /// Options for untrusted input: duplicates and NUL characters rejected.
    pub const fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_duplicate_keys: true,
            allow_nul: false,
        }
    }

    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub const fn reject_duplicate_keys(mut self, reject: bool) -> Self {
        self.reject_duplicate_keys = reject;
        self
    }

    pub const fn allow_nul(mut self, allow: bool) -> Self {
        self.allow_nul = allow;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
