//! Fragment value objects: one labeled segment of an ID schema.

use serde::{Deserialize, Serialize};

/// Default width of the numeric fragment in the default schema.
pub const DEFAULT_LENGTH: usize = 5;
/// Pad character used when a fragment does not configure one.
pub const DEFAULT_PAD_CHAR: char = '0';
/// First symbol of the default alphabetic range.
pub const DEFAULT_RANGE_START: char = 'A';
/// Last symbol of the default alphabetic range.
pub const DEFAULT_RANGE_END: char = 'Z';

/// What a fragment renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Fixed text, only meaningful for static fragments.
    Literal,
    /// Zero-padded decimal counter.
    Numeric,
    /// Padded alphabetic counter over a contiguous character range.
    #[serde(rename = "string")]
    StringAlpha,
    /// Counter over a user-defined alphabet.
    Charset,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Numeric => "numeric",
            Self::StringAlpha => "string",
            Self::Charset => "charset",
        }
    }
}

fn default_length() -> usize {
    1
}

fn default_pad_char() -> String {
    DEFAULT_PAD_CHAR.to_string()
}

/// One segment of a schema.
///
/// Fields are public so fragments can be assembled freely (or deserialized from
/// configuration); nothing is checked until the owning schema is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub is_static: bool,
    pub kind: FragmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_pad_char")]
    pub pad_char: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_end: Option<char>,
}

impl Fragment {
    /// Create a bare fragment with the default pad character.
    pub fn new(is_static: bool, kind: FragmentKind, length: usize) -> Self {
        Self {
            is_static,
            kind,
            literal: None,
            length,
            pad_char: default_pad_char(),
            alphabet: None,
            range_start: None,
            range_end: None,
        }
    }

    /// Static fragment emitting `text` verbatim.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Self::new(true, FragmentKind::Literal, length).with_literal(text)
    }

    /// Decimal counter `length` digits wide.
    pub fn numeric(length: usize) -> Self {
        Self::new(false, FragmentKind::Numeric, length)
    }

    /// Alphabetic counter over `A..=Z`.
    pub fn alpha(length: usize) -> Self {
        Self::new(false, FragmentKind::StringAlpha, length)
    }

    /// Counter over the characters of `alphabet`, in order.
    pub fn charset(length: usize, alphabet: impl Into<String>) -> Self {
        Self::new(false, FragmentKind::Charset, length).with_alphabet(alphabet)
    }

    pub fn with_literal(mut self, text: impl Into<String>) -> Self {
        self.literal = Some(text.into());
        self
    }

    pub fn with_pad_char(mut self, pad_char: impl Into<String>) -> Self {
        self.pad_char = pad_char.into();
        self
    }

    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    pub fn with_range(mut self, start: char, end: char) -> Self {
        self.range_start = Some(start);
        self.range_end = Some(end);
        self
    }

    /// Number of characters this fragment occupies in an ID.
    ///
    /// Static fragments always take the width of their literal, whatever
    /// `length` says.
    pub fn effective_length(&self) -> usize {
        if self.is_static {
            self.literal.as_deref().map_or(0, |s| s.chars().count())
        } else {
            self.length
        }
    }

    /// Start and end of the alphabetic range.
    pub fn range(&self) -> (char, char) {
        (
            self.range_start.unwrap_or(DEFAULT_RANGE_START),
            self.range_end.unwrap_or(DEFAULT_RANGE_END),
        )
    }
}
