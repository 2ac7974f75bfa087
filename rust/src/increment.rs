//! Increment strategies for dynamic fragments.
//!
//! Every strategy adds one step to a fragment value and reports whether the
//! value wrapped, in which case the fragment to its left must also move.

use std::collections::HashMap;

use crate::error::IdError;

/// Outcome of incrementing one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Increment {
    pub result: String,
    pub carry: bool,
}

/// An ordered alphabet of distinct characters with reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
}

impl Charset {
    /// Build a charset, rejecting empty alphabets and repeated characters.
    pub fn new(alphabet: &str) -> Result<Self, IdError> {
        let symbols: Vec<char> = alphabet.chars().collect();
        if symbols.is_empty() {
            return Err(IdError::InvalidCharset(
                "alphabet must not be empty".to_string(),
            ));
        }
        let mut positions = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if positions.insert(c, i).is_some() {
                return Err(IdError::InvalidCharset(format!(
                    "alphabet repeats character {c:?}"
                )));
            }
        }
        Ok(Self { symbols, positions })
    }

    /// Lowest symbol; also the wrap target.
    pub fn first(&self) -> char {
        self.symbols[0]
    }

    pub fn last_index(&self) -> usize {
        self.symbols.len() - 1
    }

    pub fn index_of(&self, c: char) -> Option<usize> {
        self.positions.get(&c).copied()
    }

    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;

pub(crate) fn pad_left(value: &str, length: usize, pad: char) -> String {
    let width = value.chars().count();
    if width >= length {
        return value.to_string();
    }
    let mut out: String = std::iter::repeat_n(pad, length - width).collect();
    out.push_str(value);
    out
}

/// Decimal `+1` on a string of ASCII digits, without width limits.
fn add_one(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return bytes.into_iter().map(char::from).collect();
        }
    }
    let mut out = String::with_capacity(bytes.len() + 1);
    out.push('1');
    out.extend(bytes.into_iter().map(char::from));
    out
}

/// Digits of a numeric field once its leading run of non-digit pad is removed.
///
/// `None` when anything other than ASCII digits remains.
pub(crate) fn numeric_digits(value: &str, pad_char: char) -> Option<&str> {
    let digits = if pad_char.is_ascii_digit() {
        value
    } else {
        value.trim_start_matches(pad_char)
    };
    digits.bytes().all(|b| b.is_ascii_digit()).then_some(digits)
}

/// Increment a decimal fragment.
///
/// A non-digit `pad_char` is stripped from the left before parsing; a digit pad
/// is left in place so `"007"` stays a number. On overflow the field rolls over
/// to `1` (not `0`) and reports a carry.
pub fn increment_numeric(value: &str, pad_char: char, length: usize) -> Result<Increment, IdError> {
    let digits = numeric_digits(value, pad_char)
        .ok_or_else(|| IdError::InvalidFragmentValue(value.to_string()))?;

    // An all-pad field reads as zero.
    let normalized = digits.trim_start_matches('0');
    let rendered = add_one(normalized);

    if rendered.len() > value.chars().count() {
        Ok(Increment {
            result: pad_left("1", length, pad_char),
            carry: true,
        })
    } else {
        Ok(Increment {
            result: pad_left(&rendered, length, pad_char),
            carry: false,
        })
    }
}

/// Increment an alphabetic fragment over `range_start..=range_end`.
///
/// Scans right to left. A pad character (other than `range_start` itself) is
/// promoted to `range_start`; anything else moves `delta` code points. Symbols
/// past `range_end` wrap to `range_start` and the scan continues leftward.
/// Surrogate code points are not characters and are stepped over.
pub fn increment_string(
    value: &str,
    delta: u32,
    pad_char: char,
    range_start: char,
    range_end: char,
) -> Increment {
    let mut chars: Vec<char> = value.chars().collect();
    let end = u32::from(range_end);
    let mut carry = false;

    for slot in chars.iter_mut().rev() {
        let next = if *slot == pad_char && pad_char != range_start {
            u32::from(range_start)
        } else {
            let code = u32::from(*slot);
            let next = code.saturating_add(delta);
            if code < SURROGATE_START && next >= SURROGATE_START {
                next.saturating_add(SURROGATE_END - SURROGATE_START + 1)
            } else {
                next
            }
        };
        carry = next > end;
        *slot = if carry {
            range_start
        } else {
            char::from_u32(next).unwrap_or(range_start)
        };
        if !carry {
            break;
        }
    }

    Increment {
        result: chars.into_iter().collect(),
        carry,
    }
}

/// Increment a fragment over a custom alphabet.
///
/// Same scan as [`increment_string`], with ordering taken from `charset`.
/// Characters outside the alphabet are promoted to its first symbol.
pub fn increment_charset(value: &str, delta: usize, charset: &Charset) -> Increment {
    let mut chars: Vec<char> = value.chars().collect();
    let last = charset.last_index();
    let mut carry = false;

    for slot in chars.iter_mut().rev() {
        let next = charset
            .index_of(*slot)
            .map_or(0, |i| i.saturating_add(delta));
        carry = next > last;
        *slot = if carry {
            charset.first()
        } else {
            charset.symbol(next).unwrap_or_else(|| charset.first())
        };
        if !carry {
            break;
        }
    }

    Increment {
        result: chars.into_iter().collect(),
        carry,
    }
}

/// Validated counter behaviour of one dynamic fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Counter {
    Numeric { pad: char },
    Alpha { pad: char, start: char, end: char },
    Charset(Charset),
}

impl Counter {
    pub(crate) fn step(&self, value: &str, width: usize) -> Result<Increment, IdError> {
        match self {
            Self::Numeric { pad } => increment_numeric(value, *pad, width),
            Self::Alpha { pad, start, end } => Ok(increment_string(value, 1, *pad, *start, *end)),
            Self::Charset(charset) => Ok(increment_charset(value, 1, charset)),
        }
    }

    /// Value that precedes the first ID, in the fragment's own padding.
    pub(crate) fn seed(&self, width: usize) -> String {
        match self {
            Self::Numeric { pad } => pad_left("0", width, *pad),
            Self::Alpha { pad, start, .. } => pad_left(&start.to_string(), width, *pad),
            Self::Charset(charset) => std::iter::repeat_n(charset.first(), width).collect(),
        }
    }
}
