//! Validation and parsing of IDs against a compiled schema.
//!
//! Unlike generation, which only reads the dynamic regions of the previous ID,
//! these checks require every region to be well formed: literal text must
//! match exactly and each counter region may only hold its own symbols or pad.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::IdError;
use crate::increment::{Counter, numeric_digits};
use crate::schema::{CompiledSchema, Rule, default_fragments};

/// ID split into the substrings of each fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId {
    pub raw: String,
    pub parts: Vec<String>,
}

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^((?:[0-9]|0){5})$").unwrap());

fn class_of(counter: &Counter) -> String {
    match counter {
        Counter::Numeric { pad } => format!("[0-9]|{}", regex::escape(&pad.to_string())),
        Counter::Alpha { pad, start, end } => format!(
            r"[\x{{{:X}}}-\x{{{:X}}}]|{}",
            u32::from(*start),
            u32::from(*end),
            regex::escape(&pad.to_string())
        ),
        Counter::Charset(charset) => charset
            .symbols()
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect::<Vec<_>>()
            .join("|"),
    }
}

fn build_pattern(schema: &CompiledSchema) -> Result<Regex, IdError> {
    let body: String = schema
        .slots
        .iter()
        .map(|slot| match &slot.rule {
            Rule::Static(text) => format!("({})", regex::escape(text)),
            Rule::Counter(counter) => format!("((?:{}){{{}}})", class_of(counter), slot.width),
        })
        .collect();
    Ok(Regex::new(&format!("^{body}$"))?)
}

impl CompiledSchema {
    fn is_default(&self) -> bool {
        self.fragments() == default_fragments().as_slice()
    }

    /// Split `id` into fragment substrings, checking each against the schema.
    pub fn parse_id(&self, id: &str) -> Result<ParsedId, IdError> {
        if !self.is_compiled() {
            return Err(IdError::NotCompiled);
        }

        let built;
        let pattern = if self.is_default() {
            &*DEFAULT_PATTERN
        } else {
            built = build_pattern(self)?;
            &built
        };

        let caps = pattern
            .captures(id)
            .ok_or_else(|| IdError::InvalidFormat(id.to_string()))?;

        let parts: Vec<String> = (1..=self.fragment_count())
            .map(|i| caps.get(i).map_or(String::new(), |m| m.as_str().to_string()))
            .collect();

        // Pad may only lead a numeric region, as the generator reads it.
        let padded_inside = self.slots.iter().zip(&parts).any(|(slot, part)| {
            matches!(&slot.rule, Rule::Counter(Counter::Numeric { pad })
                if numeric_digits(part, *pad).is_none())
        });
        if padded_inside {
            return Err(IdError::InvalidFormat(id.to_string()));
        }

        Ok(ParsedId {
            raw: id.to_string(),
            parts,
        })
    }

    /// Whether `id` is a well-formed ID of this schema.
    pub fn validate_id(&self, id: &str) -> bool {
        self.parse_id(id).is_ok()
    }
}
