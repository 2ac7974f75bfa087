//! Next-ID generation.
//!
//! Fragments are visited right to left like the wheels of an odometer. Each
//! dynamic fragment moves only while a carry is pending; static text is copied
//! from the schema and never takes part in the carry chain.

use tracing::{debug, trace};

use crate::error::IdError;
use crate::schema::{CompiledSchema, Rule};

impl CompiledSchema {
    /// The value that precedes the first ID of this schema.
    ///
    /// Literal text for static fragments, and each counter's lowest symbol in
    /// that fragment's own padding.
    pub fn seed(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match &slot.rule {
                Rule::Static(text) => text.clone(),
                Rule::Counter(counter) => counter.seed(slot.width),
            })
            .collect()
    }

    /// Generate the ID that follows `last_id`, or the first ID when `None`.
    ///
    /// A carry that survives the leftmost dynamic fragment is dropped, so the
    /// sequence wraps around instead of growing.
    pub fn generate_id(&self, last_id: Option<&str>) -> Result<String, IdError> {
        if !self.is_compiled() {
            return Err(IdError::NotCompiled);
        }

        let prior: Vec<char> = match last_id {
            Some(id) => {
                let chars: Vec<char> = id.chars().collect();
                if chars.len() != self.total_length() {
                    return Err(IdError::LengthMismatch {
                        expected: self.total_length(),
                        actual: chars.len(),
                    });
                }
                chars
            }
            None => self.seed().chars().collect(),
        };

        let mut pieces = vec![String::new(); self.slots.len()];
        let mut carry = true;

        for (piece, slot) in pieces.iter_mut().zip(&self.slots).rev() {
            *piece = match &slot.rule {
                Rule::Static(text) => text.clone(),
                Rule::Counter(counter) => {
                    let current: String = prior[slot.offset..slot.offset + slot.width]
                        .iter()
                        .collect();
                    if carry {
                        let step = counter.step(&current, slot.width)?;
                        carry = step.carry;
                        step.result
                    } else {
                        current
                    }
                }
            };
        }

        let id = pieces.concat();
        if carry {
            debug!(last_id = ?last_id, id = %id, "id sequence wrapped around");
        }
        trace!(id = %id, "generated id");
        Ok(id)
    }

    /// Iterate IDs following `last_id` (or from the start when `None`).
    pub fn sequence(&self, last_id: Option<&str>) -> IdSequence<'_> {
        IdSequence {
            schema: self,
            last_id: last_id.map(str::to_string),
            failed: false,
        }
    }
}

/// Iterator over successive IDs of one schema.
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct IdSequence<'a> {
    schema: &'a CompiledSchema,
    last_id: Option<String>,
    failed: bool,
}

impl IdSequence<'_> {
    /// Last ID handed out (or the starting point if none yet); persist this to
    /// resume later.
    pub fn last_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    /// Generate `n` IDs.
    pub fn next_n(&mut self, n: usize) -> Result<Vec<String>, IdError> {
        self.take(n).collect()
    }
}

impl Iterator for IdSequence<'_> {
    type Item = Result<String, IdError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.schema.generate_id(self.last_id.as_deref()) {
            Ok(id) => {
                self.last_id = Some(id.clone());
                Some(Ok(id))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for IdSequence<'_> {}
