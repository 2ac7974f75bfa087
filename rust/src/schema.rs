//! Schema builder and compiler.
//!
//! A [`Schema`] is an editable list of fragments. [`Schema::compile`] validates
//! it and produces an immutable [`CompiledSchema`] that generates IDs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IdError;
use crate::fragment::{DEFAULT_LENGTH, DEFAULT_PAD_CHAR, Fragment, FragmentKind};
use crate::increment::{Charset, Counter};

/// Fragments of the default schema: one numeric counter, five digits, zero-padded.
pub fn default_fragments() -> Vec<Fragment> {
    vec![Fragment::numeric(DEFAULT_LENGTH).with_pad_char(DEFAULT_PAD_CHAR.to_string())]
}

/// Start a schema from `initial`, or from the default schema when `None`.
pub fn create_schema(initial: Option<Vec<Fragment>>) -> Schema {
    initial.map_or_else(Schema::default, Schema::with_fragments)
}

/// Ordered fragment list under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fragments: Vec<Fragment>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::with_fragments(default_fragments())
    }
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    pub fn with_fragments(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Append a fragment (chainable).
    pub fn add_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Append a fragment in place.
    pub fn push(&mut self, fragment: Fragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Validate every fragment and freeze the schema.
    ///
    /// An empty schema compiles to a [`CompiledSchema`] with
    /// `is_compiled() == false`; it cannot generate.
    pub fn compile(&self) -> Result<CompiledSchema, IdError> {
        let mut slots = Vec::with_capacity(self.fragments.len());
        let mut offset = 0;

        for (index, fragment) in self.fragments.iter().enumerate() {
            let rule = compile_fragment(index, fragment)?;
            let width = fragment.effective_length();
            slots.push(Slot {
                offset,
                width,
                rule,
            });
            offset += width;
        }

        let compiled = CompiledSchema {
            fragments: self.fragments.clone(),
            slots,
            total_length: offset,
            is_compiled: !self.fragments.is_empty(),
        };
        debug!(
            fragment_count = compiled.fragment_count(),
            total_length = compiled.total_length,
            is_compiled = compiled.is_compiled,
            "compiled id schema"
        );
        Ok(compiled)
    }

    pub fn to_json(&self) -> Result<String, IdError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, IdError> {
        Ok(serde_json::from_str(data)?)
    }
}

fn compile_fragment(index: usize, fragment: &Fragment) -> Result<Rule, IdError> {
    if fragment.is_static {
        let text = fragment.literal.clone().ok_or_else(|| {
            IdError::invalid_fragment(index, "static fragments require literal text")
        })?;
        return Ok(Rule::Static(text));
    }

    if fragment.length > 1 && fragment.pad_char.chars().count() != 1 {
        return Err(IdError::invalid_fragment(
            index,
            "padding char must be exactly one character",
        ));
    }

    if fragment.length == 0 {
        return Err(IdError::invalid_fragment(
            index,
            "fragment length must be at least 1",
        ));
    }

    let pad = fragment.pad_char.chars().next().unwrap_or(DEFAULT_PAD_CHAR);
    let counter = match fragment.kind {
        FragmentKind::Literal => {
            return Err(IdError::invalid_fragment(
                index,
                format!(
                    "dynamic fragments must be numeric, string or charset, not {}",
                    fragment.kind.as_str()
                ),
            ));
        }
        FragmentKind::Numeric => Counter::Numeric { pad },
        FragmentKind::StringAlpha => {
            let (start, end) = fragment.range();
            if start > end {
                return Err(IdError::invalid_fragment(
                    index,
                    format!("string range {start:?}..={end:?} is empty"),
                ));
            }
            Counter::Alpha { pad, start, end }
        }
        FragmentKind::Charset => {
            let alphabet = fragment.alphabet.as_deref().ok_or_else(|| {
                IdError::invalid_fragment(index, "charset fragments require an alphabet")
            })?;
            Counter::Charset(
                Charset::new(alphabet)
                    .map_err(|err| IdError::invalid_fragment(index, err.to_string()))?,
            )
        }
    };
    Ok(Rule::Counter(counter))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rule {
    Static(String),
    Counter(Counter),
}

/// Position of one fragment inside an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) offset: usize,
    pub(crate) width: usize,
    pub(crate) rule: Rule,
}

/// Immutable, validated schema.
///
/// Generation never mutates it, so one instance can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    fragments: Vec<Fragment>,
    pub(crate) slots: Vec<Slot>,
    total_length: usize,
    is_compiled: bool,
}

impl CompiledSchema {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Length in characters of every ID this schema produces.
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_compiled(&self) -> bool {
        self.is_compiled
    }

    /// A fresh, editable schema holding the same fragments.
    pub fn to_schema(&self) -> Schema {
        Schema::with_fragments(self.fragments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed() -> Schema {
        Schema::new()
            .add_fragment(Fragment::alpha(2))
            .add_fragment(Fragment::literal("-"))
            .add_fragment(Fragment::numeric(3))
    }

    #[test]
    fn test_compile_counts_and_lengths() {
        let compiled = mixed().compile().unwrap();
        assert!(compiled.is_compiled());
        assert_eq!(compiled.fragment_count(), 3);
        assert_eq!(compiled.total_length(), 6);
        assert_eq!(compiled.fragments()[1], Fragment::literal("-"));

        let offsets: Vec<usize> = compiled.slots.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3]);
    }

    #[test]
    fn test_static_length_uses_literal() {
        let mut lit = Fragment::literal("-AutoID-");
        lit.length = 1;
        let compiled = Schema::new()
            .add_fragment(Fragment::alpha(3))
            .add_fragment(lit)
            .compile()
            .unwrap();
        assert_eq!(compiled.total_length(), 11);
    }

    #[test]
    fn test_default_schema() {
        let compiled = create_schema(None).compile().unwrap();
        assert_eq!(compiled.fragment_count(), 1);
        assert_eq!(compiled.total_length(), DEFAULT_LENGTH);
        assert_eq!(compiled.fragments()[0].kind, FragmentKind::Numeric);

        let custom = create_schema(Some(vec![Fragment::alpha(4)]));
        assert_eq!(custom.len(), 1);
    }

    #[test]
    fn test_empty_schema_is_not_compiled() {
        let compiled = Schema::new().compile().unwrap();
        assert!(!compiled.is_compiled());
        assert_eq!(compiled.total_length(), 0);
        assert_eq!(compiled.fragment_count(), 0);
    }

    #[test]
    fn test_compile_is_repeatable() {
        let schema = mixed();
        assert_eq!(schema.compile().unwrap(), schema.compile().unwrap());
    }

    #[test]
    fn test_rejects_multi_char_pad() {
        let schema = mixed().add_fragment(Fragment::numeric(2).with_pad_char("00"));
        assert!(matches!(
            schema.compile(),
            Err(IdError::SchemaValidation { index: 3, .. })
        ));

        // A single-width field never pads, so any pad is accepted.
        let schema = Schema::new().add_fragment(Fragment::numeric(1).with_pad_char(""));
        assert!(schema.compile().is_ok());
    }

    #[test]
    fn test_rejects_literal_kind_for_dynamic() {
        let schema = Schema::new()
            .add_fragment(Fragment::numeric(2))
            .add_fragment(Fragment::new(false, FragmentKind::Literal, 2));
        let err = schema.compile().unwrap_err();
        assert!(matches!(err, IdError::SchemaValidation { index: 1, .. }));
        assert!(err.to_string().ends_with("not literal"));
    }

    #[test]
    fn test_static_pad_is_not_checked() {
        let built = Schema::new()
            .add_fragment(Fragment::literal("ABC").with_pad_char(""))
            .compile()
            .unwrap();
        assert_eq!(built.total_length(), 3);

        let loaded = Schema::from_json(
            r#"{"fragments": [{"isStatic": true, "kind": "literal", "literal": "ABC", "padChar": ""}]}"#,
        )
        .unwrap()
        .compile()
        .unwrap();
        assert_eq!(loaded.total_length(), built.total_length());
    }

    #[test]
    fn test_rejects_static_without_text() {
        let schema = Schema::new().add_fragment(Fragment::new(true, FragmentKind::Literal, 1));
        assert!(matches!(
            schema.compile(),
            Err(IdError::SchemaValidation { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_length() {
        let schema = Schema::new().add_fragment(Fragment::numeric(0));
        assert!(matches!(
            schema.compile(),
            Err(IdError::SchemaValidation { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_charsets() {
        let missing = Schema::new().add_fragment(Fragment::new(false, FragmentKind::Charset, 3));
        assert!(matches!(
            missing.compile(),
            Err(IdError::SchemaValidation { index: 0, .. })
        ));

        let empty = Schema::new()
            .add_fragment(Fragment::literal("x"))
            .add_fragment(Fragment::charset(3, ""));
        assert!(matches!(
            empty.compile(),
            Err(IdError::SchemaValidation { index: 1, .. })
        ));

        let dup = Schema::new().add_fragment(Fragment::charset(3, "abcb"));
        let err = dup.compile().unwrap_err();
        assert!(err.to_string().starts_with("Invalid fragment 0:"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let schema = Schema::new().add_fragment(Fragment::alpha(2).with_range('z', 'a'));
        assert!(matches!(
            schema.compile(),
            Err(IdError::SchemaValidation { index: 0, .. })
        ));
    }

    #[test]
    fn test_push_and_to_schema() {
        let mut schema = Schema::new();
        schema
            .push(Fragment::literal("INV-"))
            .push(Fragment::numeric(4));
        let compiled = schema.compile().unwrap();
        let extended = compiled
            .to_schema()
            .add_fragment(Fragment::literal("/"))
            .add_fragment(Fragment::alpha(1))
            .compile()
            .unwrap();
        assert_eq!(compiled.total_length(), 8);
        assert_eq!(extended.total_length(), 10);
    }

    #[test]
    fn test_json_config_roundtrip() {
        let json = r#"{
            "fragments": [
                {"isStatic": true, "kind": "literal", "literal": "ORD-"},
                {"isStatic": false, "kind": "charset", "length": 3, "alphabet": "0123456789ABCDEF"},
                {"isStatic": false, "kind": "numeric", "length": 4, "padChar": "_"}
            ]
        }"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.fragments()[2].pad_char, "_");
        assert_eq!(schema.compile().unwrap().total_length(), 11);

        let back = Schema::from_json(&schema.to_json().unwrap()).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Schema::from_json(r#"{"fragments": [{"kind": "numeric"}]}"#),
            Err(IdError::Json(_))
        ));
    }
}
