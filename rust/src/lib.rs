//! fid: sequential, formatted identifiers built from a declarative schema.
//!
//! A schema is an ordered list of fragments: static literals and counters
//! (zero-padded decimal, padded alphabetic, or a custom alphabet). Generating
//! the next ID increments the rightmost counter and carries leftward across
//! counters like an odometer, skipping static text.
//!
//! The library keeps no state: callers store the last ID and pass it back.
//!
//! # Example
//!
//! ```
//! use fid::{Fragment, Schema};
//!
//! let schema = Schema::new()
//!     .add_fragment(Fragment::alpha(2))
//!     .add_fragment(Fragment::literal("-"))
//!     .add_fragment(Fragment::numeric(3))
//!     .compile()
//!     .expect("valid schema");
//!
//! assert_eq!(schema.generate_id(None).unwrap(), "0A-001");
//! assert_eq!(schema.generate_id(Some("0A-999")).unwrap(), "0B-001");
//! ```

mod error;
mod fragment;
mod generate;
mod increment;
mod pattern;
mod schema;

pub use error::IdError;
pub use fragment::{
    DEFAULT_LENGTH, DEFAULT_PAD_CHAR, DEFAULT_RANGE_END, DEFAULT_RANGE_START, Fragment,
    FragmentKind,
};
pub use generate::IdSequence;
pub use increment::{Charset, Increment, increment_charset, increment_numeric, increment_string};
pub use pattern::ParsedId;
pub use schema::{CompiledSchema, Schema, create_schema, default_fragments};
