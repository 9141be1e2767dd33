//! GEDCOM text parsing.
//!
//! # Responsibility
//! - Split raw GEDCOM text into per-line tokens.
//! - Assemble tokens into individual and family records in one pass.
//!
//! # Invariants
//! - Parsing never fails on malformed input; bad lines are skipped.
//! - Each call owns its state; nothing is shared between calls.

pub mod assembler;
pub mod tokenizer;

pub use assembler::{apply_line, parse_gedcom, EventTag, ParseContext, RecordCursor};
pub use tokenizer::{tokenize, tokenize_line, GedcomLine, Tokenizer};
