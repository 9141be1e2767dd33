//! Genealogy domain model produced by the GEDCOM parser.
//!
//! # Responsibility
//! - Define the individual/family records assembled from one GEDCOM text.
//! - Define the tree view projected from those records for rendering.
//!
//! # Invariants
//! - Every record is keyed by its GEDCOM cross-reference token, verbatim.
//! - Cross references between records are bare ids, resolved lazily.
//! - Values are built within one parse call and never mutated afterwards.

pub mod record;
pub mod tree;
