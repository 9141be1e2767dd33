//! Family tree construction over parsed records.
//!
//! # Responsibility
//! - Pick a root individual for rendering.
//! - Project the record graph into a nested, depth-bounded tree.
//!
//! # Invariants
//! - Dangling references are skipped where they are used.
//! - Recursion depth and node count are bounded, so cyclic or very deep
//!   input terminates without exhausting the stack.

pub mod projector;
pub mod root;

pub use projector::{
    project_tree, ProjectionOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, MAX_DEPTH_LIMIT,
};
pub use root::{find_root, RootKind, RootSelection};
