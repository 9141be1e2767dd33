//! Core GEDCOM parsing and family tree logic for gedtree.
//! This crate owns every genealogy invariant; CLI and host layers only call in.

pub mod logging;
pub mod model;
pub mod parser;
pub mod service;
pub mod source;
pub mod tree;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{Family, GedcomData, GedcomStats, Individual, Sex, XrefId};
pub use model::tree::{PartnerNode, Relation, TreeNode};
pub use parser::{parse_gedcom, tokenize, GedcomLine};
pub use service::family_tree_service::{
    FamilyTreeError, FamilyTreeService, FamilyTreeView, FALLBACK_ROOT_WARNING,
};
pub use source::{load_gedcom_file, SourceError};
pub use tree::{
    find_root, project_tree, ProjectionOptions, RootKind, RootSelection, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_NODES, MAX_DEPTH_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
