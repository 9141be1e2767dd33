//! Family tree use-case service.
//!
//! # Responsibility
//! - Chain parse, root selection and projection into one call.
//! - Turn "no usable data" into a distinct, user-actionable error.
//!
//! # Invariants
//! - Malformed lines never fail a request; only an empty individual set or
//!   an unknown explicit root does.
//! - A fallback root is reported through `warning`, never as an error.

use crate::model::record::{GedcomData, GedcomStats};
use crate::model::tree::TreeNode;
use crate::parser::parse_gedcom;
use crate::source::{load_gedcom_file, SourceError};
use crate::tree::{find_root, project_tree, ProjectionOptions, RootKind};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Warning attached to trees rooted at a fallback individual.
pub const FALLBACK_ROOT_WARNING: &str =
    "Using first individual as root. Family relationships may be incomplete.";

/// Errors from family tree service operations.
#[derive(Debug)]
pub enum FamilyTreeError {
    /// Input contains no `INDI` records.
    NoIndividualsFound,
    /// Caller-provided root id is not an individual in the input.
    RootNotFound(String),
    /// GEDCOM source could not be loaded.
    Source(SourceError),
}

impl FamilyTreeError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoIndividualsFound => "NO_INDIVIDUALS_FOUND",
            Self::RootNotFound(_) => "ROOT_NOT_FOUND",
            Self::Source(SourceError::InvalidExtension(_)) => "INVALID_FILE_TYPE",
            Self::Source(_) => "GEDCOM_CONTENT_MISSING",
        }
    }

    /// Next step to suggest to the user.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoIndividualsFound => {
                "Please check your GEDCOM file and ensure it contains valid individual records."
            }
            Self::RootNotFound(_) => "Pick a root id that appears on a `0 @ID@ INDI` line.",
            Self::Source(SourceError::InvalidExtension(_)) => {
                "Please provide a GEDCOM file with a .ged extension."
            }
            Self::Source(_) => "Please re-export the GEDCOM file as UTF-8 and try again.",
        }
    }
}

impl Display for FamilyTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoIndividualsFound => write!(f, "no valid individuals found in the GEDCOM file"),
            Self::RootNotFound(id) => write!(f, "root individual not found: {id}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FamilyTreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SourceError> for FamilyTreeError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Rendering payload for one family tree request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeView {
    pub tree: TreeNode,
    pub root_kind: RootKind,
    /// Set when the tree may be incomplete because the root is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// File name the text was loaded from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub stats: GedcomStats,
}

/// Family tree service facade.
#[derive(Debug, Clone, Default)]
pub struct FamilyTreeService {
    options: ProjectionOptions,
}

impl FamilyTreeService {
    /// Creates service with projection settings.
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Builds a tree from GEDCOM text, choosing the root automatically.
    pub fn build(&self, text: &str) -> Result<FamilyTreeView, FamilyTreeError> {
        let data = parse_gedcom(text);
        self.build_from_data(&data)
    }

    /// Builds a tree from GEDCOM text rooted at `root_id`.
    pub fn build_with_root(
        &self,
        text: &str,
        root_id: &str,
    ) -> Result<FamilyTreeView, FamilyTreeError> {
        let data = parse_gedcom(text);
        self.build_from_data_with_root(&data, root_id)
    }

    /// Loads a `.ged` file and builds its tree.
    pub fn build_from_file(
        &self,
        path: impl AsRef<Path>,
        root_id: Option<&str>,
    ) -> Result<FamilyTreeView, FamilyTreeError> {
        let path = path.as_ref();
        let text = load_gedcom_file(path)?;
        let data = parse_gedcom(&text);
        let mut view = match root_id {
            Some(root_id) => self.build_from_data_with_root(&data, root_id)?,
            None => self.build_from_data(&data)?,
        };
        view.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(view)
    }

    /// Builds a tree from already parsed data, choosing the root automatically.
    pub fn build_from_data(&self, data: &GedcomData) -> Result<FamilyTreeView, FamilyTreeError> {
        let Some(root) = find_root(data) else {
            warn!("event=family_tree_build module=service status=error code=NO_INDIVIDUALS_FOUND");
            return Err(FamilyTreeError::NoIndividualsFound);
        };
        self.assemble(data, &root.id, root.kind)
    }

    /// Builds a tree from already parsed data rooted at `root_id`.
    pub fn build_from_data_with_root(
        &self,
        data: &GedcomData,
        root_id: &str,
    ) -> Result<FamilyTreeView, FamilyTreeError> {
        if data.is_empty() {
            return Err(FamilyTreeError::NoIndividualsFound);
        }
        if data.individual(root_id).is_none() {
            warn!("event=family_tree_build module=service status=error code=ROOT_NOT_FOUND");
            return Err(FamilyTreeError::RootNotFound(root_id.to_string()));
        }
        self.assemble(data, root_id, RootKind::Requested)
    }

    fn assemble(
        &self,
        data: &GedcomData,
        root_id: &str,
        root_kind: RootKind,
    ) -> Result<FamilyTreeView, FamilyTreeError> {
        let tree = project_tree(data, root_id, &self.options)
            .ok_or_else(|| FamilyTreeError::RootNotFound(root_id.to_string()))?;
        let stats = data.stats();
        let warning = match root_kind {
            RootKind::Fallback => Some(FALLBACK_ROOT_WARNING.to_string()),
            RootKind::Ancestor | RootKind::Requested => None,
        };

        info!(
            "event=family_tree_build module=service status=ok root_kind={:?} max_depth={} depth={} descendants={} individuals={} families={} dangling={}",
            root_kind,
            self.options.max_depth,
            tree.depth(),
            tree.descendant_count(),
            stats.individuals,
            stats.families,
            stats.dangling_references
        );

        Ok(FamilyTreeView {
            tree,
            root_kind,
            warning,
            file_name: None,
            stats,
        })
    }
}
