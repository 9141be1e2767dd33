//! Root individual selection.
//!
//! Prefers the first individual, in source order, that no family lists as a
//! child. When every individual is someone's child (cyclic or fully linked
//! files), falls back to the first individual and reports it as such; the
//! fallback may land mid-tree.

use crate::model::record::{GedcomData, XrefId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the root was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// Individual with no recorded parents.
    Ancestor,
    /// First individual in the file, used because no parentless one exists.
    Fallback,
    /// Chosen by the caller.
    Requested,
}

/// Selected root individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootSelection {
    pub id: XrefId,
    pub kind: RootKind,
}

/// Selects the tree root. Returns `None` when there are no individuals.
pub fn find_root(data: &GedcomData) -> Option<RootSelection> {
    let child_ids: HashSet<&str> = data
        .families
        .values()
        .flat_map(|family| family.children.iter().map(String::as_str))
        .collect();

    if let Some(id) = data
        .individuals
        .keys()
        .find(|id| !child_ids.contains(id.as_str()))
    {
        return Some(RootSelection {
            id: id.clone(),
            kind: RootKind::Ancestor,
        });
    }

    data.individuals.keys().next().map(|id| RootSelection {
        id: id.clone(),
        kind: RootKind::Fallback,
    })
}
