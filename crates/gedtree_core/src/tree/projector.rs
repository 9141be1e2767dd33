//! Depth-bounded tree projection.
//!
//! # Invariants
//! - Only direct lineage is expanded: partners are flat entries.
//! - Partners follow `families_as_spouse` order; children follow the same
//!   family order, each family's children in source order.
//! - Nodes deeper than `max_depth` are cut off; `max_depth` never exceeds
//!   [`MAX_DEPTH_LIMIT`], which also bounds recursion in serialization, drop
//!   and [`TreeNode::depth`].
//! - At most `max_nodes` individual nodes are produced per projection. A family
//!   listing the same person as child many times fans out geometrically with
//!   depth; the budget cuts the tree off in depth-first order once spent.
//! - Unknown individual or family ids are skipped.

use crate::model::record::GedcomData;
use crate::model::tree::{PartnerNode, TreeNode};

/// Generations rendered below the root when the caller does not say.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Largest accepted `max_depth`; larger requests are clamped.
pub const MAX_DEPTH_LIMIT: usize = 100;

/// Node budget per projection when the caller does not say.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Tree projection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOptions {
    /// Deepest `children` level kept below the root.
    pub max_depth: usize,
    /// Upper bound on individual nodes in the projected tree, root included.
    pub max_nodes: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl ProjectionOptions {
    /// Default options with `max_depth`, clamped to [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
            ..Self::default()
        }
    }

    /// Replaces the node budget.
    pub fn max_nodes(self, max_nodes: usize) -> Self {
        Self { max_nodes, ..self }
    }

    /// Depth actually used; fields are public, so the clamp is reapplied here.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }
}

/// Projects the tree rooted at `root_id`.
///
/// Returns `None` when `root_id` is not a known individual or `max_nodes` is 0.
pub fn project_tree(
    data: &GedcomData,
    root_id: &str,
    options: &ProjectionOptions,
) -> Option<TreeNode> {
    let mut projector = Projector {
        data,
        max_depth: options.effective_max_depth(),
        remaining_nodes: options.max_nodes,
    };
    projector.node(root_id, 0)
}

struct Projector<'a> {
    data: &'a GedcomData,
    max_depth: usize,
    remaining_nodes: usize,
}

impl Projector<'_> {
    fn node(&mut self, id: &str, current_depth: usize) -> Option<TreeNode> {
        if current_depth > self.max_depth || self.remaining_nodes == 0 {
            return None;
        }
        let data = self.data;
        let individual = data.individual(id)?;
        self.remaining_nodes -= 1;
        let mut node = TreeNode::leaf(individual);

        for family in individual
            .families_as_spouse
            .iter()
            .filter_map(|family_id| data.family(family_id))
        {
            if let Some(spouse) = family
                .other_spouse(id)
                .and_then(|spouse_id| data.individual(spouse_id))
            {
                node.partners.push(PartnerNode::spouse(spouse));
            }

            for child_id in &family.children {
                if let Some(child) = self.node(child_id, current_depth + 1) {
                    node.children.push(child);
                }
            }
        }

        Some(node)
    }
}
