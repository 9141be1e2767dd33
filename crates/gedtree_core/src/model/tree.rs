//! Tree view projected from parsed records.
//!
//! A tree is a rendering view, not an entity: it is rebuilt for every
//! request and never persisted.

use crate::model::record::{Individual, Sex, XrefId};
use serde::{Deserialize, Serialize};

/// Relation tag carried by partner entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Spouse,
}

/// One person in the projected tree, with partners and descendants expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: XrefId,
    pub name: String,
    pub given_name: String,
    pub surname: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    pub partners: Vec<PartnerNode>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Creates a leaf node with no partners or children.
    pub fn leaf(individual: &Individual) -> Self {
        Self {
            id: individual.id.clone(),
            name: individual.name.clone(),
            given_name: individual.given_name.clone(),
            surname: individual.surname.clone(),
            sex: individual.sex,
            birth_date: individual.birth_date.clone(),
            death_date: individual.death_date.clone(),
            partners: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of `children` levels below this node; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total nodes in this subtree, partners excluded.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.descendant_count() + 1)
            .sum()
    }
}

/// Flat projection of a spouse. Partners are never expanded further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerNode {
    pub id: XrefId,
    pub name: String,
    pub given_name: String,
    pub surname: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    pub relation: Relation,
}

impl PartnerNode {
    pub fn spouse(individual: &Individual) -> Self {
        Self {
            id: individual.id.clone(),
            name: individual.name.clone(),
            given_name: individual.given_name.clone(),
            surname: individual.surname.clone(),
            sex: individual.sex,
            birth_date: individual.birth_date.clone(),
            death_date: individual.death_date.clone(),
            relation: Relation::Spouse,
        }
    }
}
