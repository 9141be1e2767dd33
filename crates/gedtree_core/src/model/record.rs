//! Individual and family records.
//!
//! # Responsibility
//! - Hold the fields the parser extracts from `INDI` and `FAM` records.
//! - Provide lookups and summary statistics over one parsed file.
//!
//! # Invariants
//! - Map iteration order is the order records first appeared in the source.
//! - `family_as_child` holds the last `FAMC` seen; `families_as_spouse` keeps
//!   every `FAMS`, in order, without deduplication.
//! - Dates and places are free text and preserved verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// GEDCOM cross-reference token including `@` delimiters, e.g. `@I1@`.
pub type XrefId = String;

/// Recorded sex of an individual.
///
/// Serialized with the single-letter GEDCOM codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    /// Absent, `U`, or any code this parser does not model.
    #[default]
    #[serde(rename = "U")]
    Unknown,
}

impl Sex {
    /// Maps a raw `SEX` value to a variant. Unrecognized codes become `Unknown`.
    pub fn from_gedcom(value: &str) -> Self {
        match value.trim() {
            "M" | "m" => Self::Male,
            "F" | "f" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Returns the single-letter GEDCOM code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "U",
        }
    }
}

/// One `INDI` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    pub id: XrefId,
    /// Display name: given name and surname joined by one space.
    pub name: String,
    pub given_name: String,
    pub surname: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_place: Option<String>,
    /// Family this individual is a child of. Last `FAMC` wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_as_child: Option<XrefId>,
    /// Families this individual is a spouse in, in source order.
    pub families_as_spouse: Vec<XrefId>,
}

impl Individual {
    /// Creates an empty record for `id`.
    pub fn new(id: impl Into<XrefId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Applies a raw `NAME` value such as `John /Smith/`.
    ///
    /// The text before the first `/` is the given name and the text between
    /// the slashes is the surname. Anything after the closing slash is
    /// dropped.
    pub fn set_name(&mut self, raw: &str) {
        let mut parts = raw.split('/');
        self.given_name = parts.next().unwrap_or_default().trim().to_string();
        self.surname = parts.next().unwrap_or_default().trim().to_string();
        self.name = format!("{} {}", self.given_name, self.surname)
            .trim()
            .to_string();
    }
}

/// One `FAM` record.
///
/// Husband/wife roles are positional as written in the source and are not
/// checked against the individuals' recorded sex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: XrefId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub husband_id: Option<XrefId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wife_id: Option<XrefId>,
    /// Child ids in source order.
    pub children: Vec<XrefId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<String>,
}

impl Family {
    /// Creates an empty record for `id`.
    pub fn new(id: impl Into<XrefId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns the spouse opposite `member_id`.
    ///
    /// A member listed as husband gets the wife; anyone else gets the husband.
    pub fn other_spouse(&self, member_id: &str) -> Option<&str> {
        if self.husband_id.as_deref() == Some(member_id) {
            self.wife_id.as_deref()
        } else {
            self.husband_id.as_deref()
        }
    }

    fn referenced_individuals(&self) -> impl Iterator<Item = &str> {
        self.husband_id
            .as_deref()
            .into_iter()
            .chain(self.wife_id.as_deref())
            .chain(self.children.iter().map(String::as_str))
    }
}

/// Everything assembled from one GEDCOM text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GedcomData {
    pub individuals: IndexMap<XrefId, Individual>,
    pub families: IndexMap<XrefId, Family>,
}

/// Summary counts over one [`GedcomData`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GedcomStats {
    pub individuals: usize,
    pub families: usize,
    /// Family or individual fields that point at ids with no record.
    pub dangling_references: usize,
}

impl GedcomData {
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Counts records and unresolved cross references.
    pub fn stats(&self) -> GedcomStats {
        let dangling_individuals = self
            .families
            .values()
            .flat_map(Family::referenced_individuals)
            .filter(|id| !self.individuals.contains_key(*id))
            .count();
        let dangling_families = self
            .individuals
            .values()
            .flat_map(|individual| {
                individual
                    .family_as_child
                    .iter()
                    .chain(individual.families_as_spouse.iter())
            })
            .filter(|id| !self.families.contains_key(id.as_str()))
            .count();

        GedcomStats {
            individuals: self.individuals.len(),
            families: self.families.len(),
            dangling_references: dangling_individuals + dangling_families,
        }
    }
}
