//! Single-pass record assembler.
//!
//! # Responsibility
//! - Fold tokenized lines into [`GedcomData`].
//! - Keep the parse context explicit: the reducer takes the current
//!   [`ParseContext`] and returns the next one.
//!
//! # Invariants
//! - Level 0 `INDI`/`FAM` with an xref opens a record; any other level 0 line
//!   closes the current one.
//! - Level 1 lines only touch the record type they belong to.
//! - Level 2 `DATE`/`PLAC` are routed by the enclosing level 1 event.
//! - Levels >= 3 and unsupported tags are ignored.
//! - `FAMC` overwrites, `FAMS` and `CHIL` append. This is a simplification of
//!   GEDCOM multiplicity: an individual keeps only the last birth family.
//! - References are stored as bare ids; nothing is validated here.

use crate::model::record::{Family, GedcomData, Individual, Sex, XrefId};
use crate::parser::tokenizer::{tokenize, GedcomLine};
use log::debug;

/// Record currently receiving level 1 and level 2 lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordCursor {
    /// Outside any supported record (header, submitter, trailer, ...).
    #[default]
    None,
    Individual(XrefId),
    Family(XrefId),
}

/// Level 1 events whose level 2 `DATE`/`PLAC` lines are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTag {
    Birth,
    Death,
    Marriage,
}

impl EventTag {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BIRT" => Some(Self::Birth),
            "DEAT" => Some(Self::Death),
            "MARR" => Some(Self::Marriage),
            _ => None,
        }
    }
}

/// Parse state threaded through [`apply_line`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub record: RecordCursor,
    /// Event opened by the latest level 1 line, if that line was an event.
    pub event: Option<EventTag>,
}

/// Parses GEDCOM text into individuals and families.
///
/// Never fails: malformed lines and unsupported tags are dropped. An input
/// without `INDI` records yields empty maps.
pub fn parse_gedcom(text: &str) -> GedcomData {
    let mut data = GedcomData::default();
    let mut context = ParseContext::default();
    let mut tokens = tokenize(text);
    let mut line_count = 0usize;

    for line in tokens.by_ref() {
        line_count += 1;
        context = apply_line(&mut data, context, &line);
    }

    debug!(
        "event=gedcom_parse module=parser status=ok lines={} skipped_lines={} individuals={} families={}",
        line_count,
        tokens.skipped(),
        data.individuals.len(),
        data.families.len()
    );
    data
}

/// Applies one tokenized line to `data` and returns the next context.
pub fn apply_line(
    data: &mut GedcomData,
    context: ParseContext,
    line: &GedcomLine<'_>,
) -> ParseContext {
    match line.level {
        0 => open_record(data, line),
        1 => {
            apply_level1(data, &context.record, line);
            ParseContext {
                event: EventTag::from_tag(line.tag),
                ..context
            }
        }
        2 => {
            if let Some(event) = context.event {
                apply_event_detail(data, &context.record, event, line);
            }
            context
        }
        _ => context,
    }
}

fn open_record(data: &mut GedcomData, line: &GedcomLine<'_>) -> ParseContext {
    let record = match (line.tag, line.xref) {
        ("INDI", Some(id)) => {
            data.individuals.insert(id.to_string(), Individual::new(id));
            RecordCursor::Individual(id.to_string())
        }
        ("FAM", Some(id)) => {
            data.families.insert(id.to_string(), Family::new(id));
            RecordCursor::Family(id.to_string())
        }
        _ => RecordCursor::None,
    };
    ParseContext { record, event: None }
}

fn apply_level1(data: &mut GedcomData, record: &RecordCursor, line: &GedcomLine<'_>) {
    match record {
        RecordCursor::Individual(id) => {
            let Some(individual) = data.individuals.get_mut(id) else {
                return;
            };
            match line.tag {
                "NAME" => individual.set_name(line.value),
                "SEX" => individual.sex = Sex::from_gedcom(line.value),
                "FAMC" => individual.family_as_child = Some(line.value.to_string()),
                "FAMS" => individual.families_as_spouse.push(line.value.to_string()),
                _ => {}
            }
        }
        RecordCursor::Family(id) => {
            let Some(family) = data.families.get_mut(id) else {
                return;
            };
            match line.tag {
                "HUSB" => family.husband_id = Some(line.value.to_string()),
                "WIFE" => family.wife_id = Some(line.value.to_string()),
                "CHIL" => family.children.push(line.value.to_string()),
                _ => {}
            }
        }
        RecordCursor::None => {}
    }
}

fn apply_event_detail(
    data: &mut GedcomData,
    record: &RecordCursor,
    event: EventTag,
    line: &GedcomLine<'_>,
) {
    let value = Some(line.value.to_string());
    match (record, event, line.tag) {
        (RecordCursor::Individual(id), EventTag::Birth | EventTag::Death, "DATE" | "PLAC") => {
            let Some(individual) = data.individuals.get_mut(id) else {
                return;
            };
            match (event, line.tag) {
                (EventTag::Birth, "DATE") => individual.birth_date = value,
                (EventTag::Birth, _) => individual.birth_place = value,
                (_, "DATE") => individual.death_date = value,
                _ => individual.death_place = value,
            }
        }
        (RecordCursor::Family(id), EventTag::Marriage, "DATE" | "PLAC") => {
            let Some(family) = data.families.get_mut(id) else {
                return;
            };
            if line.tag == "DATE" {
                family.marriage_date = value;
            } else {
                family.marriage_place = value;
            }
        }
        _ => {}
    }
}
