//! Section outline for a faction page
//!
//! The outline is the two-level navigation structure shown beside a faction's
//! reference page: a fixed sequence of sections, each listing the entries of
//! the matching `FactionRecord` list. It is rebuilt from scratch whenever the
//! record changes.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;
use crate::faction::{FactionRecord, RecordEntry};

/// The kinds of section a faction page can have, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Selection,
    FactionRules,
    Datacards,
    StrategicPloys,
    TacticalPloys,
    Equipment,
    TacOps,
}

impl SectionKind {
    /// All kinds in the order sections are rendered.
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Selection,
        SectionKind::FactionRules,
        SectionKind::Datacards,
        SectionKind::StrategicPloys,
        SectionKind::TacticalPloys,
        SectionKind::Equipment,
        SectionKind::TacOps,
    ];

    /// Anchor id of the section.
    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Selection => "selection",
            SectionKind::FactionRules => "faction-rules",
            SectionKind::Datacards => "datacards",
            SectionKind::StrategicPloys => "strategic-ploys",
            SectionKind::TacticalPloys => "tactical-ploys",
            SectionKind::Equipment => "equipment",
            SectionKind::TacOps => "tac-ops",
        }
    }

    /// Heading shown for the section.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Selection => "Operative Selection",
            SectionKind::FactionRules => "Faction Rules",
            SectionKind::Datacards => "Datacards",
            SectionKind::StrategicPloys => "Strategic Ploys",
            SectionKind::TacticalPloys => "Tactical Ploys",
            SectionKind::Equipment => "Equipment",
            SectionKind::TacOps => "Tac Ops",
        }
    }

    /// Singular noun used for positional fallback labels ("Operative 3").
    pub fn entry_noun(self) -> &'static str {
        match self {
            SectionKind::Selection => "Selection",
            SectionKind::FactionRules => "Rule",
            SectionKind::Datacards => "Operative",
            SectionKind::StrategicPloys => "Strategic Ploy",
            SectionKind::TacticalPloys => "Tactical Ploy",
            SectionKind::Equipment => "Equipment",
            SectionKind::TacOps => "Tac Op",
        }
    }

    /// The record list backing this kind. `None` for kinds without subsections.
    fn entries(self, record: &FactionRecord) -> Option<&[RecordEntry]> {
        match self {
            SectionKind::Selection => None,
            SectionKind::FactionRules => record.rules.as_deref(),
            SectionKind::Datacards => record.operatives.as_deref(),
            SectionKind::StrategicPloys => record.strategic_ploys.as_deref(),
            SectionKind::TacticalPloys => record.tactical_ploys.as_deref(),
            SectionKind::Equipment => record.equipment.as_deref(),
            SectionKind::TacOps => record.tac_ops.as_deref(),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown section kind: {}", s)))
    }
}

/// A navigable entry inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subsection {
    /// Non-empty, unique within the parent section
    pub id: String,
    pub label: String,
}

/// A top-level section of the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub id: &'static str,
    pub label: &'static str,
    pub children: Vec<Subsection>,
}

impl Section {
    fn new(kind: SectionKind, children: Vec<Subsection>) -> Self {
        Self {
            kind,
            id: kind.id(),
            label: kind.label(),
            children,
        }
    }
}

/// Where an anchor sits in the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlinePosition {
    pub section: usize,
    pub subsection: Option<usize>,
}

/// Ordered sections of a faction page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionOutline {
    sections: Vec<Section>,
}

impl SectionOutline {
    /// Build the outline for a record. See [`build_outline`].
    pub fn build(record: &FactionRecord) -> Self {
        build_outline(record)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// The section of the given kind, if the record produced one.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Find a section or subsection by anchor id.
    ///
    /// Section ids are matched first; subsection ids are only unique within
    /// their section, so the first match in outline order wins.
    pub fn locate(&self, anchor: &str) -> Option<OutlinePosition> {
        if let Some(section) = self.sections.iter().position(|s| s.id == anchor) {
            return Some(OutlinePosition {
                section,
                subsection: None,
            });
        }
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section, s)| {
                s.children
                    .iter()
                    .position(|c| c.id == anchor)
                    .map(|child| OutlinePosition {
                        section,
                        subsection: Some(child),
                    })
            })
    }
}

impl<'a> IntoIterator for &'a SectionOutline {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Build the navigable outline for a faction record.
///
/// Total: slots that are missing, empty or malformed simply produce no
/// section. Sections appear in [`SectionKind::ALL`] order; subsections keep
/// the order of the source list.
///
/// # Examples
/// ```
/// use tacref_domain::{build_outline, FactionRecord, RecordEntry, SectionKind};
///
/// let record = FactionRecord {
///     operatives: Some(vec![RecordEntry {
///         id: None,
///         name: None,
///         title: Some("Gunner".into()),
///     }]),
///     ..Default::default()
/// };
///
/// let outline = build_outline(&record);
/// let datacards = outline.section(SectionKind::Datacards).unwrap();
/// assert_eq!(datacards.children[0].label, "Gunner");
/// assert_eq!(datacards.children[0].id, "datacards-0");
/// ```
pub fn build_outline(record: &FactionRecord) -> SectionOutline {
    let sections = SectionKind::ALL
        .into_iter()
        .filter_map(|kind| build_section(record, kind))
        .collect();
    SectionOutline { sections }
}

fn build_section(record: &FactionRecord, kind: SectionKind) -> Option<Section> {
    if kind == SectionKind::Selection {
        return record
            .has_operative_selection()
            .then(|| Section::new(kind, Vec::new()));
    }
    let entries = kind.entries(record).filter(|entries| !entries.is_empty())?;
    Some(Section::new(kind, subsections(kind, entries)))
}

fn subsections(kind: SectionKind, entries: &[RecordEntry]) -> Vec<Subsection> {
    let mut taken: HashSet<String> = HashSet::with_capacity(entries.len());
    let mut children = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let explicit = entry.anchor_id();
        let label = entry.display_label();
        if explicit.is_none() && label.is_none() {
            continue;
        }

        // Fallbacks use the original index so surviving entries keep stable ids.
        let id = match explicit {
            Some(id) if !taken.contains(id) => id.to_string(),
            _ => unique_id(&taken, format!("{}-{}", kind.id(), index)),
        };
        let label = match label {
            Some(label) => label.to_string(),
            None => format!("{} {}", kind.entry_noun(), index + 1),
        };

        taken.insert(id.clone());
        children.push(Subsection { id, label });
    }

    children
}

fn unique_id(taken: &HashSet<String>, base: String) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
