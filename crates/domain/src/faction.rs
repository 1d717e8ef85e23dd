//! Faction reference records
//!
//! A `FactionRecord` is the loosely structured document the reference data
//! service returns for one faction. Every slot is optional, and list
//! elements may carry any combination of `id`, `name` and `title`.
//!
//! Deserialization is lenient: a slot holding the wrong JSON shape is read
//! as absent, and a malformed list element is kept as an empty entry so
//! that the positions of its neighbours do not shift.

use serde::Deserialize;

use crate::ids::FactionId;

/// One faction's reference data
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Whether the faction has an operative selection page
    #[serde(default, deserialize_with = "lenient::value")]
    pub operative_selection: Option<bool>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub operatives: Option<Vec<RecordEntry>>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub rules: Option<Vec<RecordEntry>>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub strategic_ploys: Option<Vec<RecordEntry>>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub tactical_ploys: Option<Vec<RecordEntry>>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub equipment: Option<Vec<RecordEntry>>,
    #[serde(default, alias = "tacops", deserialize_with = "lenient::entries")]
    pub tac_ops: Option<Vec<RecordEntry>>,
}

impl FactionRecord {
    /// The record's own identifier in canonical form, if it has a usable one.
    pub fn faction_id(&self) -> Option<FactionId> {
        self.id
            .as_deref()
            .and_then(|raw| FactionId::parse(raw).ok())
    }

    /// Whether the operative selection flag is set.
    pub fn has_operative_selection(&self) -> bool {
        self.operative_selection.unwrap_or(false)
    }
}

/// An element of one of a faction's lists (operative, rule, ploy, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
}

impl RecordEntry {
    /// Explicit identifier, trimmed; blank ids count as absent.
    pub fn anchor_id(&self) -> Option<&str> {
        non_blank(self.id.as_deref())
    }

    /// Display label: the name, else the title.
    pub fn display_label(&self) -> Option<&str> {
        non_blank(self.name.as_deref()).or_else(|| non_blank(self.title.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use super::RecordEntry;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape<T> {
        Expected(T),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Other(IgnoredAny),
    }

    /// Any value of the expected type, anything else as `None`.
    pub fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(match Option::<Shape<T>>::deserialize(deserializer)? {
            Some(Shape::Expected(v)) => Some(v),
            Some(Shape::Other(_)) | None => None,
        })
    }

    /// Strings as-is, integers rendered as strings, anything else as `None`.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Text>::deserialize(deserializer)? {
            Some(Text::Str(s)) => Some(s),
            Some(Text::Int(n)) => Some(n.to_string()),
            Some(Text::Other(_)) | None => None,
        })
    }

    /// A list of entries; malformed elements become empty entries in place.
    pub fn entries<'de, D>(deserializer: D) -> Result<Option<Vec<RecordEntry>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = value::<D, Vec<Shape<RecordEntry>>>(deserializer)?;
        Ok(list.map(|items| {
            items
                .into_iter()
                .map(|item| match item {
                    Shape::Expected(entry) => entry,
                    Shape::Other(_) => RecordEntry::default(),
                })
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "kt24-legionary",
            "name": "Legionary",
            "operativeSelection": true,
            "operatives": [{"id": "chosen", "name": "Chosen"}],
            "rules": [{"title": "Marked for Death"}],
            "strategicPloys": [{"name": "Malice"}],
            "tacticalPloys": [],
            "equipment": [{"id": "spikes"}],
            "tacOps": [{"name": "Seize Ground"}]
        }"#;

        let record: FactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.faction_id().unwrap().as_str(), "legionary");
        assert!(record.has_operative_selection());
        assert_eq!(record.operatives.as_ref().unwrap().len(), 1);
        assert_eq!(
            record.rules.as_ref().unwrap()[0].display_label(),
            Some("Marked for Death")
        );
        assert_eq!(record.tactical_ploys, Some(vec![]));
        assert_eq!(record.tac_ops.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_slots_are_none() {
        let record: FactionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, FactionRecord::default());
        assert!(!record.has_operative_selection());
        assert!(record.faction_id().is_none());
    }

    #[test]
    fn test_wrong_shapes_are_read_as_absent() {
        let json = r#"{
            "operativeSelection": "yes",
            "operatives": "not a list",
            "rules": {"title": "object instead of list"},
            "equipment": null
        }"#;

        let record: FactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.operative_selection, None);
        assert_eq!(record.operatives, None);
        assert_eq!(record.rules, None);
        assert_eq!(record.equipment, None);
    }

    #[test]
    fn test_malformed_entry_keeps_its_position() {
        let json = r#"{"operatives": [{"name": "A"}, 42, {"name": "C"}]}"#;

        let record: FactionRecord = serde_json::from_str(json).unwrap();
        let operatives = record.operatives.unwrap();

        assert_eq!(operatives.len(), 3);
        assert_eq!(operatives[1], RecordEntry::default());
        assert_eq!(operatives[2].display_label(), Some("C"));
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let json = r#"{"operatives": [{"id": 7, "name": true}]}"#;

        let record: FactionRecord = serde_json::from_str(json).unwrap();
        let entry = &record.operatives.unwrap()[0];

        assert_eq!(entry.anchor_id(), Some("7"));
        assert_eq!(entry.name, None);
    }

    #[test]
    fn test_label_prefers_name_over_title() {
        let entry = RecordEntry {
            id: None,
            name: Some("Name".into()),
            title: Some("Title".into()),
        };
        assert_eq!(entry.display_label(), Some("Name"));

        let blank_name = RecordEntry {
            id: Some("  ".into()),
            name: Some(" ".into()),
            title: Some(" Title ".into()),
        };
        assert_eq!(blank_name.display_label(), Some("Title"));
        assert_eq!(blank_name.anchor_id(), None);
    }

    #[test]
    fn test_tacops_alias() {
        let record: FactionRecord =
            serde_json::from_str(r#"{"tacops": [{"id": "recon"}]}"#).unwrap();
        assert_eq!(record.tac_ops.unwrap()[0].anchor_id(), Some("recon"));
    }
}
