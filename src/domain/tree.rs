//! A registered campus tree and its ledger of observation records.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    Record, RecordDraft, Stamp, TreeId,
    validation::{Field, ValidationError, optional, optional_capped, required},
};

/// A tree registered on the school campus.
///
/// The records of a tree form an append-only ledger, stored oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    id: TreeId,
    created: Stamp,
    name: String,
    location: String,
    #[serde(default)]
    species: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    records: Vec<Record>,
}

impl Tree {
    /// The tree's identifier.
    #[must_use]
    pub const fn id(&self) -> &TreeId {
        &self.id
    }

    /// When the tree was registered.
    #[must_use]
    pub const fn created(&self) -> Stamp {
        self.created
    }

    /// The name given to the tree, e.g. "운동장 은행나무".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where on campus the tree stands.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Species or classification, possibly empty.
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Tags in the order they were entered. Duplicates are kept.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Free-text summary notes, possibly empty.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Observation records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The most recent observation record, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }

    /// A one-line label: `name · location · #id`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} · {} · #{}", self.name, self.location, self.id)
    }

    /// Appends a new observation record to the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the draft has a blank title. The ledger
    /// is left untouched in that case.
    #[instrument(level = "debug", skip(self), fields(tree = %self.id))]
    pub fn append(&mut self, draft: RecordDraft) -> Result<&Record, ValidationError> {
        let record = draft.into_record()?;
        self.records.push(record);
        tracing::debug!(records = self.records.len(), "appended record");
        Ok(&self.records[self.records.len() - 1])
    }

    /// Whether `needle` (already lowercased) occurs in the name, location,
    /// notes or tags.
    pub(super) fn matches(&self, needle: &str) -> bool {
        let haystack = [
            self.name.as_str(),
            self.location.as_str(),
            self.notes.as_str(),
            &self.tags.join(" "),
        ]
        .join(" ")
        .to_lowercase();
        haystack.contains(needle)
    }

    /// Checks that a tree read from outside still has its required fields.
    ///
    /// Length limits only apply to new input, so they are not checked here.
    pub(super) fn check(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            (Field::Name, &self.name),
            (Field::Location, &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Missing(field));
            }
        }
        if self.records.iter().any(|record| record.title.trim().is_empty()) {
            return Err(ValidationError::Missing(Field::Title));
        }
        Ok(())
    }
}

/// Raw user input for registering a [`Tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDraft {
    /// Required name.
    pub name: String,
    /// Required location.
    pub location: String,
    /// Optional species.
    pub species: Option<String>,
    /// Comma separated tags, e.g. `"그늘, 열매, 키큼"`.
    pub tags: Option<String>,
    /// Optional summary notes.
    pub notes: Option<String>,
}

impl TreeDraft {
    /// Starts a draft with the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Validates and trims the draft into a tree with no records.
    pub(super) fn into_tree(self, id: TreeId) -> Result<Tree, ValidationError> {
        let name = required(Field::Name, &self.name)?;
        let location = required(Field::Location, &self.location)?;
        let species = optional_capped(Field::Species, self.species.as_deref())?;
        let tags = optional_capped(Field::Tags, self.tags.as_deref())?;
        Ok(Tree {
            id,
            created: Stamp::now(),
            name,
            location,
            species,
            tags: parse_tags(&tags),
            notes: optional(self.notes.as_deref()),
            records: Vec::new(),
        })
    }
}

/// Splits comma separated tag input, dropping blank pieces.
fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn tree(draft: TreeDraft) -> Tree {
        draft.into_tree(TreeId::new("t1").unwrap()).unwrap()
    }

    #[test_case("그늘, 열매, 키큼", &["그늘", "열매", "키큼"]; "simple list")]
    #[test_case(" 그늘 ,, ,열매,", &["그늘", "열매"]; "blank pieces dropped")]
    #[test_case("그늘,그늘", &["그늘", "그늘"]; "duplicates kept")]
    #[test_case("", &[]; "empty input")]
    fn tags_are_split_on_commas(raw: &str, expected: &[&str]) {
        assert_eq!(parse_tags(raw), expected);
    }

    #[test_case("", "정문", Field::Name; "blank name")]
    #[test_case("소나무", "  ", Field::Location; "blank location")]
    #[test_case(" ", "", Field::Name; "name checked first")]
    fn required_fields_are_enforced(name: &str, location: &str, field: Field) {
        let error = TreeDraft::new(name, location)
            .into_tree(TreeId::random())
            .unwrap_err();
        assert_eq!(error, ValidationError::Missing(field));
    }

    #[test_case(TreeDraft::new("나".repeat(51), "정문"), Field::Name, 50; "name")]
    #[test_case(TreeDraft::new("소나무", "정".repeat(81)), Field::Location, 80; "location")]
    #[test_case(TreeDraft {
        species: Some("종".repeat(51)),
        ..TreeDraft::new("소나무", "정문")
    }, Field::Species, 50; "species")]
    #[test_case(TreeDraft {
        tags: Some("그늘, ".repeat(31)),
        ..TreeDraft::new("소나무", "정문")
    }, Field::Tags, 120; "tags")]
    fn overlong_fields_are_rejected(draft: TreeDraft, field: Field, max: usize) {
        let error = draft.into_tree(TreeId::random()).unwrap_err();
        assert_eq!(error, ValidationError::TooLong { field, max });
    }

    #[test]
    fn draft_is_trimmed() {
        let tree = tree(TreeDraft {
            name: " 소나무 ".to_string(),
            location: "정문 ".to_string(),
            species: Some(" 소나무과".to_string()),
            tags: Some("키큼 , 사철".to_string()),
            notes: Some("\n늘 푸르다\n".to_string()),
        });

        assert_eq!(tree.name(), "소나무");
        assert_eq!(tree.location(), "정문");
        assert_eq!(tree.species(), "소나무과");
        assert_eq!(tree.tags(), ["키큼", "사철"]);
        assert_eq!(tree.notes(), "늘 푸르다");
        assert!(tree.records().is_empty());
    }

    #[test]
    fn label_joins_name_location_and_id() {
        let tree = tree(TreeDraft::new("은행나무", "운동장"));
        assert_eq!(tree.label(), "은행나무 · 운동장 · #t1");
    }

    #[test]
    fn append_keeps_earlier_records() {
        let mut tree = tree(TreeDraft::new("소나무", "정문"));
        tree.append(RecordDraft::new("첫 관찰")).unwrap();
        let before = tree.records().to_vec();

        let appended = tree.append(RecordDraft::new("두 번째")).unwrap().clone();

        assert_eq!(tree.records().len(), before.len() + 1);
        assert_eq!(&tree.records()[..before.len()], before.as_slice());
        assert_eq!(tree.latest(), Some(&appended));
    }

    #[test]
    fn append_rejects_blank_title() {
        let mut tree = tree(TreeDraft::new("소나무", "정문"));
        assert!(tree.append(RecordDraft::new("")).is_err());
        assert!(tree.records().is_empty());
    }

    #[test_case(r#"{"name": " ", "location": "정문", "records": []}"#, Field::Name; "blank name")]
    #[test_case(r#"{"name": "소나무", "location": "", "records": []}"#, Field::Location; "blank location")]
    #[test_case(
        r#"{"name": "소나무", "location": "정문", "records": [{"time": "2024-05-01 10:00", "title": "  "}]}"#,
        Field::Title;
        "blank record title"
    )]
    fn check_finds_blank_required_fields(fields: &str, field: Field) {
        let mut value: serde_json::Value = serde_json::from_str(fields).unwrap();
        value["id"] = "t1".into();
        value["created"] = "2024-05-01 09:00".into();
        let tree: Tree = serde_json::from_value(value).unwrap();

        assert_eq!(tree.check(), Err(ValidationError::Missing(field)));
    }

    #[test]
    fn check_accepts_registered_trees() {
        let mut tree = tree(TreeDraft::new("소나무", "정문"));
        tree.append(RecordDraft::new("첫 관찰")).unwrap();
        assert_eq!(tree.check(), Ok(()));
    }

    #[test]
    fn matching_is_case_insensitive_across_fields() {
        let tree = tree(TreeDraft {
            tags: Some("Shade".to_string()),
            notes: Some("Yellow in AUTUMN".to_string()),
            ..TreeDraft::new("Ginkgo", "Playground")
        });

        assert!(tree.matches("ginkgo"));
        assert!(tree.matches("playg"));
        assert!(tree.matches("autumn"));
        assert!(tree.matches("shade"));
        assert!(!tree.matches("pine"));
    }
}
