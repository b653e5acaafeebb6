//! Whole-document import and export.
//!
//! Exported bytes are exactly what [`Store::save`](crate::Store::save) writes
//! to disk: UTF-8 JSON, two-space indented, with non-ASCII text unescaped.

use serde_json::Value;
use thiserror::Error;

use crate::{Document, DocumentError};

/// Suggested file name for an exported document.
pub const EXPORT_FILE_NAME: &str = "trees.json";

/// MIME type of an exported document.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// An uploaded file is not a document.
#[derive(Debug, Error)]
pub enum ImportFormatError {
    /// The bytes are not valid UTF-8.
    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// The text is not valid JSON.
    #[error("file is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    /// The top level has no `trees` list.
    #[error("file must contain a top-level \"trees\" list")]
    MissingTrees,
    /// The `trees` list does not hold valid trees.
    #[error("file contains an invalid tree: {0}")]
    InvalidShape(#[source] serde_json::Error),
    /// The trees are well formed but break the registry rules.
    #[error("file contains inconsistent trees: {0}")]
    Inconsistent(#[from] DocumentError),
}

/// Serializes the document for download.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export(document: &Document) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_string_pretty(document).map(String::into_bytes)
}

/// Parses a previously exported document.
///
/// # Errors
///
/// Returns [`ImportFormatError`] if the bytes are not UTF-8 JSON, have no
/// top-level `trees` list, contain entries that are not valid trees, repeat
/// a tree id, or leave a tree name, location or record title blank.
pub fn import(bytes: &[u8]) -> Result<Document, ImportFormatError> {
    let text = std::str::from_utf8(bytes)?;
    let value: Value = serde_json::from_str(text).map_err(ImportFormatError::Syntax)?;

    if !value.get("trees").is_some_and(Value::is_array) {
        return Err(ImportFormatError::MissingTrees);
    }

    let document: Document =
        serde_json::from_value(value).map_err(ImportFormatError::InvalidShape)?;
    document.check()?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{Field, RecordDraft, TreeDraft, TreeId, ValidationError};

    fn sample() -> Document {
        let mut doc = Document::new();
        let id = doc
            .create(TreeDraft {
                species: Some("은행나무".to_string()),
                tags: Some("그늘, 열매, 그늘".to_string()),
                notes: Some("가을에 노랗게 변함".to_string()),
                ..TreeDraft::new("운동장 은행나무", "운동장 동쪽")
            })
            .unwrap()
            .id()
            .clone();
        doc.create(TreeDraft::new("소나무", "정문")).unwrap();
        doc.find_mut(&id)
            .unwrap()
            .append(RecordDraft {
                topic: Some("광합성".to_string()),
                hypothesis: Some("햇빛 쪽 잎이 더 푸를 것 같아요".to_string()),
                ..RecordDraft::new("잎 색 비교")
            })
            .unwrap();
        doc
    }

    #[test]
    fn import_of_export_is_identical() {
        let doc = sample();
        let bytes = export(&doc).unwrap();
        assert_eq!(import(&bytes).unwrap(), doc);
    }

    #[test]
    fn export_has_the_persisted_layout() {
        let bytes = export(&sample()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let tree = &value["trees"][0];
        for key in [
            "id", "created", "name", "location", "species", "tags", "notes", "records",
        ] {
            assert!(tree.get(key).is_some(), "missing tree key {key}");
        }
        let record = &tree["records"][0];
        for key in [
            "time",
            "title",
            "topic",
            "observation",
            "hypothesis",
            "evidence",
            "result",
            "photo_note",
        ] {
            assert!(record.get(key).is_some(), "missing record key {key}");
        }
        assert_eq!(tree["tags"], serde_json::json!(["그늘", "열매", "그늘"]));
    }

    #[test]
    fn imports_documents_written_by_hand() {
        let json = r#"{
          "trees": [
            {
              "id": "a1b2c3d4",
              "created": "2025-03-02 09:15",
              "name": "벚나무",
              "location": "급식실 옆",
              "records": [
                { "time": "2025-04-01 12:30", "title": "꽃이 폈어요" }
              ]
            }
          ]
        }"#;

        let doc = import(json.as_bytes()).unwrap();
        let tree = &doc.trees()[0];
        assert_eq!(tree.id().as_str(), "a1b2c3d4");
        assert_eq!(tree.species(), "");
        assert!(tree.tags().is_empty());
        assert_eq!(tree.records()[0].title, "꽃이 폈어요");
    }

    #[test_case(br#"{"forest": []}"#; "no trees key")]
    #[test_case(br#"{"trees": {}}"#; "trees is an object")]
    #[test_case(br#"{"trees": null}"#; "trees is null")]
    #[test_case(br#"[1, 2, 3]"#; "top level is a list")]
    fn rejects_missing_trees_list(bytes: &[u8]) {
        assert!(matches!(import(bytes), Err(ImportFormatError::MissingTrees)));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            import(b"{ trees: "),
            Err(ImportFormatError::Syntax(_))
        ));
    }

    #[test]
    fn rejects_non_utf8() {
        assert!(matches!(
            import(&[0xff, 0xfe, 0x00]),
            Err(ImportFormatError::Encoding(_))
        ));
    }

    #[test]
    fn rejects_trees_without_required_fields() {
        let json = r#"{"trees": [{"id": "x", "name": "나무"}]}"#;
        assert!(matches!(
            import(json.as_bytes()),
            Err(ImportFormatError::InvalidShape(_))
        ));
    }

    fn tree_json(id: &str, name: &str, location: &str, title: &str) -> String {
        format!(
            r#"{{"id": "{id}", "created": "2025-03-02 09:15", "name": "{name}", "location": "{location}", "records": [{{"time": "2025-03-02 09:20", "title": "{title}"}}]}}"#
        )
    }

    #[test_case(
        &[("dup", "벚나무", "정문", "꽃"), ("dup", "소나무", "후문", "잎")],
        &DocumentError::DuplicateId(TreeId::new("dup").unwrap());
        "duplicate ids"
    )]
    #[test_case(
        &[("a1", "   ", "정문", "꽃")],
        &DocumentError::InvalidTree { id: TreeId::new("a1").unwrap(), source: ValidationError::Missing(Field::Name) };
        "blank name"
    )]
    #[test_case(
        &[("a1", "벚나무", "", "꽃")],
        &DocumentError::InvalidTree { id: TreeId::new("a1").unwrap(), source: ValidationError::Missing(Field::Location) };
        "blank location"
    )]
    #[test_case(
        &[("a1", "벚나무", "정문", "꽃"), ("b2", "소나무", "후문", " ")],
        &DocumentError::InvalidTree { id: TreeId::new("b2").unwrap(), source: ValidationError::Missing(Field::Title) };
        "blank record title"
    )]
    fn rejects_inconsistent_trees(
        trees: &[(&str, &str, &str, &str)],
        expected: &DocumentError,
    ) {
        let trees: Vec<_> = trees
            .iter()
            .map(|(id, name, location, title)| tree_json(id, name, location, title))
            .collect();
        let json = format!(r#"{{"trees": [{}]}}"#, trees.join(", "));

        match import(json.as_bytes()) {
            Err(ImportFormatError::Inconsistent(error)) => assert_eq!(&error, expected),
            other => panic!("expected an inconsistent document, got {other:?}"),
        }
    }
}
