use serde::{Deserialize, Serialize};

use crate::domain::{
    Stamp,
    validation::{Field, ValidationError, optional, required},
};

/// One observation logged against a tree.
///
/// Records are never edited once they are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the record was saved.
    pub time: Stamp,
    /// Short headline for the record.
    pub title: String,
    /// Key of the learning card this record relates to, or empty.
    #[serde(default)]
    pub topic: String,
    /// What was seen.
    #[serde(default)]
    pub observation: String,
    /// Why it might be so.
    #[serde(default)]
    pub hypothesis: String,
    /// How the hypothesis was checked.
    #[serde(default)]
    pub evidence: String,
    /// What was learned.
    #[serde(default)]
    pub result: String,
    /// A description of a photo taken (the photo itself is not stored).
    #[serde(default)]
    pub photo_note: String,
}

impl Record {
    /// Whether the record is linked to a learning card.
    #[must_use]
    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }
}

/// Raw user input for a new [`Record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    /// Required headline.
    pub title: String,
    /// Optional learning card key.
    pub topic: Option<String>,
    /// Optional observation text.
    pub observation: Option<String>,
    /// Optional hypothesis text.
    pub hypothesis: Option<String>,
    /// Optional evidence text.
    pub evidence: Option<String>,
    /// Optional result text.
    pub result: Option<String>,
    /// Optional photo description.
    pub photo_note: Option<String>,
}

impl RecordDraft {
    /// Starts a draft with the given title and no other fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validates and trims the draft, stamping it with the current time.
    pub(super) fn into_record(self) -> Result<Record, ValidationError> {
        Ok(Record {
            time: Stamp::now(),
            title: required(Field::Title, &self.title)?,
            topic: optional(self.topic.as_deref()),
            observation: optional(self.observation.as_deref()),
            hypothesis: optional(self.hypothesis.as_deref()),
            evidence: optional(self.evidence.as_deref()),
            result: optional(self.result.as_deref()),
            photo_note: optional(self.photo_note.as_deref()),
        })
    }
}
