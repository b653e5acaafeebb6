use std::fmt;

use non_empty_string::NonEmptyString;
use thiserror::Error;

/// A user-supplied field that is checked before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The name of a tree.
    Name,
    /// Where on campus a tree stands.
    Location,
    /// The species of a tree.
    Species,
    /// The raw, comma separated tag input of a tree.
    Tags,
    /// The title of an observation record.
    Title,
}

impl Field {
    /// The longest accepted input, in characters, after trimming.
    #[must_use]
    pub const fn max_chars(self) -> usize {
        match self {
            Self::Name | Self::Species => 50,
            Self::Location | Self::Title => 80,
            Self::Tags => 120,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Species => "species",
            Self::Tags => "tags",
            Self::Title => "title",
        };
        f.write_str(name)
    }
}

/// User input was rejected before anything was changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or contained only whitespace.
    #[error("the {0} is required")]
    Missing(Field),
    /// A field is longer than [`Field::max_chars`].
    #[error("the {field} must be at most {max} characters")]
    TooLong {
        /// The offending field.
        field: Field,
        /// Its character limit.
        max: usize,
    },
}

/// Trims `raw` and rejects it if nothing is left or it is too long.
pub(super) fn required(field: Field, raw: &str) -> Result<String, ValidationError> {
    let value = NonEmptyString::new(raw.trim().to_string())
        .map_err(|_| ValidationError::Missing(field))?;
    within_limit(field, value.as_str())?;
    Ok(value.as_str().to_string())
}

/// Trims an optional free-text field, treating absence as empty.
pub(super) fn optional(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

/// Like [`optional`], but rejects input longer than the field allows.
pub(super) fn optional_capped(
    field: Field,
    raw: Option<&str>,
) -> Result<String, ValidationError> {
    let value = optional(raw);
    within_limit(field, &value)?;
    Ok(value)
}

fn within_limit(field: Field, value: &str) -> Result<(), ValidationError> {
    let max = field.max_chars();
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
