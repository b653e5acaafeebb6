use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters kept from a random UUID when generating an id.
const GENERATED_LEN: usize = 8;

/// Opaque identifier of a registered tree.
///
/// Generated ids are the first eight hex digits of a random v4 UUID. Ids read
/// back from a document are accepted as long as they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreeId(NonEmptyString);

impl TreeId {
    /// Creates a `TreeId` from an existing token.
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTreeIdError`] if the token is blank.
    pub fn new(s: &str) -> Result<Self, InvalidTreeIdError> {
        NonEmptyString::new(s.trim().to_string())
            .map(Self)
            .map_err(|_| InvalidTreeIdError(s.to_string()))
    }

    /// Generates a fresh random id.
    ///
    /// Uniqueness within a document is the caller's concern; see
    /// [`Document::create`](crate::Document::create).
    #[must_use]
    pub fn random() -> Self {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(GENERATED_LEN)
            .collect();
        Self::new(&token).unwrap_or_else(|_| unreachable!("uuid tokens are never blank"))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The given tree id was blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tree id '{0}': ids must not be blank")]
pub struct InvalidTreeIdError(String);

impl TryFrom<String> for TreeId {
    type Error = InvalidTreeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TreeId> for String {
    fn from(id: TreeId) -> Self {
        id.as_str().to_string()
    }
}

impl FromStr for TreeId {
    type Err = InvalidTreeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Deref for TreeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
