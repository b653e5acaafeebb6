//! The root persisted unit.
//!
//! A [`Document`] owns every registered [`Tree`] in registration order. It is
//! the unit of load and save: there are no partial updates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{Tree, TreeDraft, TreeId, ValidationError};

/// A document read from outside breaks the registry rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Two trees share one id.
    #[error("tree id #{0} is used more than once")]
    DuplicateId(TreeId),
    /// A tree or one of its records has a blank required field.
    #[error("tree #{id} is invalid: {source}")]
    InvalidTree {
        /// The offending tree.
        id: TreeId,
        /// What is wrong with it.
        #[source]
        source: ValidationError,
    },
}

/// The whole dataset: every registered tree, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    trees: Vec<Tree>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { trees: Vec::new() }
    }

    /// All trees in registration order.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// The number of registered trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether no trees are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Total number of observation records across every tree.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.records().len()).sum()
    }

    /// Registers a new tree.
    ///
    /// The tree receives a freshly generated id that is not yet used by any
    /// tree in this document.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name or location is blank. The
    /// registry is unchanged in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&mut self, draft: TreeDraft) -> Result<&Tree, ValidationError> {
        let tree = draft.into_tree(self.unused_id())?;
        tracing::debug!(id = %tree.id(), "registered tree");
        self.trees.push(tree);
        Ok(&self.trees[self.trees.len() - 1])
    }

    /// Looks up a tree by exact id.
    #[must_use]
    pub fn find(&self, id: &TreeId) -> Option<&Tree> {
        self.trees.iter().find(|tree| tree.id() == id)
    }

    /// Looks up a tree by exact id for appending records.
    pub fn find_mut(&mut self, id: &TreeId) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|tree| tree.id() == id)
    }

    /// Case-insensitive substring search over name, location, notes and
    /// tags.
    ///
    /// A blank query returns every tree. Results keep registration order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Tree> {
        let query = query.trim();
        if query.is_empty() {
            return self.trees.iter().collect();
        }
        let needle = query.to_lowercase();
        self.trees
            .iter()
            .filter(|tree| tree.matches(&needle))
            .collect()
    }

    /// Checks that ids are unique and that every tree and record has its
    /// required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`DocumentError`] found, in registration order.
    pub fn check(&self) -> Result<(), DocumentError> {
        let mut seen = BTreeSet::new();
        for tree in &self.trees {
            if !seen.insert(tree.id()) {
                return Err(DocumentError::DuplicateId(tree.id().clone()));
            }
            tree.check().map_err(|source| DocumentError::InvalidTree {
                id: tree.id().clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn unused_id(&self) -> TreeId {
        self.unused_id_with(TreeId::random)
    }

    fn unused_id_with(&self, mut next: impl FnMut() -> TreeId) -> TreeId {
        loop {
            let id = next();
            if self.find(&id).is_none() {
                return id;
            }
            tracing::debug!(%id, "generated id already taken, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, RecordDraft};

    fn ginkgo() -> TreeDraft {
        TreeDraft {
            tags: Some("그늘, 열매".to_string()),
            notes: Some("가을에 노랗게 변함".to_string()),
            ..TreeDraft::new("운동장 은행나무", "운동장 동쪽")
        }
    }

    #[test]
    fn created_tree_can_be_found() {
        let mut doc = Document::new();
        let id = doc.create(ginkgo()).unwrap().id().clone();

        let found = doc.find(&id).expect("tree should be registered");
        assert_eq!(found.name(), "운동장 은행나무");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn invalid_draft_leaves_registry_unchanged() {
        let mut doc = Document::new();
        doc.create(ginkgo()).unwrap();
        let before = doc.clone();

        let error = doc.create(TreeDraft::new("소나무", " ")).unwrap_err();

        assert_eq!(error, ValidationError::Missing(Field::Location));
        assert_eq!(doc, before);
    }

    #[test]
    fn ids_are_unique() {
        let mut doc = Document::new();
        for _ in 0..50 {
            doc.create(TreeDraft::new("나무", "교정")).unwrap();
        }
        let mut ids: Vec<_> = doc.trees().iter().map(Tree::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn taken_ids_are_regenerated() {
        let mut doc = Document::new();
        let taken = doc.create(ginkgo()).unwrap().id().clone();
        let fresh = TreeId::new("fresh").unwrap();
        let mut ids = [taken.clone(), taken, fresh.clone()].into_iter();

        let id = doc.unused_id_with(|| ids.next().expect("generator exhausted"));

        assert_eq!(id, fresh);
        assert!(ids.next().is_none(), "both taken ids should have been tried");
    }

    #[test]
    fn check_accepts_created_documents() {
        let mut doc = Document::new();
        let id = doc.create(ginkgo()).unwrap().id().clone();
        doc.create(TreeDraft::new("소나무", "정문")).unwrap();
        doc.find_mut(&id)
            .unwrap()
            .append(RecordDraft::new("잎 관찰"))
            .unwrap();

        assert_eq!(doc.check(), Ok(()));
    }

    #[test]
    fn check_rejects_duplicate_ids() {
        let mut doc = Document::new();
        doc.create(ginkgo()).unwrap();
        let copy = doc.trees[0].clone();
        doc.trees.push(copy);

        assert_eq!(
            doc.check(),
            Err(DocumentError::DuplicateId(doc.trees[0].id().clone()))
        );
    }

    #[test]
    fn trees_keep_registration_order() {
        let mut doc = Document::new();
        for name in ["소나무", "느티나무", "벚나무"] {
            doc.create(TreeDraft::new(name, "정문")).unwrap();
        }
        let names: Vec<_> = doc.trees().iter().map(Tree::name).collect();
        assert_eq!(names, ["소나무", "느티나무", "벚나무"]);
    }

    #[test]
    fn search_matches_tags_and_name_substrings() {
        let mut doc = Document::new();
        doc.create(TreeDraft::new("소나무", "정문")).unwrap();
        doc.create(ginkgo()).unwrap();

        let by_tag = doc.search("그늘");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].name(), "운동장 은행나무");

        let by_name = doc.search("은행");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name(), "운동장 은행나무");

        assert!(doc.search("벚꽃").is_empty());
    }

    #[test]
    fn search_ignores_case() {
        let mut doc = Document::new();
        doc.create(TreeDraft::new("Big Oak", "Back Gate")).unwrap();

        assert_eq!(doc.search("OAK").len(), 1);
        assert_eq!(doc.search("  back gate ").len(), 1);
    }

    #[test]
    fn blank_search_returns_everything() {
        let mut doc = Document::new();
        doc.create(TreeDraft::new("소나무", "정문")).unwrap();
        doc.create(ginkgo()).unwrap();

        assert_eq!(doc.search("").len(), 2);
        assert_eq!(doc.search("   ").len(), 2);
    }

    #[test]
    fn record_count_sums_all_ledgers() {
        let mut doc = Document::new();
        let first = doc.create(TreeDraft::new("소나무", "정문")).unwrap().id().clone();
        let second = doc.create(ginkgo()).unwrap().id().clone();

        let tree = doc.find_mut(&first).unwrap();
        tree.append(RecordDraft::new("잎 관찰")).unwrap();
        tree.append(RecordDraft::new("껍질 관찰")).unwrap();
        doc.find_mut(&second)
            .unwrap()
            .append(RecordDraft::new("열매"))
            .unwrap();

        assert_eq!(doc.record_count(), 3);
    }

    #[test]
    fn serializes_with_trees_key() {
        let json = serde_json::to_value(Document::new()).unwrap();
        assert_eq!(json, serde_json::json!({ "trees": [] }));
    }
}
