use std::collections::HashMap;

use crate::{AnswerValue, ElementId};

/// The in-progress answer mapping of one respondent.
///
/// Keyed by element id. Only answerable elements end up here; static blocks
/// (sections, images, text) never have an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: HashMap<ElementId, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer mapping.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record (or overwrite) the answer for an element.
    pub fn insert(&mut self, id: impl Into<ElementId>, value: impl Into<AnswerValue>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get the answer for an element.
    pub fn get(&self, id: &ElementId) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    /// Check if an answer exists for an element.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the answer for an element.
    pub fn remove(&mut self, id: &ElementId) -> Option<AnswerValue> {
        self.values.remove(id)
    }

    /// Get an iterator over all id-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &AnswerValue)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
