//! Label id <-> name table published by the detection service

use std::collections::HashMap;

/// Mapping table from label ids to human-readable names.
///
/// A label's id is its position in the list the service returns. When a
/// name appears more than once, reverse lookup yields the lowest id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
    ids: HashMap<String, i32>,
}

impl LabelMap {
    pub fn from_labels(labels: Vec<String>) -> Self {
        let mut ids = HashMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if let Ok(id) = i32::try_from(index) {
                ids.entry(label.clone()).or_insert(id);
            }
        }

        Self { labels, ids }
    }

    pub fn label(&self, id: i32) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.labels.get(index))
            .map(String::as_str)
    }

    pub fn id_of(&self, label: &str) -> Option<i32> {
        self.ids.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(id, label)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(index, label)| i32::try_from(index).ok().map(|id| (id, label.as_str())))
    }
}
