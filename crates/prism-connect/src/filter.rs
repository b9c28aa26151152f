//! Label allow-sets used to post-filter detection and tracking results

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// A local allow-set of labels.
///
/// Results whose label is not in the set are dropped after retrieval. The
/// filter is plain process-local state; the last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter<L: Eq + Hash> {
    included: HashSet<L>,
}

impl<L: Eq + Hash> LabelFilter<L> {
    /// Create an empty filter (rejects everything)
    pub fn new() -> Self {
        Self {
            included: HashSet::new(),
        }
    }

    pub fn add(&mut self, label: L) {
        self.included.insert(label);
    }

    /// Remove a label; removing an absent label is a no-op
    pub fn remove<Q>(&mut self, label: &Q)
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.included.remove(label);
    }

    pub fn clear(&mut self) {
        self.included.clear();
    }

    /// Whether results carrying `label` pass the filter
    pub fn check<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.included.contains(label)
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.included.iter()
    }
}

impl LabelFilter<i32> {
    /// Accept every label id in `0..count`
    pub fn with_label_count(count: usize) -> Self {
        (0..count).filter_map(|id| i32::try_from(id).ok()).collect()
    }
}

impl<L: Eq + Hash> Default for LabelFilter<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Eq + Hash> FromIterator<L> for LabelFilter<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            included: iter.into_iter().collect(),
        }
    }
}

impl<L: Eq + Hash> Extend<L> for LabelFilter<L> {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        self.included.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count_includes_all_ids() {
        let filter = LabelFilter::with_label_count(3);

        assert_eq!(filter.len(), 3);
        assert!(filter.check(&0));
        assert!(filter.check(&2));
        assert!(!filter.check(&3));
        assert!(!filter.check(&-1));
    }

    #[test]
    fn test_add_remove_clear() {
        let mut filter = LabelFilter::with_label_count(2);

        filter.remove(&1);
        assert!(!filter.check(&1));

        // removing twice is harmless
        filter.remove(&1);
        assert_eq!(filter.len(), 1);

        filter.add(7);
        assert!(filter.check(&7));

        filter.clear();
        assert!(filter.is_empty());
        assert!(!filter.check(&0));
    }

    #[test]
    fn test_string_labels_by_str() {
        let mut filter: LabelFilter<String> = LabelFilter::new();
        assert!(!filter.check("person"));

        filter.add("person".to_string());
        filter.extend(["car".to_string(), "bicycle".to_string()]);
        assert!(filter.check("person"));
        assert!(filter.check("car"));

        filter.remove("car");
        assert!(!filter.check("car"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut filter: LabelFilter<i32> = LabelFilter::default();
        filter.add(4);
        filter.add(4);

        assert_eq!(filter.iter().copied().collect::<Vec<_>>(), vec![4]);
    }
}
