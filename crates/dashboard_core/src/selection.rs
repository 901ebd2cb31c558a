use std::collections::BTreeSet;

use crate::record::RecordId;

/// The set of record identifiers marked for bulk action.
///
/// Selection is independent of the visible page and survives changes to the
/// search term, sort order, and page index. Identifiers that disappear from
/// the snapshot are dropped by `retain_known`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn select(&mut self, id: RecordId) -> bool {
        self.ids.insert(id)
    }

    pub fn deselect(&mut self, id: RecordId) -> bool {
        self.ids.remove(&id)
    }

    /// Replaces the selection with exactly the given identifiers
    /// (the "select everything matching my search" gesture).
    pub fn select_exactly(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ascending identifier order, for deterministic request payloads.
    pub fn to_vec(&self) -> Vec<RecordId> {
        self.ids.iter().copied().collect()
    }

    /// Drops identifiers absent from `known`; returns how many were dropped.
    pub fn retain_known(&mut self, known: &BTreeSet<RecordId>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| known.contains(id));
        before - self.ids.len()
    }

    /// Non-empty but not covering every currently-filtered identifier.
    pub fn is_indeterminate(&self, filtered_ids: &[RecordId]) -> bool {
        !self.ids.is_empty() && filtered_ids.iter().any(|id| !self.ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_known_drops_stale_ids() {
        let mut selection = SelectionSet::default();
        selection.select_exactly([1, 2, 3]);

        let known: BTreeSet<RecordId> = [2, 3, 4].into_iter().collect();
        assert_eq!(selection.retain_known(&known), 1);
        assert_eq!(selection.to_vec(), vec![2, 3]);
    }

    #[test]
    fn indeterminate_requires_partial_coverage() {
        let mut selection = SelectionSet::default();
        assert!(!selection.is_indeterminate(&[1, 2]));

        selection.select(1);
        assert!(selection.is_indeterminate(&[1, 2]));

        selection.select(2);
        assert!(!selection.is_indeterminate(&[1, 2]));
    }
}
