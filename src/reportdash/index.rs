//! # View Positions
//!
//! The dashboard shows the **filtered view**, but [`RecordStore::reorder`]
//! works on **canonical** positions. Whenever a filter is active the two
//! disagree:
//!
//! ```text
//! canonical:  [a] [b] [c] [d] [e]        filter: status = draft
//! view:           [b]     [d] [e]
//!                  0       1   2
//! ```
//!
//! Dragging view row 0 onto view row 2 means "move `b` to where `e` sits",
//! i.e. canonical `1 -> 4`. Applying the raw pair `0 -> 2` to the canonical
//! collection would move `a` instead.
//!
//! Translation therefore goes through identity: each view position is
//! resolved to its record id, and the id is located in the canonical
//! collection. Drag sources that already carry ids use
//! [`canonical_move_by_id`] directly.

use crate::model::{Record, RecordId};
use crate::store::RecordStore;

/// A row of the filtered view, with both of its coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub record: Record,
    pub view_index: usize,
    pub canonical_index: usize,
}

/// The filtered view, annotated with view and canonical positions.
pub fn view_with_positions(store: &RecordStore) -> Vec<ViewEntry> {
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| store.filter().matches(r))
        .enumerate()
        .map(|(view_index, (canonical_index, record))| ViewEntry {
            record: record.clone(),
            view_index,
            canonical_index,
        })
        .collect()
}

/// Translates a move between two filtered-view positions into the canonical
/// `(from, to)` pair to hand to [`RecordStore::reorder`].
///
/// `None` when either position is outside the current view.
pub fn canonical_move(
    store: &RecordStore,
    view_from: usize,
    view_to: usize,
) -> Option<(usize, usize)> {
    let active = store.filtered().nth(view_from)?.id.clone();
    let over = store.filtered().nth(view_to)?.id.clone();
    canonical_move_by_id(store, &active, &over)
}

/// Translates "drop `active` onto `over`" into canonical positions.
///
/// `None` when either id is not in the collection.
pub fn canonical_move_by_id(
    store: &RecordStore,
    active: &RecordId,
    over: &RecordId,
) -> Option<(usize, usize)> {
    Some((store.position(active)?, store.position(over)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Status};
    use crate::store::fixtures::StoreFixture;

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.records().iter().map(|r| r.id.as_str()).collect()
    }

    fn lettered() -> RecordStore {
        // Added e..a so the canonical order reads a b c d e.
        StoreFixture::new()
            .with_record("e", Category::General, Status::Draft)
            .with_record("d", Category::General, Status::Draft)
            .with_record("c", Category::General, Status::Completed)
            .with_record("b", Category::General, Status::Draft)
            .with_record("a", Category::General, Status::Reviewed)
            .store
    }

    #[test]
    fn positions_match_canonical_when_unfiltered() {
        let store = lettered();
        let entries = view_with_positions(&store);
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e.view_index == e.canonical_index));
    }

    #[test]
    fn positions_carry_both_coordinates_under_a_filter() {
        let mut store = lettered();
        store.set_status_filter(Status::Draft);
        let entries = view_with_positions(&store);
        let pairs: Vec<_> = entries
            .iter()
            .map(|e| (e.record.id.as_str(), e.view_index, e.canonical_index))
            .collect();
        assert_eq!(pairs, vec![("b", 0, 1), ("d", 1, 3), ("e", 2, 4)]);
    }

    #[test]
    fn filtered_move_goes_through_identity() {
        let mut store = lettered();
        store.set_status_filter(Status::Draft);

        let (from, to) = canonical_move(&store, 0, 2).unwrap();
        assert_eq!((from, to), (1, 4));
        store.reorder(from, to);

        assert_eq!(ids(&store), vec!["a", "c", "d", "e", "b"]);
        let view: Vec<_> = store.filtered().map(|r| r.id.as_str()).collect();
        assert_eq!(view, vec!["d", "e", "b"]);
    }

    #[test]
    fn raw_view_indices_would_move_the_wrong_record() {
        let mut store = lettered();
        store.set_status_filter(Status::Draft);
        // Guard against regressing to index passthrough.
        let (from, _) = canonical_move(&store, 0, 2).unwrap();
        assert_ne!(from, 0);
        assert_eq!(store.records()[from].id.as_str(), "b");
    }

    #[test]
    fn move_outside_view_is_none() {
        let mut store = lettered();
        store.set_status_filter(Status::Reviewed);
        assert!(canonical_move(&store, 0, 1).is_none());
        assert!(canonical_move(&store, 3, 0).is_none());
    }

    #[test]
    fn move_by_id_requires_both_ids() {
        let store = lettered();
        assert_eq!(
            canonical_move_by_id(&store, &"d".into(), &"a".into()),
            Some((3, 0))
        );
        assert!(canonical_move_by_id(&store, &"d".into(), &"zz".into()).is_none());
    }
}
