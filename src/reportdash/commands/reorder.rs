use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{canonical_move, canonical_move_by_id};
use crate::model::RecordId;
use crate::store::RecordStore;
use tracing::debug;

/// Moves a record between two positions of the filtered view.
///
/// Positions are 0-based view indices; they are resolved to canonical ones
/// before the collection is touched.
pub fn run(store: &mut RecordStore, view_from: usize, view_to: usize) -> Result<CmdResult> {
    let Some((from, to)) = canonical_move(store, view_from, view_to) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Position out of range (view has {} reports)",
            store.filtered().count()
        )));
        return Ok(result);
    };
    apply(store, from, to)
}

/// Moves `active` to the canonical position currently held by `over`.
pub fn run_by_id(store: &mut RecordStore, active: &RecordId, over: &RecordId) -> Result<CmdResult> {
    let Some((from, to)) = canonical_move_by_id(store, active, over) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Unknown report id, nothing moved"));
        return Ok(result);
    };
    apply(store, from, to)
}

fn apply(store: &mut RecordStore, from: usize, to: usize) -> Result<CmdResult> {
    let moved = store.records()[from].clone();
    store.reorder(from, to);
    debug!(id = %moved.id, from, to, "record moved");

    let mut result = CmdResult::default();
    if from != to {
        result.add_message(CmdMessage::success(format!("Moved: {}", moved.title)));
    }
    Ok(result.with_affected_records(vec![moved]))
}
