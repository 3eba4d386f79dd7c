use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::view_with_positions;
use crate::store::RecordStore;

/// Lists the filtered view under the store's current filter.
pub fn run(store: &RecordStore) -> Result<CmdResult> {
    let listed = view_with_positions(store);
    let mut result = CmdResult::default();

    if listed.is_empty() {
        let message = if store.filter().is_unrestricted() {
            "No reports yet."
        } else {
            "No reports match the current filters."
        };
        result.add_message(CmdMessage::info(message));
    }

    Ok(result.with_listed_records(listed))
}
