use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ReportError, Result};
use crate::model::RecordId;
use crate::store::RecordStore;
use tracing::info;

pub fn run(store: &mut RecordStore, id: &RecordId) -> Result<CmdResult> {
    let removed = store
        .remove(id)
        .ok_or_else(|| ReportError::NotFound(id.clone()))?;
    info!(%id, "report removed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Report removed: {}",
        removed.title
    )));
    Ok(result.with_affected_records(vec![removed]))
}
