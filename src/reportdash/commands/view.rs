use crate::commands::CmdResult;
use crate::error::{ReportError, Result};
use crate::model::RecordId;
use crate::store::RecordStore;

pub fn run(store: &RecordStore, id: &RecordId) -> Result<CmdResult> {
    let record = store
        .get(id)
        .cloned()
        .ok_or_else(|| ReportError::NotFound(id.clone()))?;
    Ok(CmdResult::default().with_affected_records(vec![record]))
}
