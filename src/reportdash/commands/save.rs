use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ReportError, Result};
use crate::form::RecordForm;
use crate::store::RecordStore;
use tracing::info;

/// Saves the edit buffer: updates the selected record, or creates a new one
/// at the front when nothing is selected.
///
/// Validation happens here, before the store is touched; the store itself
/// trusts its input.
pub fn run(store: &mut RecordStore, form: &RecordForm) -> Result<CmdResult> {
    form.validate()?;
    let mut result = CmdResult::default();

    match store.selected().map(|r| r.id.clone()) {
        Some(id) => {
            if !store.update(&id, form.to_patch()) {
                // Selection pointed at something that is no longer in the
                // collection; nothing was written.
                result.add_message(CmdMessage::warning(format!(
                    "Report {} no longer exists, nothing saved",
                    id
                )));
                return Ok(result);
            }
            let updated = store
                .get(&id)
                .cloned()
                .ok_or_else(|| ReportError::NotFound(id.clone()))?;
            info!(%id, "report updated");
            result.add_message(CmdMessage::success(format!(
                "Report updated: {}",
                updated.title
            )));
            store.select(None);
            result.affected_records.push(updated);
        }
        None => {
            let record = form.to_record();
            info!(id = %record.id, "report created");
            store.add(record.clone())?;
            result.add_message(CmdMessage::success("Report created successfully!"));
            result.affected_records.push(record);
        }
    }

    Ok(result)
}
