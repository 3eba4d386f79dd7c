use crate::error::{ReportError, Result};
use crate::model::{Category, Priority, Record, RecordPatch, Status};

pub const DEFAULT_CONTENT: &str = "<p>Enter your medical report here...</p>";

/// Transient edit buffer for creating or editing a report.
///
/// The buffer is where assistant output lands while the user is still
/// editing; nothing reaches the store until the form is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    pub title: String,
    pub content: String,
    pub patient_name: String,
    pub patient_id: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl RecordForm {
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            content: DEFAULT_CONTENT.to_string(),
            patient_name: String::new(),
            patient_id: String::new(),
            category: Category::General,
            priority: Priority::Medium,
            status: Status::Draft,
        }
    }

    /// Blank form seeded with assistant output. A blank draft keeps the
    /// placeholder content.
    pub fn with_draft(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut form = Self::blank();
        if !content.trim().is_empty() {
            form.content = content;
        }
        form
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            content: record.content.clone(),
            patient_name: record.patient_name.clone(),
            patient_id: record.patient_id.clone(),
            category: record.category,
            priority: record.priority,
            status: record.status,
        }
    }

    /// Replaces the in-progress content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ReportError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("patient name", &self.patient_name),
            ("patient id", &self.patient_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Every editable field, as a patch for an existing record.
    pub fn to_patch(&self) -> RecordPatch {
        RecordPatch {
            title: Some(self.title.clone()),
            patient_name: Some(self.patient_name.clone()),
            patient_id: Some(self.patient_id.clone()),
            content: Some(self.content.clone()),
            category: Some(self.category),
            priority: Some(self.priority),
            status: Some(self.status),
        }
    }

    /// A brand new record built from this form, with a fresh id and equal
    /// created/modified stamps.
    pub fn to_record(&self) -> Record {
        Record::new(
            self.title.clone(),
            self.patient_name.clone(),
            self.patient_id.clone(),
            self.content.clone(),
        )
        .with_category(self.category)
        .with_priority(self.priority)
        .with_status(self.status)
    }
}
