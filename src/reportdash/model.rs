use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record identifier.
///
/// Generated ids are UUID v4 strings, but seeded records may carry any
/// non-empty string ("1", "new1", ...), so the id is not a `Uuid` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Cardiology,
    Neurology,
    Orthopedics,
    Dermatology,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Cardiology,
        Category::Neurology,
        Category::Orthopedics,
        Category::Dermatology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Cardiology => "cardiology",
            Category::Neurology => "neurology",
            Category::Orthopedics => "orthopedics",
            Category::Dermatology => "dermatology",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Completed,
    Reviewed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Draft, Status::Completed, Status::Reviewed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Completed => "completed",
            Status::Reviewed => "reviewed",
        }
    }
}

macro_rules! closed_enum_text {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| format!("Unknown {}: {}", $what, s))
            }
        }
    };
}

closed_enum_text!(Category, "category");
closed_enum_text!(Priority, "priority");
closed_enum_text!(Status, "status");

/// A single clinical report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub patient_name: String,
    pub patient_id: String,
    /// Rich-text markup. Never parsed here.
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Record {
    /// New record with a generated id, stamped now, in the default
    /// general / medium / draft classification.
    pub fn new(
        title: impl Into<String>,
        patient_name: impl Into<String>,
        patient_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::generate(),
            title: title.into(),
            patient_name: patient_name.into(),
            patient_id: patient_id.into(),
            content: content.into(),
            category: Category::General,
            priority: Priority::Medium,
            status: Status::Draft,
            date_created: now,
            date_modified: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_dates(mut self, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        self.date_created = created;
        self.date_modified = modified.max(created);
        self
    }
}

/// Partial update. `None` leaves the field untouched; `id` and
/// `date_created` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn patient_name(mut self, patient_name: impl Into<String>) -> Self {
        self.patient_name = Some(patient_name.into());
        self
    }

    pub fn patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Merges the patch into `record`. Timestamps are the store's business.
    pub(crate) fn apply_to(self, record: &mut Record) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(patient_name) = self.patient_name {
            record.patient_name = patient_name;
        }
        if let Some(patient_id) = self.patient_id {
            record.patient_id = patient_id;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(priority) = self.priority {
            record.priority = priority;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}
