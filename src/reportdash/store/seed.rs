use crate::error::{ReportError, Result};
use crate::form::RecordForm;
use crate::model::{Category, Priority, Record, Status};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Anything that can hand the store its initial records.
pub trait SeedSource {
    fn load(&self) -> Result<Vec<Record>>;
}

/// The bundled sample reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSeed;

impl SeedSource for FixtureSeed {
    fn load(&self) -> Result<Vec<Record>> {
        Ok(sample_records())
    }
}

/// A JSON array of records on disk (camelCase keys, lowercase enum values).
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedSource for JsonFileSeed {
    fn load(&self) -> Result<Vec<Record>> {
        let content = fs::read_to_string(&self.path)?;
        let records: Vec<Record> = serde_json::from_str(&content)?;
        // Hand-written seed files sometimes carry a modified date older than
        // the created one.
        records
            .into_iter()
            .map(|r| {
                check_required_fields(&r)?;
                let (created, modified) = (r.date_created, r.date_modified);
                Ok(r.with_dates(created, modified))
            })
            .collect()
    }
}

fn check_required_fields(record: &Record) -> Result<()> {
    RecordForm::from_record(record)
        .validate()
        .map_err(|e| match e {
            ReportError::Validation(msg) => {
                ReportError::Validation(format!("seed record {}: {}", record.id, msg))
            }
            other => other,
        })
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    patient_name: &str,
    patient_id: &str,
    content: &str,
    category: Category,
    priority: Priority,
    status: Status,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
) -> Record {
    Record::new(title, patient_name, patient_id, content)
        .with_id(id)
        .with_category(category)
        .with_priority(priority)
        .with_status(status)
        .with_dates(created, modified)
}

/// Five sample reports, one per category, spanning every status.
pub fn sample_records() -> Vec<Record> {
    vec![
        sample(
            "1",
            "Annual Physical Examination - John Doe",
            "John Doe",
            "P001",
            "<p>Patient presented for routine annual physical examination.</p>\
             <h3>Vital Signs</h3><ul><li>Blood Pressure: 120/80 mmHg</li>\
             <li>Heart Rate: 72 bpm</li><li>Temperature: 98.6°F</li></ul>\
             <h3>Assessment</h3><p>Good general health. All vital signs within normal limits.</p>\
             <h3>Plan</h3><ul><li>Continue current medications</li>\
             <li>Follow up in 12 months</li><li>Routine CBC and metabolic panel</li></ul>",
            Category::General,
            Priority::Low,
            Status::Completed,
            at(2024, 1, 15, 10, 30),
            at(2024, 1, 15, 10, 30),
        ),
        sample(
            "2",
            "Cardiac Consultation - Sarah Johnson",
            "Sarah Johnson",
            "P002",
            "<p>Referred for cardiac evaluation due to chest pain episodes.</p>\
             <h3>History</h3><p>45-year-old female with hypertension. Pressure-like pain, \
             6/10, lasting 5-10 minutes.</p>\
             <h3>Examination</h3><ul><li>Regular rate and rhythm, no murmurs</li>\
             <li>EKG: Normal sinus rhythm</li></ul>\
             <h3>Assessment</h3><p>Possible stable angina.</p>\
             <h3>Plan</h3><ul><li>Stress test scheduled</li><li>Echocardiogram ordered</li>\
             <li>Follow up in 1 week</li></ul>",
            Category::Cardiology,
            Priority::High,
            Status::Reviewed,
            at(2024, 1, 20, 14, 15),
            at(2024, 1, 22, 9, 45),
        ),
        sample(
            "3",
            "Neurological Assessment - Michael Chen",
            "Michael Chen",
            "P003",
            "<p>Presents with headaches and dizziness.</p>\
             <h3>Neurological Exam</h3><ul><li>Cranial nerves intact</li>\
             <li>Motor strength 5/5 all extremities</li><li>Reflexes normal and symmetric</li></ul>\
             <h3>Assessment</h3><p>Tension-type headaches likely. No deficits noted.</p>\
             <h3>Plan</h3><ul><li>Tension headache management</li>\
             <li>Follow up in 2 weeks if symptoms persist</li></ul>",
            Category::Neurology,
            Priority::Medium,
            Status::Draft,
            at(2024, 1, 18, 11, 0),
            at(2024, 1, 18, 11, 0),
        ),
        sample(
            "4",
            "Orthopedic Evaluation - Emma Wilson",
            "Emma Wilson",
            "P004",
            "<p>Referred for right knee pain following a hiking injury 3 days ago.</p>\
             <h3>Examination</h3><ul><li>Mild swelling, tender to palpation</li>\
             <li>Stability tests negative</li><li>X-ray: No fracture</li></ul>\
             <h3>Assessment</h3><p>Acute knee strain, likely soft tissue injury.</p>\
             <h3>Plan</h3><ul><li>RICE protocol</li><li>NSAIDs</li>\
             <li>Physical therapy referral</li></ul>",
            Category::Orthopedics,
            Priority::Medium,
            Status::Completed,
            at(2024, 1, 25, 16, 30),
            at(2024, 1, 25, 16, 30),
        ),
        sample(
            "5",
            "Dermatological Consultation - Robert Martinez",
            "Robert Martinez",
            "P005",
            "<p>New mole on back, noticed by spouse 2 weeks ago.</p>\
             <h3>Examination</h3><ul><li>0.5cm diameter, irregular borders</li>\
             <li>Variegated brown and black</li></ul>\
             <h3>Assessment</h3><p>Atypical nevus requiring biopsy.</p>\
             <h3>Plan</h3><ul><li>Punch biopsy next week</li>\
             <li>Sun protection education</li></ul>",
            Category::Dermatology,
            Priority::High,
            Status::Draft,
            at(2024, 1, 28, 13, 20),
            at(2024, 1, 28, 13, 20),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn samples_span_every_category_and_status() {
        let records = sample_records();
        assert_eq!(records.len(), 5);

        let categories: HashSet<_> = records.iter().map(|r| r.category).collect();
        let statuses: HashSet<_> = records.iter().map(|r| r.status).collect();
        assert_eq!(categories.len(), Category::ALL.len());
        assert_eq!(statuses.len(), Status::ALL.len());
    }

    #[test]
    fn samples_satisfy_record_invariants() {
        let records = sample_records();
        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), records.len());
        for r in &records {
            assert!(r.date_modified >= r.date_created);
            assert!(!r.title.trim().is_empty());
            assert!(!r.patient_name.trim().is_empty());
            assert!(!r.patient_id.trim().is_empty());
        }
    }

    #[test]
    fn json_seed_reads_camel_case_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let json = r#"[{
            "id": "a1",
            "title": "Imported",
            "patientName": "Ada",
            "patientId": "P77",
            "content": "<p>hi</p>",
            "category": "neurology",
            "priority": "high",
            "status": "reviewed",
            "dateCreated": "2024-03-01T08:00:00Z",
            "dateModified": "2024-02-01T08:00:00Z"
        }]"#;
        fs::write(&path, json).unwrap();

        let records = JsonFileSeed::new(&path).load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "a1");
        assert_eq!(records[0].category, Category::Neurology);
        assert_eq!(records[0].date_modified, records[0].date_created);
    }

    #[test]
    fn json_seed_rejects_records_missing_required_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let json = r#"[{
            "id": "ok1",
            "title": "Fine",
            "patientName": "Ada",
            "patientId": "P1",
            "content": "",
            "category": "general",
            "priority": "low",
            "status": "draft",
            "dateCreated": "2024-03-01T08:00:00Z",
            "dateModified": "2024-03-01T08:00:00Z"
        }, {
            "id": "b2",
            "title": "   ",
            "patientName": "",
            "patientId": "",
            "content": "<p>hi</p>",
            "category": "general",
            "priority": "low",
            "status": "draft",
            "dateCreated": "2024-03-01T08:00:00Z",
            "dateModified": "2024-03-01T08:00:00Z"
        }]"#;
        fs::write(&path, json).unwrap();

        match JsonFileSeed::new(&path).load() {
            Err(ReportError::Validation(msg)) => {
                assert!(msg.contains("b2"));
                assert!(msg.contains("title"));
                assert!(msg.contains("patient id"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn json_seed_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSeed::new(dir.path().join("nope.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
