use crate::model::{Category, Record, Status};
use std::fmt;
use std::str::FromStr;

/// Category selector. `All` places no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Status selector. `All` places no restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl From<Status> for StatusFilter {
    fn from(value: Status) -> Self {
        StatusFilter::Only(value)
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(s) => write!(f, "{}", s),
        }
    }
}

/// The three independent predicates that narrow the canonical collection.
///
/// The search term is stored exactly as typed; case folding happens in
/// [`RecordFilter::matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub search_term: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
}

impl RecordFilter {
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty()
            && self.category == CategoryFilter::All
            && self.status == StatusFilter::All
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self.category.matches(record.category)
            && self.status.matches(record.status)
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        record.title.to_lowercase().contains(&term)
            || record.patient_name.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, patient: &str) -> Record {
        Record::new(title, patient, "P1", "")
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&record("Anything", "Anyone")));
    }

    #[test]
    fn search_checks_title_and_patient_name_case_insensitively() {
        let filter = RecordFilter {
            search_term: "JOHN".into(),
            ..Default::default()
        };
        assert!(filter.matches(&record("Annual physical", "John Doe")));
        assert!(filter.matches(&record("Follow-up for johnson", "Sarah")));
        assert!(!filter.matches(&record("Cardiac consult", "Sarah")));
    }

    #[test]
    fn search_ignores_content() {
        let filter = RecordFilter {
            search_term: "ecg".into(),
            ..Default::default()
        };
        let r = Record::new("Consult", "Sarah", "P2", "<p>ECG normal</p>");
        assert!(!filter.matches(&r));
    }

    #[test]
    fn predicates_are_conjunctive() {
        let filter = RecordFilter {
            search_term: "consult".into(),
            category: CategoryFilter::Only(Category::Cardiology),
            status: StatusFilter::Only(Status::Reviewed),
        };
        let hit = record("Cardiac Consultation", "Sarah")
            .with_category(Category::Cardiology)
            .with_status(Status::Reviewed);
        let wrong_status = hit.clone().with_status(Status::Draft);
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_status));
    }

    #[test]
    fn parses_all_and_named_selectors() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "dermatology".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Dermatology)
        );
        assert_eq!(
            "Reviewed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(Status::Reviewed)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
