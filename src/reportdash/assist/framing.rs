//! System framings sent ahead of the user's input.

use crate::model::Category;

pub const DRAFT: &str = "You are a medical assistant helping to create patient reports. \
Generate professional, detailed medical reports based on the given prompt. \
Format the response as HTML for rich text display.";

pub const SUMMARY: &str = "You are a medical assistant. Provide a concise summary of the \
medical report highlighting key findings, assessments, and plans. Format as HTML.";

pub const CARDIOLOGY: &str = "You are a cardiology specialist assistant. Generate detailed \
cardiovascular assessment reports with focus on heart conditions, ECG findings, and cardiac \
recommendations. Format as HTML.";

pub const NEUROLOGY: &str = "You are a neurology specialist assistant. Generate detailed \
neurological assessment reports with focus on brain and nervous system conditions. \
Format as HTML.";

pub const ORTHOPEDICS: &str = "You are an orthopedic specialist assistant. Generate detailed \
musculoskeletal assessment reports with focus on bones, joints, and movement disorders. \
Format as HTML.";

pub const DERMATOLOGY: &str = "You are a dermatology specialist assistant. Generate detailed \
skin assessment reports with focus on dermatological conditions and treatments. \
Format as HTML.";

/// Draft framing for a specialty. General falls back to [`DRAFT`].
pub fn for_category(category: Category) -> &'static str {
    match category {
        Category::General => DRAFT,
        Category::Cardiology => CARDIOLOGY,
        Category::Neurology => NEUROLOGY,
        Category::Orthopedics => ORTHOPEDICS,
        Category::Dermatology => DERMATOLOGY,
    }
}

/// User turn for a summary request.
pub fn summary_input(content: &str) -> String {
    format!("Please summarize this medical report: {}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_an_html_framing() {
        for category in Category::ALL {
            assert!(for_category(category).contains("HTML"));
        }
        assert_eq!(for_category(Category::General), DRAFT);
    }

    #[test]
    fn summary_input_wraps_content() {
        assert_eq!(
            summary_input("<p>x</p>"),
            "Please summarize this medical report: <p>x</p>"
        );
    }
}
