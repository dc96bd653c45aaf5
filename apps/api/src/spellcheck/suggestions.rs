use std::collections::BTreeMap;

use super::models::{ResumeCategory, SpellCheckError};

/// Groups `improvement` texts by resume category, keeping the first occurrence of each.
/// Every category key is present, empty when nothing applies.
pub fn generate_foreign_worker_suggestions(
    errors: &[SpellCheckError],
) -> BTreeMap<ResumeCategory, Vec<String>> {
    let mut suggestions: BTreeMap<ResumeCategory, Vec<String>> = ResumeCategory::ALL
        .iter()
        .map(|&c| (c, Vec::new()))
        .collect();

    for error in errors {
        let (Some(category), Some(improvement)) = (error.resume_category, &error.improvement)
        else {
            continue;
        };
        let bucket = suggestions.entry(category).or_default();
        if !bucket.contains(improvement) {
            bucket.push(improvement.clone());
        }
    }

    suggestions
}
