//! Registered-people list with search and shelter filter

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Refugee, MEDICAL_NONE};

/// Shelter filter value that matches every record
pub const ALL_SHELTERS: &str = "all";

/// Shown when the filter leaves nothing
pub const NO_MATCHES_MESSAGE: &str =
    "ไม่พบข้อมูลที่ตรงกับการค้นหา หรือไม่มีข้อมูลในศูนย์พักพิงที่เลือก";

const MEDICAL_PREVIEW_CHARS: usize = 20;

fn all_shelters() -> String {
    ALL_SHELTERS.to_string()
}

/// Search term plus selected shelter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default = "all_shelters")]
    pub shelter: String,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            shelter: all_shelters(),
        }
    }
}

impl ListFilter {
    /// Builder method: set the search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Builder method: restrict to one shelter
    pub fn shelter(mut self, shelter: impl Into<String>) -> Self {
        self.shelter = shelter.into();
        self
    }

    /// Whether a record passes both the shelter and the search filter
    pub fn matches(&self, record: &Refugee) -> bool {
        let matches_shelter = self.shelter == ALL_SHELTERS || record.shelter_name == self.shelter;
        if !matches_shelter {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        record.first_name.to_lowercase().contains(&term)
            || record.last_name.to_lowercase().contains(&term)
            || record.shelter_name.to_lowercase().contains(&term)
    }

    /// Matching records, in input order
    pub fn apply<'a>(&self, records: &'a [Refugee]) -> Vec<&'a Refugee> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct non-blank shelter names, sorted
pub fn shelter_options(records: &[Refugee]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.shelter_name.is_empty())
        .map(|r| r.shelter_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One table row, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRow {
    pub id: Option<String>,
    pub full_name: String,
    pub registration_date: String,
    pub shelter_name: String,
    /// Phone number, or "-" when blank
    pub phone: String,
    pub age: u32,
    pub gender: String,
    pub family_size: u32,
    /// Medical needs cut to 20 characters with a trailing "..."
    pub medical_preview: String,
    pub has_medical_need: bool,
    pub status: String,
    pub is_processed: bool,
}

impl From<&Refugee> for ListRow {
    fn from(r: &Refugee) -> Self {
        Self {
            id: r.id.clone(),
            full_name: r.full_name(),
            registration_date: r.registration_date.clone(),
            shelter_name: r.shelter_name.clone(),
            phone: if r.phone_number.is_empty() {
                "-".to_string()
            } else {
                r.phone_number.clone()
            },
            age: r.age,
            gender: r.gender.clone(),
            family_size: r.family_size,
            medical_preview: medical_preview(&r.medical_needs),
            has_medical_need: r.has_medical_need(),
            status: r.status.clone(),
            is_processed: r.is_processed(),
        }
    }
}

fn medical_preview(needs: &str) -> String {
    if needs.is_empty() {
        return MEDICAL_NONE.to_string();
    }
    let mut preview: String = needs.chars().take(MEDICAL_PREVIEW_CHARS).collect();
    if needs.chars().count() > MEDICAL_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

/// The list view: filter options plus the rows that pass the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub filter: ListFilter,
    /// Options for the shelter dropdown (excluding "all")
    pub shelters: Vec<String>,
    pub rows: Vec<ListRow>,
    /// Size of the loaded set before filtering
    pub total: usize,
}

impl ListView {
    pub fn build(records: &[Refugee], filter: ListFilter) -> Self {
        let rows = filter.apply(records).into_iter().map(ListRow::from).collect();
        Self {
            shelters: shelter_options(records),
            rows,
            total: records.len(),
            filter,
        }
    }

    pub fn matched(&self) -> usize {
        self.rows.len()
    }

    /// Message for an empty result, if the result is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(NO_MATCHES_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::record;
    use crate::model::STATUS_PROCESSED;

    fn sample() -> Vec<Refugee> {
        vec![
            record("Somchai", "Jaidee", "Mae La", "ชาย", MEDICAL_NONE),
            record("Naw", "Paw", "Umpiem", "หญิง", "Flu"),
            record("Saw", "Htoo", "Mae La", "ชาย", MEDICAL_NONE),
            record("Mya", "Win", "", "หญิง", MEDICAL_NONE),
        ]
    }

    #[test]
    fn test_default_filter_returns_everything_in_order() {
        let records = sample();
        let filtered = ListFilter::default().apply(&records);
        assert_eq!(filtered.len(), records.len());
        for (a, b) in filtered.iter().zip(records.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = sample();
        assert_eq!(ListFilter::default().search("somCHAI").apply(&records).len(), 1);
        assert_eq!(ListFilter::default().search("htoo").apply(&records).len(), 1);
        assert_eq!(ListFilter::default().search("mae").apply(&records).len(), 2);
        assert!(ListFilter::default().search("zzz").apply(&records).is_empty());
    }

    #[test]
    fn test_shelter_filter_only_returns_that_shelter() {
        let records = sample();
        let filtered = ListFilter::default().shelter("Mae La").apply(&records);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.shelter_name == "Mae La"));
    }

    #[test]
    fn test_search_and_shelter_combine() {
        let records = sample();
        let filtered = ListFilter::default().shelter("Mae La").search("saw").apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].first_name, "Saw");
    }

    #[test]
    fn test_shelters_partition_the_set() {
        let records = sample();
        let mut covered = 0;
        for shelter in shelter_options(&records) {
            covered += ListFilter::default().shelter(shelter).apply(&records).len();
        }
        covered += ListFilter::default().shelter("").apply(&records).len();
        assert_eq!(covered, records.len());
    }

    #[test]
    fn test_shelter_options_sorted_without_blanks() {
        assert_eq!(shelter_options(&sample()), vec!["Mae La".to_string(), "Umpiem".to_string()]);
    }

    #[test]
    fn test_list_row_formatting() {
        let mut r = record("A", "B", "S", "ชาย", "Severe asthma with frequent attacks");
        r.status = STATUS_PROCESSED.to_string();
        let row = ListRow::from(&r);
        assert_eq!(row.full_name, "A B");
        assert_eq!(row.phone, "-");
        assert_eq!(row.medical_preview, "Severe asthma with f...");
        assert!(row.has_medical_need);
        assert!(row.is_processed);

        let short = ListRow::from(&record("A", "B", "S", "ชาย", "Flu"));
        assert_eq!(short.medical_preview, "Flu");
    }

    #[test]
    fn test_list_view_empty_message() {
        let view = ListView::build(&sample(), ListFilter::default().search("nobody"));
        assert_eq!(view.matched(), 0);
        assert_eq!(view.total, 4);
        assert_eq!(view.empty_message(), Some(NO_MATCHES_MESSAGE));

        let full = ListView::build(&sample(), ListFilter::default());
        assert_eq!(full.empty_message(), None);
    }
}
