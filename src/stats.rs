//! Dashboard Statistics
//!
//! Pure aggregation over a loaded record set. Recomputed from scratch whenever
//! the set changes; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::model::{has_medical_need, shelter_label, Refugee};

/// One bar or pie slice: a label and how many records carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: usize,
}

/// Aggregate statistics for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of records
    pub total: usize,
    /// Records reporting an actual medical need
    pub medical_cases: usize,
    /// `medical_cases / total * 100`, or 0 for an empty set
    pub critical_rate: f64,
    /// Records per shelter, in order of first appearance
    pub shelter_distribution: Vec<NameValue>,
    /// Records per gender label, in order of first appearance
    pub gender_distribution: Vec<NameValue>,
}

impl DashboardStats {
    /// Compute statistics for a record set
    pub fn compute(records: &[Refugee]) -> Self {
        let total = records.len();
        let medical_cases = records.iter().filter(|r| r.has_medical_need()).count();

        let critical_rate = if total == 0 {
            0.0
        } else {
            medical_cases as f64 / total as f64 * 100.0
        };

        Self {
            total,
            medical_cases,
            critical_rate,
            shelter_distribution: count_by(records, |r| shelter_label(&r.shelter_name)),
            gender_distribution: count_by(records, |r| r.gender.as_str()),
        }
    }

    /// Critical rate as shown on the dashboard card: one decimal place, or a
    /// bare "0" for an empty set.
    pub fn critical_rate_display(&self) -> String {
        if self.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.critical_rate)
        }
    }

    /// Count for a shelter label, if present
    pub fn shelter_count(&self, name: &str) -> Option<usize> {
        find(&self.shelter_distribution, name)
    }

    /// Count for a gender label, if present
    pub fn gender_count(&self, name: &str) -> Option<usize> {
        find(&self.gender_distribution, name)
    }
}

/// Non-sentinel medical needs, in record order
pub fn medical_needs(records: &[Refugee]) -> impl Iterator<Item = &str> {
    records
        .iter()
        .map(|r| r.medical_needs.as_str())
        .filter(|needs| has_medical_need(needs))
}

fn count_by<'a, F>(records: &'a [Refugee], key: F) -> Vec<NameValue>
where
    F: Fn(&'a Refugee) -> &'a str,
{
    let mut counts: Vec<NameValue> = Vec::new();
    for record in records {
        let name = key(record);
        match counts.iter_mut().find(|nv| nv.name == name) {
            Some(entry) => entry.value += 1,
            None => counts.push(NameValue {
                name: name.to_string(),
                value: 1,
            }),
        }
    }
    counts
}

fn find(distribution: &[NameValue], name: &str) -> Option<usize> {
    distribution.iter().find(|nv| nv.name == name).map(|nv| nv.value)
}
