//! Refugee record types
//!
//! Field names on the wire are camelCase to match the columns the sheet
//! endpoint reads and writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DraftError;
use super::lenient;

/// "No medical need" in the display language
pub const MEDICAL_NONE: &str = "ไม่มี";
/// "No medical need" as entered by English-speaking staff
pub const MEDICAL_NONE_EN: &str = "None";

/// Label used when a record carries no shelter name
pub const UNSPECIFIED_SHELTER: &str = "ไม่ระบุ";

pub const GENDER_MALE: &str = "ชาย";
pub const GENDER_FEMALE: &str = "หญิง";
pub const GENDER_OTHER: &str = "อื่นๆ";
/// Gender labels offered by the registration form
pub const GENDER_OPTIONS: [&str; 3] = [GENDER_MALE, GENDER_FEMALE, GENDER_OTHER];

/// Status stamped on every new registration
pub const STATUS_PENDING: &str = "รอดำเนินการ";
/// Status set by back-office staff once a case is handled
pub const STATUS_PROCESSED: &str = "ดำเนินการแล้ว";

/// True when `needs` describes an actual medical need.
///
/// Empty strings and both "none" sentinels mean no need.
pub fn has_medical_need(needs: &str) -> bool {
    !needs.is_empty() && needs != MEDICAL_NONE && needs != MEDICAL_NONE_EN
}

/// Grouping key for a shelter name, substituting the unspecified label for blanks
pub fn shelter_label(shelter_name: &str) -> &str {
    if shelter_name.is_empty() {
        UNSPECIFIED_SHELTER
    } else {
        shelter_name
    }
}

fn default_family_size() -> u32 {
    1
}

fn default_medical_needs() -> String {
    MEDICAL_NONE.to_string()
}

/// A registered person as stored by the sheet endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refugee {
    /// Opaque identifier assigned by the backend
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::age")]
    pub age: u32,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub shelter_name: String,
    #[serde(default = "default_family_size", deserialize_with = "lenient::family_size")]
    pub family_size: u32,
    #[serde(default = "default_medical_needs", deserialize_with = "lenient::medical_needs")]
    pub medical_needs: String,
    /// ISO 8601 calendar date (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "lenient::string")]
    pub registration_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
}

impl Refugee {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_medical_need(&self) -> bool {
        has_medical_need(&self.medical_needs)
    }

    pub fn is_processed(&self) -> bool {
        self.status == STATUS_PROCESSED
    }
}

/// A registration form entry that has not been submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefugeeDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub shelter_name: String,
    #[serde(default = "default_family_size")]
    pub family_size: u32,
    #[serde(default = "default_medical_needs")]
    pub medical_needs: String,
}

fn default_gender() -> String {
    GENDER_MALE.to_string()
}

impl Default for RefugeeDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            age: 0,
            gender: default_gender(),
            phone_number: String::new(),
            shelter_name: String::new(),
            family_size: default_family_size(),
            medical_needs: default_medical_needs(),
        }
    }
}

impl RefugeeDraft {
    /// Builder method: set the person's name
    pub fn name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Builder method: set the shelter
    pub fn shelter(mut self, shelter: impl Into<String>) -> Self {
        self.shelter_name = shelter.into();
        self
    }

    /// Builder method: set medical needs
    pub fn medical_needs(mut self, needs: impl Into<String>) -> Self {
        self.medical_needs = needs.into();
        self
    }

    /// Check the fields the registration form marks as required
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.first_name.trim().is_empty() {
            return Err(DraftError::MissingField("firstName"));
        }
        if self.last_name.trim().is_empty() {
            return Err(DraftError::MissingField("lastName"));
        }
        if self.shelter_name.trim().is_empty() {
            return Err(DraftError::MissingField("shelterName"));
        }
        if self.family_size < 1 {
            return Err(DraftError::InvalidFamilySize(self.family_size));
        }
        Ok(())
    }

    /// Stamp the registration date and pending status onto the draft
    pub fn stamp(self, date: NaiveDate) -> NewRefugee {
        let medical_needs = if self.medical_needs.trim().is_empty() {
            default_medical_needs()
        } else {
            self.medical_needs
        };

        NewRefugee {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            phone_number: self.phone_number,
            shelter_name: self.shelter_name,
            family_size: self.family_size,
            medical_needs,
            registration_date: date.format("%Y-%m-%d").to_string(),
            status: STATUS_PENDING.to_string(),
        }
    }
}

/// The payload posted to the sheet endpoint: a record without an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRefugee {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub phone_number: String,
    pub shelter_name: String,
    pub family_size: u32,
    pub medical_needs: String,
    pub registration_date: String,
    pub status: String,
}
