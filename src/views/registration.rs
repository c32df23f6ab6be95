//! Batched Registration Form
//!
//! Up to five people (typically one family) are entered in one session and
//! submitted one after another. There is no transaction across the batch:
//! entries that were saved stay saved when a later one fails, and failed
//! entries are not retried.

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::gateway::RecordGateway;
use crate::model::{lenient_count, RefugeeDraft};

/// Most entries a single form session accepts
pub const MAX_ENTRIES: usize = 5;

/// Shown after every entry was saved
pub const SUCCESS_MESSAGE: &str = "ลงทะเบียนสำเร็จครบถ้วน ข้อมูลถูกบันทึกแล้ว";

/// Errors from misusing the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("A form holds at most 5 entries")]
    Full,

    #[error("Entry {0} does not exist")]
    NoSuchEntry(usize),

    #[error("The form must keep at least one entry")]
    LastEntry,

    #[error("Expected 1 to 5 entries, got {0}")]
    EntryCount(usize),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Editable fields of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    Age,
    Gender,
    PhoneNumber,
    ShelterName,
    FamilySize,
    MedicalNeeds,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" => Ok(FormField::FirstName),
            "lastName" => Ok(FormField::LastName),
            "age" => Ok(FormField::Age),
            "gender" => Ok(FormField::Gender),
            "phoneNumber" => Ok(FormField::PhoneNumber),
            "shelterName" => Ok(FormField::ShelterName),
            "familySize" => Ok(FormField::FamilySize),
            "medicalNeeds" => Ok(FormField::MedicalNeeds),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Result of submitting the whole form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    /// Every entry was saved
    Complete { saved: usize },
    /// At least one entry failed
    Partial {
        saved: usize,
        total: usize,
        last_error: String,
    },
}

impl SubmissionOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, SubmissionOutcome::Complete { .. })
    }

    pub fn saved(&self) -> usize {
        match self {
            SubmissionOutcome::Complete { saved }
            | SubmissionOutcome::Partial { saved, .. } => *saved,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Complete { .. } => SUCCESS_MESSAGE.to_string(),
            SubmissionOutcome::Partial {
                saved,
                total,
                last_error,
            } => format!(
                "บันทึกสำเร็จ {} จาก {} คน ({}) กรุณาตรวจสอบการเชื่อมต่ออินเทอร์เน็ตหรือการตั้งค่า Script",
                saved, total, last_error
            ),
        }
    }
}

/// Submit drafts one at a time, stamping each with `today`.
///
/// Each write is awaited before the next starts. Invalid drafts count as
/// failures and are never sent.
pub async fn submit_batch<G>(
    gateway: &G,
    drafts: &[RefugeeDraft],
    today: NaiveDate,
) -> SubmissionOutcome
where
    G: RecordGateway + ?Sized,
{
    let mut saved = 0;
    let mut last_error: Option<String> = None;

    for (index, draft) in drafts.iter().enumerate() {
        if let Err(e) = draft.validate() {
            tracing::warn!(index, error = %e, "Rejected invalid registration entry");
            last_error = Some(e.to_string());
            continue;
        }

        let result = gateway.submit_one(&draft.clone().stamp(today)).await;
        if result.success {
            saved += 1;
        } else {
            last_error = Some(result.error.unwrap_or_else(|| "Unknown error".to_string()));
        }
    }

    tracing::info!(saved, total = drafts.len(), "Batch registration finished");

    if saved == drafts.len() {
        SubmissionOutcome::Complete { saved }
    } else {
        SubmissionOutcome::Partial {
            saved,
            total: drafts.len(),
            last_error: last_error.unwrap_or_else(|| "Unknown error".to_string()),
        }
    }
}

/// Form state: the entries being edited and the last outcome
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    entries: Vec<RefugeeDraft>,
    submitting: bool,
    outcome: Option<SubmissionOutcome>,
    scroll_to_top: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationForm {
    /// A form with one blank entry
    pub fn new() -> Self {
        Self {
            entries: vec![RefugeeDraft::default()],
            submitting: false,
            outcome: None,
            scroll_to_top: false,
        }
    }

    /// A form pre-filled with 1 to `MAX_ENTRIES` entries
    pub fn from_entries(entries: Vec<RefugeeDraft>) -> Result<Self, FormError> {
        if entries.is_empty() || entries.len() > MAX_ENTRIES {
            return Err(FormError::EntryCount(entries.len()));
        }
        Ok(Self {
            entries,
            ..Self::new()
        })
    }

    pub fn entries(&self) -> &[RefugeeDraft] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ENTRIES
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Outcome of the last submission, if any
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// Whether the view should scroll back to the top; cleared when read
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    /// Append a blank entry that copies shelter and phone from the first entry
    pub fn add_entry(&mut self) -> Result<usize, FormError> {
        if self.is_full() {
            return Err(FormError::Full);
        }

        let first = &self.entries[0];
        let entry = RefugeeDraft {
            shelter_name: first.shelter_name.clone(),
            phone_number: first.phone_number.clone(),
            ..RefugeeDraft::default()
        };
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Remove the entry at `index`
    pub fn remove_entry(&mut self, index: usize) -> Result<RefugeeDraft, FormError> {
        if index >= self.entries.len() {
            return Err(FormError::NoSuchEntry(index));
        }
        if self.entries.len() == 1 {
            return Err(FormError::LastEntry);
        }
        Ok(self.entries.remove(index))
    }

    pub fn entry_mut(&mut self, index: usize) -> Result<&mut RefugeeDraft, FormError> {
        self.entries.get_mut(index).ok_or(FormError::NoSuchEntry(index))
    }

    /// Set one field from raw form input. Numeric fields read the leading
    /// integer and fall back to 0.
    pub fn update_field(
        &mut self,
        index: usize,
        field: FormField,
        value: &str,
    ) -> Result<(), FormError> {
        let entry = self.entry_mut(index)?;
        match field {
            FormField::FirstName => entry.first_name = value.to_string(),
            FormField::LastName => entry.last_name = value.to_string(),
            FormField::Age => entry.age = lenient_count(value).unwrap_or(0),
            FormField::Gender => entry.gender = value.to_string(),
            FormField::PhoneNumber => entry.phone_number = value.to_string(),
            FormField::ShelterName => entry.shelter_name = value.to_string(),
            FormField::FamilySize => entry.family_size = lenient_count(value).unwrap_or(0),
            FormField::MedicalNeeds => entry.medical_needs = value.to_string(),
        }
        Ok(())
    }

    /// Submit every entry in order.
    ///
    /// On full success the form resets to one blank entry. On any failure the
    /// entries are kept as entered.
    pub async fn submit<G>(&mut self, gateway: &G, today: NaiveDate) -> SubmissionOutcome
    where
        G: RecordGateway + ?Sized,
    {
        self.submitting = true;
        self.outcome = None;

        let outcome = submit_batch(gateway, &self.entries, today).await;

        if outcome.is_complete() {
            self.entries = vec![RefugeeDraft::default()];
            self.scroll_to_top = true;
        }

        self.submitting = false;
        self.outcome = Some(outcome.clone());
        outcome
    }
}
