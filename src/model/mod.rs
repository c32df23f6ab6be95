//! Record Model
//!
//! Core types shared by every layer:
//! - `Refugee`: a registered person as returned by the sheet endpoint
//! - `RefugeeDraft`: a form entry that has not been submitted yet
//! - `NewRefugee`: a draft stamped with date and status, ready to post
//! - `AppRoute`: the views the application can show

mod error;
mod lenient;
mod refugee;
mod route;

pub use error::DraftError;
pub use refugee::{
    has_medical_need, shelter_label, NewRefugee, Refugee, RefugeeDraft, GENDER_FEMALE,
    GENDER_MALE, GENDER_OPTIONS, GENDER_OTHER, MEDICAL_NONE, MEDICAL_NONE_EN, STATUS_PENDING,
    STATUS_PROCESSED, UNSPECIFIED_SHELTER,
};
pub use route::{AppRoute, ParseRouteError};

pub(crate) use lenient::parse_leading_int as lenient_count;
