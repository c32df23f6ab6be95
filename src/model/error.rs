//! Draft validation errors

use thiserror::Error;

/// Reasons a draft is rejected before it reaches the gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// A required text field is blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Family size below one
    #[error("familySize must be at least 1 (got {0})")]
    InvalidFamilySize(u32),
}
