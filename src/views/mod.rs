//! View Models
//!
//! Presentation-independent state and operations behind each screen. The HTTP
//! API serializes them and the CLI prints them; neither adds behavior.
//!
//! - [`DashboardView`]: statistic cards and the AI report panel
//! - [`ListView`]: search and shelter filter over the loaded records
//! - [`RegistrationForm`]: batched multi-entry registration
//! - [`Navbar`]: route switching

mod dashboard;
mod list;
mod nav;
mod registration;

pub use dashboard::{DashboardView, REPORT_PLACEHOLDER};
pub use list::{shelter_options, ListFilter, ListRow, ListView, ALL_SHELTERS, NO_MATCHES_MESSAGE};
pub use nav::{route_label, NavItem, Navbar, APP_NAME};
pub use registration::{
    submit_batch, FormError, FormField, RegistrationForm, SubmissionOutcome, MAX_ENTRIES,
    SUCCESS_MESSAGE,
};
