//! Application views

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The views the application can show
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppRoute {
    /// Aggregate statistics and the AI situation report
    #[default]
    Dashboard,
    /// Batched registration form
    Register,
    /// Searchable list of registered people
    List,
}

impl AppRoute {
    /// All routes in navigation order
    pub fn all() -> &'static [AppRoute] {
        &[AppRoute::Dashboard, AppRoute::Register, AppRoute::List]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppRoute::Dashboard => "dashboard",
            AppRoute::Register => "register",
            AppRoute::List => "list",
        }
    }

    /// Whether the view renders the loaded record set
    pub fn needs_records(&self) -> bool {
        !matches!(self, AppRoute::Register)
    }
}

impl std::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown route: {0}")]
pub struct ParseRouteError(pub String);

impl FromStr for AppRoute {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(AppRoute::Dashboard),
            "register" => Ok(AppRoute::Register),
            "list" => Ok(AppRoute::List),
            other => Err(ParseRouteError(other.to_string())),
        }
    }
}
