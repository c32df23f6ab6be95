//! Application Shell
//!
//! Owns the current route and the loaded record set. Records are replaced
//! wholesale by `reload`; navigation calls `reload` explicitly. Submitting the
//! registration form does not reload, so new registrations appear after the
//! next navigation.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::gateway::RecordGateway;
use crate::model::{AppRoute, Refugee};
use crate::views::{
    DashboardView, ListFilter, ListView, Navbar, RegistrationForm, SubmissionOutcome,
};

pub struct AppShell {
    gateway: Arc<dyn RecordGateway>,
    route: AppRoute,
    records: Vec<Refugee>,
    loading: bool,
    form: RegistrationForm,
}

impl AppShell {
    /// A shell on the dashboard that has not loaded anything yet
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self {
            gateway,
            route: AppRoute::default(),
            records: Vec::new(),
            loading: true,
            form: RegistrationForm::new(),
        }
    }

    pub fn route(&self) -> AppRoute {
        self.route
    }

    pub fn records(&self) -> &[Refugee] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the active view should show the loading indicator instead of
    /// its content. The registration form never waits on records.
    pub fn shows_loading(&self) -> bool {
        self.loading && self.route.needs_records()
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::new(self.route)
    }

    /// Replace the loaded records with a fresh read. Returns the record count.
    pub async fn reload(&mut self) -> usize {
        self.loading = true;
        self.records = self.gateway.fetch_all().await;
        self.loading = false;

        tracing::debug!(route = %self.route, count = self.records.len(), "Reloaded records");
        self.records.len()
    }

    /// Switch views and reload
    pub async fn navigate(&mut self, route: AppRoute) -> usize {
        tracing::debug!(from = %self.route, to = %route, "Navigating");
        self.route = route;
        self.reload().await
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::build(&self.records)
    }

    pub fn list(&self, filter: ListFilter) -> ListView {
        ListView::build(&self.records, filter)
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Submit the registration form through the shell's gateway
    pub async fn submit_registration(&mut self, today: NaiveDate) -> SubmissionOutcome {
        self.form.submit(self.gateway.as_ref(), today).await
    }
}
