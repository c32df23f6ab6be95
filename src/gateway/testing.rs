//! Test doubles for the gateway layer.

use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{RecordGateway, SubmitResult};
use crate::model::{NewRefugee, Refugee};

/// Serve `router` on a loopback port and return its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serve `router` and return the web app style `/exec` URL.
pub(crate) async fn spawn_endpoint(router: Router) -> String {
    format!("{}/exec", spawn_server(router).await)
}

/// In-memory gateway with scripted write failures.
#[derive(Default)]
pub(crate) struct MockGateway {
    records: Vec<Refugee>,
    /// Submission index (0-based, counted across the gateway's lifetime) -> error
    failures: HashMap<usize, String>,
    submitted: Mutex<Vec<NewRefugee>>,
    submit_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockGateway {
    pub(crate) fn with_records(records: Vec<Refugee>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub(crate) fn fail_on(mut self, index: usize, error: &str) -> Self {
        self.failures.insert(index, error.to_string());
        self
    }

    pub(crate) fn submitted(&self) -> Vec<NewRefugee> {
        self.submitted.lock().unwrap().clone()
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordGateway for MockGateway {
    async fn fetch_all(&self) -> Vec<Refugee> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.records.clone()
    }

    async fn submit_one(&self, record: &NewRefugee) -> SubmitResult {
        let index = self.submit_calls.fetch_add(1, Ordering::SeqCst);
        match self.failures.get(&index) {
            Some(error) => SubmitResult::failed(error.clone()),
            None => {
                self.submitted.lock().unwrap().push(record.clone());
                SubmitResult::ok()
            }
        }
    }
}

/// Build a stored record for tests
pub(crate) fn record(first: &str, last: &str, shelter: &str, gender: &str, needs: &str) -> Refugee {
    Refugee {
        id: Some(format!("{}-{}", first, last)),
        first_name: first.to_string(),
        last_name: last.to_string(),
        age: 30,
        gender: gender.to_string(),
        phone_number: String::new(),
        shelter_name: shelter.to_string(),
        family_size: 1,
        medical_needs: needs.to_string(),
        registration_date: "2025-01-05".to_string(),
        status: crate::model::STATUS_PENDING.to_string(),
    }
}
