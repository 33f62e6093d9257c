//! HTTP client for the collection endpoint
//!
//! The agent core talks to the server through the [`Backend`] trait so tests
//! can swap in [`MockBackend`]; [`HttpBackend`] is the real reqwest-based
//! implementation.

use async_trait::async_trait;
use beacon_api::{REGISTER_PATH, RegisterRequest, SUBMIT_PATH, SubmitRequest};
use reqwest::StatusCode;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Errors from backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    /// The server answered 403: this device has been revoked
    #[error("Device revoked by server")]
    Revoked,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Trait for collection-endpoint communication
#[async_trait]
pub trait Backend: Send + Sync {
    /// Register this device with its explicit consent flag.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the server does not accept
    /// the registration.
    async fn register_device(&self, request: &RegisterRequest) -> BackendResult<()>;

    /// Submit one batch of samples.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Revoked`] on an HTTP 403, and a transport or
    /// status error on any other failure.
    async fn submit_samples(&self, request: &SubmitRequest) -> BackendResult<()>;
}

/// HTTP client for the collection endpoint
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client with the given request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5).min(timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a backend client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL of the collection endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> BackendResult<StatusCode> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(response.status())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn register_device(&self, request: &RegisterRequest) -> BackendResult<()> {
        let status = self.post_json(REGISTER_PATH, request).await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::UnexpectedStatus(status.as_u16()))
        }
    }

    async fn submit_samples(&self, request: &SubmitRequest) -> BackendResult<()> {
        let status = self.post_json(SUBMIT_PATH, request).await?;

        if status.is_success() {
            Ok(())
        } else if status == StatusCode::FORBIDDEN {
            Err(BackendError::Revoked)
        } else {
            Err(BackendError::UnexpectedStatus(status.as_u16()))
        }
    }
}

/// Mock backend for unit/integration testing
#[derive(Default)]
pub struct MockBackend {
    register_calls: AtomicU64,
    submit_calls: AtomicU64,
    submitted: Mutex<Vec<SubmitRequest>>,

    /// Configure registration to fail
    pub fail_register: Mutex<bool>,

    /// Configure submission to fail with a transport error
    pub fail_submit: Mutex<bool>,

    /// Configure submission to answer with a revocation
    pub revoke_submit: Mutex<bool>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registration requests issued
    pub fn register_calls(&self) -> u64 {
        self.register_calls.load(Ordering::SeqCst)
    }

    /// Number of submission requests issued
    pub fn submit_calls(&self) -> u64 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Successfully accepted submissions, in order
    pub fn accepted(&self) -> Vec<SubmitRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn register_device(&self, _request: &RegisterRequest) -> BackendResult<()> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);

        if *self.fail_register.lock().unwrap() {
            return Err(BackendError::Transport("Mock registration failure".into()));
        }
        Ok(())
    }

    async fn submit_samples(&self, request: &SubmitRequest) -> BackendResult<()> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        if *self.revoke_submit.lock().unwrap() {
            return Err(BackendError::Revoked);
        }
        if *self.fail_submit.lock().unwrap() {
            return Err(BackendError::Transport("Mock submission failure".into()));
        }

        self.submitted.lock().unwrap().push(request.clone());
        Ok(())
    }
}
