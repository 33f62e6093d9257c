//! The device agent state machine

use beacon_api::{RegisterRequest, Sample, SubmitRequest};
use beacon_store::Store;
use beacon_telemetry::TelemetrySource;
use beacon_util::DeviceId;
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{Backend, BackendError};

/// Errors from agent lifecycle operations
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Registration failed: {0}")]
    RegistrationFailed(#[source] BackendError),

    #[error("Agent is already running")]
    AlreadyRunning,
}

/// Sizing knobs for the agent
#[derive(Debug, Clone, Copy)]
pub struct AgentOptions {
    /// Samples submitted per sync request
    pub batch_size: usize,

    /// Cache cap; the oldest samples beyond it are dropped
    pub max_cache_size: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_cache_size: 100,
        }
    }
}

/// Result of one sync attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to do: cache empty, device revoked, or agent never started
    Skipped,

    /// A batch was accepted and removed from the cache head
    Sent { count: usize },

    /// The server answered 403; submissions are now permanently halted
    Revoked,

    /// Transport error or unexpected status; cache untouched, the next tick retries
    Failed { reason: String },
}

impl SyncOutcome {
    /// True only when a batch was accepted
    pub fn is_sent(&self) -> bool {
        matches!(self, SyncOutcome::Sent { .. })
    }
}

/// Point-in-time view of the agent, for status logging
#[derive(Debug, Clone)]
pub struct AgentStatus {
    pub running: bool,
    pub revoked: bool,
    pub cached: usize,
    pub device_id: Option<DeviceId>,
}

/// The device agent.
///
/// Owns the bounded sample cache and the running/revoked flags. All state
/// lives here and is driven from a single execution context (the daemon's
/// tick loop), so there is no interior locking.
pub struct Agent {
    store: Arc<dyn Store>,
    telemetry: Arc<dyn TelemetrySource>,
    backend: Arc<dyn Backend>,
    options: AgentOptions,

    device_id: Option<DeviceId>,
    username: Option<String>,
    /// Oldest sample at the front
    cache: VecDeque<Sample>,
    running: bool,
    revoked: bool,
}

impl Agent {
    pub fn new(
        store: Arc<dyn Store>,
        telemetry: Arc<dyn TelemetrySource>,
        backend: Arc<dyn Backend>,
        options: AgentOptions,
    ) -> Self {
        Self {
            store,
            telemetry,
            backend,
            options,
            device_id: None,
            username: None,
            cache: VecDeque::new(),
            running: false,
            revoked: false,
        }
    }

    /// Start tracking: resolve identity, load the cache, register.
    ///
    /// The agent transitions to running only when registration succeeds;
    /// on failure the caller must not begin the periodic loop.
    pub async fn start(&mut self, username: &str) -> Result<(), AgentError> {
        if self.running {
            return Err(AgentError::AlreadyRunning);
        }

        let device_id = self.get_or_create_device_id();
        self.device_id = Some(device_id.clone());

        if let Err(e) = self.store.save_username(username) {
            warn!(error = %e, "Failed to persist username");
        }
        self.username = Some(username.to_string());

        self.cache = match self.store.load_cache() {
            Ok(samples) => VecDeque::from(samples),
            Err(e) => {
                warn!(error = %e, "Cache unreadable, starting empty");
                VecDeque::new()
            }
        };

        let request = RegisterRequest::new(device_id.clone(), username);
        self.backend
            .register_device(&request)
            .await
            .map_err(AgentError::RegistrationFailed)?;

        self.running = true;
        info!(
            device_id = %device_id,
            username,
            pending = self.cache.len(),
            "Agent registered and running"
        );

        Ok(())
    }

    /// Stop tracking.
    ///
    /// Makes one best-effort sync of whatever is still cached; its outcome
    /// is logged but not surfaced.
    pub async fn stop(&mut self) {
        self.running = false;

        if !self.cache.is_empty() {
            let outcome = self.sync_cache().await;
            debug!(?outcome, "Final sync on stop");
        }

        info!("Agent stopped");
    }

    /// Collect one sample and append it to the cache.
    ///
    /// Never fails outward: the telemetry source absorbs sensor errors into
    /// fallback values, and a failed cache write is logged and swallowed.
    pub async fn collect_and_cache(&mut self) -> Sample {
        let sample = self.telemetry.sample().await;
        self.cache.push_back(sample.clone());

        // Keep-newest: discard from the front once over the cap
        let mut dropped = 0usize;
        while self.cache.len() > self.options.max_cache_size {
            self.cache.pop_front();
            dropped += 1;
        }
        if dropped > 0 {
            warn!(dropped, cap = self.options.max_cache_size, "Cache full, oldest unsent samples dropped");
        }

        self.persist_cache();
        debug!(
            cached = self.cache.len(),
            battery = sample.battery,
            network = ?sample.network,
            "Sample collected"
        );

        sample
    }

    /// Submit one batch from the cache head.
    ///
    /// Exactly the submitted samples are removed on acceptance; any failure
    /// leaves the cache untouched. Retry is the caller's next tick - nothing
    /// is scheduled here.
    pub async fn sync_cache(&mut self) -> SyncOutcome {
        if self.cache.is_empty() || self.revoked {
            return SyncOutcome::Skipped;
        }

        let Some(device_id) = self.device_id.clone() else {
            // Collected before start(); nothing to address the batch with
            return SyncOutcome::Skipped;
        };

        let batch: Vec<Sample> = self
            .cache
            .iter()
            .take(self.options.batch_size)
            .cloned()
            .collect();
        let request = SubmitRequest::new(device_id, batch);

        match self.backend.submit_samples(&request).await {
            Ok(()) => {
                let sent = request.locations.len();
                self.cache.drain(..sent);
                self.persist_cache();
                info!(sent, remaining = self.cache.len(), "Batch submitted");
                SyncOutcome::Sent { count: sent }
            }
            Err(BackendError::Revoked) => {
                // Sticky for the process lifetime; queued samples stay but
                // will never be sent again
                self.revoked = true;
                warn!(
                    pending = self.cache.len(),
                    "Server revoked this device, submissions halted"
                );
                SyncOutcome::Revoked
            }
            Err(e) => {
                debug!(error = %e, "Submission failed, retrying next tick");
                SyncOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Current agent snapshot
    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            running: self.running,
            revoked: self.revoked,
            cached: self.cache.len(),
            device_id: self.device_id.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn device_id(&self) -> Option<&DeviceId> {
        self.device_id.as_ref()
    }

    fn get_or_create_device_id(&self) -> DeviceId {
        match self.store.load_device_id() {
            Ok(Some(id)) => id,
            Ok(None) => {
                let id = DeviceId::generate();
                if let Err(e) = self.store.save_device_id(&id) {
                    warn!(error = %e, "Failed to persist device identifier");
                }
                info!(device_id = %id, "Generated new device identifier");
                id
            }
            Err(e) => {
                warn!(error = %e, "Device identifier unreadable, generating a fresh one");
                let id = DeviceId::generate();
                if let Err(e) = self.store.save_device_id(&id) {
                    warn!(error = %e, "Failed to persist device identifier");
                }
                id
            }
        }
    }

    fn persist_cache(&mut self) {
        self.cache.make_contiguous();
        let (samples, _) = self.cache.as_slices();
        if let Err(e) = self.store.save_cache(samples) {
            warn!(error = %e, "Failed to persist cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockBackend;
    use beacon_store::MemoryStore;
    use beacon_telemetry::MockTelemetry;

    fn make_agent(
        store: Arc<dyn Store>,
        backend: Arc<MockBackend>,
        options: AgentOptions,
    ) -> Agent {
        Agent::new(
            store,
            Arc::new(MockTelemetry::default()),
            backend,
            options,
        )
    }

    async fn started_agent(backend: Arc<MockBackend>, options: AgentOptions) -> Agent {
        let mut agent = make_agent(Arc::new(MemoryStore::new()), backend, options);
        agent.start("alice").await.unwrap();
        agent
    }

    #[tokio::test]
    async fn cache_never_exceeds_cap_and_keeps_newest() {
        let backend = Arc::new(MockBackend::new());
        let options = AgentOptions {
            batch_size: 2,
            max_cache_size: 5,
        };
        let mut agent = started_agent(backend, options).await;

        let mut collected = Vec::new();
        for _ in 0..12 {
            collected.push(agent.collect_and_cache().await);
            assert!(agent.cached() <= 5);
        }

        // The 5 newest survive, in insertion order
        let remaining: Vec<Sample> = agent.cache.iter().cloned().collect();
        assert_eq!(remaining, collected[7..]);
    }

    #[tokio::test]
    async fn sync_on_empty_cache_is_skipped_without_request() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        assert_eq!(agent.sync_cache().await, SyncOutcome::Skipped);
        assert_eq!(backend.submit_calls(), 0);
    }

    #[tokio::test]
    async fn sync_when_revoked_is_skipped_without_request() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        agent.collect_and_cache().await;

        *backend.revoke_submit.lock().unwrap() = true;
        assert_eq!(agent.sync_cache().await, SyncOutcome::Revoked);
        assert!(agent.is_revoked());
        assert_eq!(backend.submit_calls(), 1);

        // Once revoked, no further requests go out at all
        assert_eq!(agent.sync_cache().await, SyncOutcome::Skipped);
        assert_eq!(backend.submit_calls(), 1);
    }

    #[tokio::test]
    async fn successful_sync_drains_exactly_one_batch_in_order() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        let mut collected = Vec::new();
        for _ in 0..15 {
            collected.push(agent.collect_and_cache().await);
        }

        assert_eq!(agent.sync_cache().await, SyncOutcome::Sent { count: 10 });
        assert_eq!(agent.cached(), 5);

        // The oldest ten were submitted, the newest five remain in order
        let accepted = backend.accepted();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].locations, collected[..10]);

        let remaining: Vec<Sample> = agent.cache.iter().cloned().collect();
        assert_eq!(remaining, collected[10..]);
    }

    #[tokio::test]
    async fn revocation_leaves_cache_untouched() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        for _ in 0..4 {
            agent.collect_and_cache().await;
        }
        let before: Vec<Sample> = agent.cache.iter().cloned().collect();

        *backend.revoke_submit.lock().unwrap() = true;
        assert_eq!(agent.sync_cache().await, SyncOutcome::Revoked);

        let after: Vec<Sample> = agent.cache.iter().cloned().collect();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn transport_failure_preserves_cache_for_retry() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        for _ in 0..3 {
            agent.collect_and_cache().await;
        }

        *backend.fail_submit.lock().unwrap() = true;
        assert!(matches!(
            agent.sync_cache().await,
            SyncOutcome::Failed { .. }
        ));
        assert_eq!(agent.cached(), 3);
        assert!(!agent.is_revoked());

        // The next tick succeeds and drains everything
        *backend.fail_submit.lock().unwrap() = false;
        assert_eq!(agent.sync_cache().await, SyncOutcome::Sent { count: 3 });
        assert_eq!(agent.cached(), 0);
    }

    #[tokio::test]
    async fn failed_registration_blocks_running() {
        let backend = Arc::new(MockBackend::new());
        *backend.fail_register.lock().unwrap() = true;

        let mut agent = make_agent(
            Arc::new(MemoryStore::new()),
            backend,
            AgentOptions::default(),
        );

        assert!(matches!(
            agent.start("alice").await,
            Err(AgentError::RegistrationFailed(_))
        ));
        assert!(!agent.is_running());
    }

    #[tokio::test]
    async fn device_id_is_stable_across_agents_sharing_a_store() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let backend = Arc::new(MockBackend::new());

        let mut first = make_agent(store.clone(), backend.clone(), AgentOptions::default());
        first.start("alice").await.unwrap();
        let first_id = first.device_id().unwrap().clone();

        let mut second = make_agent(store, backend, AgentOptions::default());
        second.start("alice").await.unwrap();

        assert_eq!(second.device_id(), Some(&first_id));
    }

    #[tokio::test]
    async fn start_loads_persisted_cache() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let backend = Arc::new(MockBackend::new());

        let mut first = make_agent(store.clone(), backend.clone(), AgentOptions::default());
        first.start("alice").await.unwrap();
        for _ in 0..6 {
            first.collect_and_cache().await;
        }

        let mut second = make_agent(store, backend, AgentOptions::default());
        second.start("alice").await.unwrap();
        assert_eq!(second.cached(), 6);
    }

    #[tokio::test]
    async fn stop_makes_one_best_effort_sync() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        for _ in 0..2 {
            agent.collect_and_cache().await;
        }

        agent.stop().await;
        assert!(!agent.is_running());
        assert_eq!(backend.submit_calls(), 1);
        assert_eq!(agent.cached(), 0);
    }

    #[tokio::test]
    async fn stop_with_empty_cache_issues_no_request() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend.clone(), AgentOptions::default()).await;

        agent.stop().await;
        assert_eq!(backend.submit_calls(), 0);
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend, AgentOptions::default()).await;

        assert!(matches!(
            agent.start("alice").await,
            Err(AgentError::AlreadyRunning)
        ));
    }

    #[tokio::test]
    async fn status_reflects_agent_state() {
        let backend = Arc::new(MockBackend::new());
        let mut agent = started_agent(backend, AgentOptions::default()).await;
        agent.collect_and_cache().await;

        let status = agent.status();
        assert!(status.running);
        assert!(!status.revoked);
        assert_eq!(status.cached, 1);
        assert!(status.device_id.is_some());
    }
}
