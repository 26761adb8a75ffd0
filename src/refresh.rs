//! Single-flight refresh coordination
//!
//! The fetch-and-parse cycle runs as a background task. Issuing a new
//! refresh aborts the in-flight predecessor, and a completed cycle only
//! updates the shared display snapshot if no newer cycle has been issued,
//! so the displayed list follows request issuance order rather than task
//! completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::error::ForecastError;
use crate::fetch::ForecastSource;
use crate::models::ForecastRequest;
use crate::owm;

/// Clonable record of a failed refresh, kept alongside the last good lines
#[derive(Debug, Clone)]
pub struct FailedRefresh {
    /// Whether retrying the same request could plausibly succeed
    pub retryable: bool,
    /// Human-readable failure description
    pub message: String,
}

impl From<&ForecastError> for FailedRefresh {
    fn from(err: &ForecastError) -> Self {
        Self {
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

/// Atomically updated view of the latest forecast state
#[derive(Debug, Clone, Default)]
pub struct DisplaySnapshot {
    /// Generation of the refresh that last touched this snapshot
    /// (0 means no refresh has completed yet)
    pub generation: u64,
    /// Display lines from the most recent successful refresh
    pub lines: Vec<String>,
    /// Failure of the most recent refresh, if any. The lines above keep
    /// the previous data so callers can show stale results plus an error.
    pub last_error: Option<FailedRefresh>,
}

struct Shared {
    snapshot: Mutex<DisplaySnapshot>,
    issued: AtomicU64,
}

impl Shared {
    fn apply(&self, generation: u64, result: &Result<Vec<String>, ForecastError>) {
        let mut snapshot = self.snapshot.lock().expect("snapshot lock poisoned");
        if generation <= snapshot.generation {
            debug!(
                generation,
                applied = snapshot.generation,
                "discarding result of superseded refresh"
            );
            return;
        }

        snapshot.generation = generation;
        match result {
            Ok(lines) => {
                snapshot.lines.clone_from(lines);
                snapshot.last_error = None;
            }
            Err(err) => {
                snapshot.last_error = Some(FailedRefresh::from(err));
            }
        }
    }
}

/// Coordinates forecast refreshes over a [`ForecastSource`]
pub struct RefreshCoordinator {
    source: Arc<dyn ForecastSource>,
    shared: Arc<Shared>,
    inflight: Mutex<Option<AbortHandle>>,
    /// Reference-date source, injected so parsing is deterministic in tests
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    owm::reference_start_date(Local::now())
}

impl RefreshCoordinator {
    /// Create a coordinator using the local calendar day as reference date
    pub fn new(source: impl ForecastSource) -> Self {
        Self::with_clock(source, local_today)
    }

    /// Create a coordinator with an explicit reference-date source
    pub fn with_clock(source: impl ForecastSource, clock: fn() -> NaiveDate) -> Self {
        Self {
            source: Arc::new(source),
            shared: Arc::new(Shared {
                snapshot: Mutex::new(DisplaySnapshot::default()),
                issued: AtomicU64::new(0),
            }),
            inflight: Mutex::new(None),
            clock,
        }
    }

    /// Issue a refresh in the background, cancelling any in-flight one.
    /// Returns the generation number assigned to this refresh.
    pub fn refresh(&self, request: ForecastRequest) -> u64 {
        self.issue(request).0
    }

    /// Issue a refresh and wait for its outcome. If a newer refresh
    /// supersedes this one before it completes, the result is
    /// [`ForecastError::Superseded`].
    pub async fn refresh_and_wait(
        &self,
        request: ForecastRequest,
    ) -> Result<Vec<String>, ForecastError> {
        let (generation, handle) = self.issue(request);
        match handle.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => {
                Err(ForecastError::Superseded { generation })
            }
            Err(join_err) => std::panic::resume_unwind(join_err.into_panic()),
        }
    }

    /// Current display state: lines from the last successful refresh plus
    /// the last failure, read atomically
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.shared
            .snapshot
            .lock()
            .expect("snapshot lock poisoned")
            .clone()
    }

    fn issue(
        &self,
        request: ForecastRequest,
    ) -> (
        u64,
        tokio::task::JoinHandle<Result<Vec<String>, ForecastError>>,
    ) {
        let generation = self.shared.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut inflight = self.inflight.lock().expect("inflight lock poisoned");
            if let Some(previous) = inflight.take() {
                if !previous.is_finished() {
                    debug!(generation, "aborting superseded in-flight refresh");
                    previous.abort();
                }
            }
        }

        info!(generation, location = %request.location(), "issuing forecast refresh");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.shared);
        let clock = self.clock;
        let handle = tokio::spawn(async move {
            let result = run_cycle(source.as_ref(), &request, clock).await;
            if let Err(err) = &result {
                warn!(generation, "refresh failed: {err}");
            }
            shared.apply(generation, &result);
            result
        });

        let mut inflight = self.inflight.lock().expect("inflight lock poisoned");
        *inflight = Some(handle.abort_handle());

        (generation, handle)
    }
}

/// One fetch-and-parse cycle. The reference date is captured at parse
/// start, after the payload has arrived.
async fn run_cycle(
    source: &dyn ForecastSource,
    request: &ForecastRequest,
    clock: fn() -> NaiveDate,
) -> Result<Vec<String>, ForecastError> {
    let payload = source.fetch(request).await?;
    owm::render_forecast(&payload, request, clock())
}
