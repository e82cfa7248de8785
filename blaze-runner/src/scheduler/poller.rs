//! Job poller
//!
//! Submits a job to the execution service, then queries its status until it
//! reaches a terminal state, the attempt budget runs out, the deadline
//! passes, or the caller cancels.
//!
//! The run is an explicit state machine:
//! `Submitting -> Polling { attempt } -> Done | Failed`.

use std::sync::Arc;

use blaze_client::ClientError;
use blaze_core::domain::job::{JobHandle, JobRequest, JobResult};
use blaze_core::dto::judge0::SubmissionRequest;
use blaze_core::dto::run::RunRequest;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::RunError;
use crate::repository::ExecutionBackend;
use crate::scheduler::pause::{Pause, TokioPause};

/// State of a single run
#[derive(Debug)]
enum PollState {
    Submitting(JobRequest),
    Polling {
        handle: JobHandle,
        /// 1-based number of the next status query
        attempt: u32,
        last_error: Option<String>,
    },
    Done(JobResult),
    Failed(RunError),
}

/// Submits jobs and polls them to completion
///
/// Holds no per-run state; one poller serves any number of concurrent runs.
pub struct JobPoller {
    config: Config,
    backend: Arc<dyn ExecutionBackend>,
    pause: Arc<dyn Pause>,
}

impl JobPoller {
    /// Creates a poller that waits on the tokio timer
    pub fn new(config: Config, backend: Arc<dyn ExecutionBackend>) -> Self {
        Self {
            config,
            backend,
            pause: Arc::new(TokioPause),
        }
    }

    /// Creates a poller talking to the Judge0 instance named in `config`
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let client = config.judge0_client()?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Replaces the wait primitive used between attempts
    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates a caller request and runs it
    ///
    /// Invalid requests fail with [`RunError::InvalidInput`] before any
    /// network call.
    pub async fn submit(
        &self,
        req: RunRequest,
        cancel: &CancellationToken,
    ) -> Result<JobResult, RunError> {
        let job = JobRequest::try_from(req).inspect_err(|e| {
            debug!("Rejected run request: {}", e);
        })?;

        self.execute(job, cancel).await
    }

    /// Runs an already validated request
    pub async fn execute(
        &self,
        job: JobRequest,
        cancel: &CancellationToken,
    ) -> Result<JobResult, RunError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, language = %job.language);

        self.drive(job, cancel).instrument(span).await
    }

    async fn drive(
        &self,
        job: JobRequest,
        cancel: &CancellationToken,
    ) -> Result<JobResult, RunError> {
        let deadline = self.config.deadline.map(|d| Instant::now() + d);
        let mut state = PollState::Submitting(job);

        loop {
            state = match state {
                PollState::Submitting(job) => self.submit_job(job, cancel).await,
                PollState::Polling {
                    handle,
                    attempt,
                    last_error,
                } => {
                    self.poll_attempt(handle, attempt, last_error, deadline, cancel)
                        .await
                }
                PollState::Done(result) => {
                    info!(
                        "Run finished: {} (success={})",
                        result.status, result.succeeded
                    );
                    return Ok(result);
                }
                PollState::Failed(err) => {
                    warn!("Run failed: {}", err);
                    return Err(err);
                }
            };
        }
    }

    /// Submitting: one call, never retried
    async fn submit_job(&self, job: JobRequest, cancel: &CancellationToken) -> PollState {
        if cancel.is_cancelled() {
            return PollState::Failed(RunError::Cancelled);
        }

        let body = SubmissionRequest::from(&job);
        debug!("Submitting job ({} bytes of source)", body.source_code.len());

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollState::Failed(RunError::Cancelled),
            outcome = self.backend.create_submission(&body) => outcome,
        };

        match outcome {
            Ok(ack) => match ack.token.and_then(JobHandle::new) {
                Some(handle) => {
                    info!("Submission accepted (token={})", handle);
                    PollState::Polling {
                        handle,
                        attempt: 1,
                        last_error: None,
                    }
                }
                None => PollState::Failed(RunError::SubmissionFailed(
                    "acknowledgement carried no token".to_string(),
                )),
            },
            Err(e) if e.is_transport() => PollState::Failed(RunError::TransportError(e.to_string())),
            Err(e) => PollState::Failed(RunError::SubmissionFailed(e.to_string())),
        }
    }

    /// Polling: one status query, then either a result or a wait
    ///
    /// Network and decode errors on a single attempt are logged and consume
    /// the attempt. An error status from the service ends the run.
    async fn poll_attempt(
        &self,
        handle: JobHandle,
        attempt: u32,
        mut last_error: Option<String>,
        deadline: Option<Instant>,
        cancel: &CancellationToken,
    ) -> PollState {
        if cancel.is_cancelled() {
            return PollState::Failed(RunError::Cancelled);
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            return PollState::Failed(RunError::PollingTimedOut {
                attempts: attempt - 1,
                last_error,
            });
        }

        let max_attempts = self.config.max_attempts;
        debug!(
            "Polling submission {} (attempt {}/{})",
            handle, attempt, max_attempts
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollState::Failed(RunError::Cancelled),
            outcome = self.backend.get_submission(&handle) => outcome,
        };

        match outcome {
            Ok(details) => {
                let status = details.job_status();
                if let Some(result) = details.into_result() {
                    return PollState::Done(result);
                }
                debug!("Submission {} is {:?}", handle, status);
            }
            Err(ClientError::ApiError { status, message }) => {
                warn!(
                    "Execution service answered {} for submission {}: {}",
                    status, handle, message
                );
                return PollState::Done(JobResult::failed(format!(
                    "Execution service error (status {})",
                    status
                )));
            }
            Err(e) => {
                warn!(
                    "Error while polling submission {} (attempt {}/{}): {}",
                    handle, attempt, max_attempts, e
                );
                last_error = Some(e.to_string());
            }
        }

        if attempt >= max_attempts {
            return PollState::Failed(RunError::PollingTimedOut {
                attempts: attempt,
                last_error,
            });
        }

        let mut delay = self.config.delay_after(attempt);
        if let Some(deadline) = deadline {
            delay = delay.min(deadline.saturating_duration_since(Instant::now()));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => PollState::Failed(RunError::Cancelled),
            _ = self.pause.pause(delay) => PollState::Polling {
                handle,
                attempt: attempt + 1,
                last_error,
            },
        }
    }
}
