//! Execution service repository

use async_trait::async_trait;
use blaze_client::{ClientError, Judge0Client};
use blaze_core::domain::job::JobHandle;
use blaze_core::dto::judge0::{SubmissionAck, SubmissionDetails, SubmissionRequest};

/// Remote service able to accept and report on code-execution jobs
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Submits a job
    ///
    /// An `Ok` acknowledgement may still lack a token; the caller decides
    /// what that means.
    async fn create_submission(&self, req: &SubmissionRequest)
    -> Result<SubmissionAck, ClientError>;

    /// Fetches the current state of a submitted job
    async fn get_submission(&self, handle: &JobHandle) -> Result<SubmissionDetails, ClientError>;
}

#[async_trait]
impl ExecutionBackend for Judge0Client {
    async fn create_submission(
        &self,
        req: &SubmissionRequest,
    ) -> Result<SubmissionAck, ClientError> {
        Judge0Client::create_submission(self, req).await
    }

    async fn get_submission(&self, handle: &JobHandle) -> Result<SubmissionDetails, ClientError> {
        Judge0Client::get_submission(self, handle).await
    }
}
