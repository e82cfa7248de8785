//! Judge0 wire format

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::job::{JobRequest, JobResult, JobStatus};

/// Body of `POST /submissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    pub base64_encoded: bool,
    /// Asks the service to answer only once the job is done. A hint; the
    /// poller never relies on it.
    pub wait: bool,
}

impl From<&JobRequest> for SubmissionRequest {
    fn from(req: &JobRequest) -> Self {
        Self {
            source_code: req.source_code.clone(),
            language_id: req.language.judge0_id(),
            stdin: req.stdin.clone(),
            base64_encoded: false,
            wait: true,
        }
    }
}

/// Acknowledgement of a submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionAck {
    #[serde(default)]
    pub token: Option<String>,
}

/// Status object inside a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub id: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET /submissions/{token}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionDetails {
    #[serde(default)]
    pub status: Option<StatusBody>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    /// Seconds; Judge0 sends it as a decimal string
    #[serde(default, deserialize_with = "number_or_string")]
    pub time: Option<f64>,
    /// Kilobytes
    #[serde(default)]
    pub memory: Option<u64>,
}

impl SubmissionDetails {
    /// Classified status, if the body carried one
    pub fn job_status(&self) -> Option<JobStatus> {
        self.status
            .as_ref()
            .map(|s| JobStatus::from_raw(s.id, s.description.clone()))
    }

    /// Projects a terminal submission into a [`JobResult`]
    ///
    /// Returns `None` while the submission is still queued or processing.
    /// A body without a status object is terminal and unsuccessful.
    pub fn into_result(self) -> Option<JobResult> {
        let (succeeded, status) = match self.job_status() {
            Some(JobStatus::Queued | JobStatus::Processing) => return None,
            Some(JobStatus::Finished(v) | JobStatus::Errored(v)) => (v.is_success(), v.description),
            None => (false, "No Status".to_string()),
        };

        Some(JobResult {
            succeeded,
            status,
            stdout: self.stdout,
            stderr: self.stderr,
            compile_output: self.compile_output,
            elapsed_time: self.time,
            memory_kb: self.memory,
        })
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    // A time the service could not report must not hide the rest of the result.
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}
