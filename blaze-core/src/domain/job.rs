//! Job domain types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::language::Language;
use crate::dto::run::RunRequest;

/// Judge0 status id for an accepted run
pub const STATUS_ACCEPTED: u32 = 3;

/// Validated code-execution request
///
/// Only constructed through [`JobRequest::try_from`] on a [`RunRequest`] or
/// through [`JobRequest::new`], so the language always comes from the
/// supported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub source_code: String,
    pub language: Language,
    pub stdin: String,
}

/// Reasons a run request is rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("Code and language are required")]
    MissingCode,

    #[error("Code and language are required")]
    MissingLanguage,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl JobRequest {
    /// Creates a request for an already-resolved language
    pub fn new(
        source_code: impl Into<String>,
        language: Language,
        stdin: impl Into<String>,
    ) -> Result<Self, InvalidRequest> {
        let source_code = source_code.into();
        if source_code.is_empty() {
            return Err(InvalidRequest::MissingCode);
        }
        Ok(Self {
            source_code,
            language,
            stdin: stdin.into(),
        })
    }
}

impl TryFrom<RunRequest> for JobRequest {
    type Error = InvalidRequest;

    fn try_from(req: RunRequest) -> Result<Self, Self::Error> {
        let code = req
            .code
            .filter(|c| !c.is_empty())
            .ok_or(InvalidRequest::MissingCode)?;
        let name = req
            .language
            .filter(|l| !l.is_empty())
            .ok_or(InvalidRequest::MissingLanguage)?;
        let language =
            Language::from_name(&name).ok_or(InvalidRequest::UnsupportedLanguage(name))?;

        Self::new(code, language, req.stdin.unwrap_or_default())
    }
}

/// Opaque token identifying a submitted job on the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wraps a token, rejecting empty ones
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal status reported by the execution service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub id: u32,
    pub description: String,
}

impl Verdict {
    /// Only the Accepted status counts as success
    pub fn is_success(&self) -> bool {
        self.id == STATUS_ACCEPTED
    }
}

/// Status of a submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Processing,
    /// The program ran (or failed to compile/run) and produced a verdict
    Finished(Verdict),
    /// The execution service itself failed, or reported an unknown status
    Errored(Verdict),
}

impl JobStatus {
    /// Classifies a raw Judge0 status id
    ///
    /// 1 and 2 are transient; 3 to 12 are program verdicts; anything else
    /// is a service-side error.
    pub fn from_raw(id: u32, description: Option<String>) -> Self {
        let verdict = |fallback: &str| Verdict {
            id,
            description: description
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
        };

        match id {
            1 => JobStatus::Queued,
            2 => JobStatus::Processing,
            3 => JobStatus::Finished(verdict("Accepted")),
            4 => JobStatus::Finished(verdict("Wrong Answer")),
            5 => JobStatus::Finished(verdict("Time Limit Exceeded")),
            6 => JobStatus::Finished(verdict("Compilation Error")),
            7..=12 => JobStatus::Finished(verdict("Runtime Error")),
            13 => JobStatus::Errored(verdict("Internal Error")),
            14 => JobStatus::Errored(verdict("Exec Format Error")),
            _ => JobStatus::Errored(verdict("Unknown Status")),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished(_) | JobStatus::Errored(_))
    }

    /// The verdict of a terminal status
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            JobStatus::Finished(v) | JobStatus::Errored(v) => Some(v),
            JobStatus::Queued | JobStatus::Processing => None,
        }
    }
}

/// Normalized result of a finished job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    /// Execution time in seconds
    pub elapsed_time: Option<f64>,
    pub memory_kb: Option<u64>,
    /// Human-readable verdict
    pub status: String,
    pub succeeded: bool,
}

impl JobResult {
    /// Unsuccessful result with no program output
    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            stdout: None,
            stderr: None,
            compile_output: None,
            elapsed_time: None,
            memory_kb: None,
            status: status.into(),
            succeeded: false,
        }
    }
}
