//! Caller-facing run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobResult;
use crate::domain::language::Language;

/// Body of `POST /api/runners`
///
/// Every field is optional on the wire so that missing values surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stdin: Option<String>,
}

/// Payload returned for a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub time_taken: Option<f64>,
    pub success: bool,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<JobResult> for RunResponse {
    fn from(result: JobResult) -> Self {
        Self {
            stdout: result.stdout,
            stderr: result.stderr,
            time_taken: result.elapsed_time,
            success: result.succeeded,
            compile_output: result.compile_output,
            memory: result.memory_kb,
            status: Some(result.status),
        }
    }
}

/// Entry of `GET /api/languages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub id: u32,
    pub extensions: Vec<String>,
}

impl From<Language> for LanguageInfo {
    fn from(lang: Language) -> Self {
        Self {
            name: lang.name().to_string(),
            id: lang.judge0_id(),
            extensions: lang.extensions().iter().map(|e| e.to_string()).collect(),
        }
    }
}
