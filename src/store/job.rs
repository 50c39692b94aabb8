use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Progress states a job application can be in. The wire strings are part of
/// the client contract and include a space, so the enum is renamed rather
/// than the client format changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    Offered,
}

impl JobStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::InterviewScheduled => "Interview Scheduled",
            JobStatus::Offered => "Offered",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for JobStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(JobStatus::Applied),
            "Interview Scheduled" => Ok(JobStatus::InterviewScheduled),
            "Offered" => Ok(JobStatus::Offered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Persisted job-application record. Owned by exactly one user; the store
/// only ever reads or mutates it through queries that carry both the record
/// id and the owner id.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "appliedOn")]
    pub applied_on: DateTime<Utc>,
}

/// Fields of a job record about to be created; `applied_on` is stamped by
/// the store at insert time.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_known_statuses() {
        assert_eq!("Applied".parse::<JobStatus>(), Ok(JobStatus::Applied));
        assert_eq!(
            "Interview Scheduled".parse::<JobStatus>(),
            Ok(JobStatus::InterviewScheduled)
        );
        assert_eq!("Offered".parse::<JobStatus>(), Ok(JobStatus::Offered));
    }

    #[test]
    fn rejects_unknown_and_differently_cased_statuses() {
        assert!("Ghosted".parse::<JobStatus>().is_err());
        assert!("applied".parse::<JobStatus>().is_err());
        assert!("".parse::<JobStatus>().is_err());
    }

    #[test]
    fn serializes_with_the_wire_strings() {
        assert_eq!(
            serde_json::to_value(JobStatus::InterviewScheduled).unwrap(),
            serde_json::json!("Interview Scheduled")
        );
        assert_eq!(
            serde_json::to_value(JobStatus::Applied).unwrap(),
            serde_json::json!("Applied")
        );
    }

    #[test]
    fn job_serializes_with_client_field_names_and_omits_unset_notes() {
        let job = Job {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: "Acme".to_string(),
            position: "Eng".to_string(),
            status: JobStatus::Applied,
            notes: None,
            applied_on: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("userId").is_some());
        assert!(value.get("appliedOn").is_some());
        assert!(value.get("notes").is_none());
        assert!(value.get("user_id").is_none());
    }
}
