// Job-application endpoints. Every operation runs behind the auth gate and
// every store access carries the caller's id alongside the record id.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::{JobStatus, NewJob};

/// Submitted job fields, shared by add and edit.
///
/// Everything is optional so that validation happens here with the messages
/// clients expect, not in the deserializer. An empty string counts as absent:
/// on edit it leaves the stored value untouched rather than clearing it.
#[derive(Debug, Default, Deserialize)]
pub struct JobFields {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

fn parse_status(raw: &str) -> Result<JobStatus, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Status must be Applied, Interview Scheduled or Offered"))
}

/// An interview on the calendar needs details attached. Checked against the
/// record as it would be stored, so an edit cannot sneak a job into
/// `Interview Scheduled` while its notes are still empty.
fn check_interview_notes(status: JobStatus, notes: Option<&str>) -> Result<(), ApiError> {
    if status == JobStatus::InterviewScheduled && notes.map_or(true, str::is_empty) {
        return Err(ApiError::bad_request("Interview details is required"));
    }
    Ok(())
}

/// POST /add-job
pub async fn add_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<JobFields>,
) -> Result<Json<Value>, ApiError> {
    let company =
        present(body.company).ok_or_else(|| ApiError::bad_request("Company name is required"))?;
    let position = present(body.position)
        .ok_or_else(|| ApiError::bad_request("Applied position is required"))?;
    let status =
        present(body.status).ok_or_else(|| ApiError::bad_request("Status is required"))?;
    let status = parse_status(&status)?;
    let notes = present(body.notes);

    check_interview_notes(status, notes.as_deref())?;

    let job = state
        .store
        .create_job(NewJob {
            user_id: auth.user_id(),
            company,
            position,
            status,
            notes,
        })
        .await?;

    Ok(Json(json!({
        "error": false,
        "job": job,
        "message": "Job added successfully"
    })))
}

/// PUT /edit-job/:jobId - partial update of an owned record
pub async fn edit_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<JobFields>,
) -> Result<Json<Value>, ApiError> {
    let mut job = state
        .store
        .job_by_id(job_id, auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("The given job is not found."))?;

    if let Some(company) = present(body.company) {
        job.company = company;
    }
    if let Some(position) = present(body.position) {
        job.position = position;
    }
    if let Some(status) = present(body.status) {
        job.status = parse_status(&status)?;
    }
    if let Some(notes) = present(body.notes) {
        job.notes = Some(notes);
    }

    check_interview_notes(job.status, job.notes.as_deref())?;

    if !state.store.update_job(&job).await? {
        // The record vanished between the read and the write-back.
        return Err(ApiError::not_found("The given job is not found."));
    }

    Ok(Json(json!({
        "error": false,
        "job": job,
        "message": "Job updated successfully"
    })))
}

/// GET /get-all-jobs - every record the caller owns
///
/// The full list goes back in one response; search, filtering and pagination
/// are client-side concerns.
pub async fn get_all_jobs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let jobs = state.store.jobs_by_owner(auth.user_id()).await?;

    Ok(Json(json!({
        "error": false,
        "jobs": jobs,
        "message": "All the jobs retrieved successfully"
    })))
}

/// DELETE /delete-job/:jobId
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_job(job_id, auth.user_id()).await? {
        // Absent and not-owned answer identically, and a repeated delete
        // reports the record as gone rather than pretending to succeed.
        return Err(ApiError::not_found("Job not found"));
    }

    Ok(Json(json!({
        "error": false,
        "message": "Job deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_status_demands_notes() {
        assert!(check_interview_notes(JobStatus::InterviewScheduled, None).is_err());
        assert!(check_interview_notes(JobStatus::InterviewScheduled, Some("")).is_err());
        assert!(check_interview_notes(JobStatus::InterviewScheduled, Some("on-site Tue")).is_ok());
    }

    #[test]
    fn other_statuses_do_not_demand_notes() {
        assert!(check_interview_notes(JobStatus::Applied, None).is_ok());
        assert!(check_interview_notes(JobStatus::Offered, None).is_ok());
    }

    #[test]
    fn empty_submissions_count_as_absent() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some("Acme".into())), Some("Acme".into()));
    }
}
