//! Axum route handlers for the roles API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::models::job_role::{normalize_role_name, ProjectIdea};
use crate::roles::recommend::{
    idea_titles, preview, recommend, EnrichedJob, LISTING_PREVIEW_CHARS, SKILLS_REQUIRED,
};
use crate::state::AppState;

pub const JOB_NOT_FOUND: &str = "Job not found";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailResponse {
    pub role: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub resume_keywords: Vec<String>,
    pub project_ideas: Vec<ProjectIdea>,
    pub roadmap_link: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub role: String,
    pub preview: String,
    pub project_ideas: Vec<String>,
    pub roadmap_link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /recommend
///
/// Body: `{ "skills": ["string", ...] }`. Any other shape is a 400.
pub async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<EnrichedJob>>, AppError> {
    let body = match payload {
        Ok(Json(body)) => Some(body),
        Err(rejection) => {
            debug!("Rejected recommend body: {rejection}");
            None
        }
    };
    let skills = skills_from_body(body.as_ref())?;

    let jobs = recommend(state.roles.as_ref(), state.suggester.as_ref(), &skills).await?;
    Ok(Json(jobs))
}

/// GET /job/:role
///
/// Full stored detail for one role. Never calls the provider.
pub async fn handle_get_job(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let Path(role) = path.map_err(|rejection| {
        debug!("Rejected job path: {rejection}");
        AppError::NotFound(JOB_NOT_FOUND.to_string())
    })?;

    let role = state
        .roles
        .find_by_name(&normalize_role_name(&role))
        .await?
        .ok_or_else(|| AppError::NotFound(JOB_NOT_FOUND.to_string()))?;

    Ok(Json(JobDetailResponse {
        role: role.role_name,
        description: role.description,
        tech_stack: role.tech_stack,
        resume_keywords: role.resume_keywords,
        project_ideas: role.project_ideas,
        roadmap_link: role.roadmap_link,
    }))
}

/// GET /jobs
///
/// Every stored role, ascending by name, with a short preview.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let roles = state.roles.list_all().await?;

    let summaries = roles
        .into_iter()
        .map(|role| JobSummary {
            preview: preview(&role.description, LISTING_PREVIEW_CHARS),
            project_ideas: idea_titles(&role.project_ideas),
            role: role.role_name,
            roadmap_link: role.roadmap_link,
        })
        .collect();

    Ok(Json(summaries))
}

fn skills_from_body(body: Option<&Value>) -> Result<Vec<String>, AppError> {
    let invalid = || AppError::Validation(SKILLS_REQUIRED.to_string());

    let items = body
        .and_then(|b| b.get("skills"))
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(invalid)?;

    items
        .iter()
        .map(|item| item.as_str().map(String::from).ok_or_else(invalid))
        .collect()
}
