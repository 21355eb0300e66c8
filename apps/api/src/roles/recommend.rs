//! Recommendation Orchestrator: cache-aside enrichment of suggested roles.
//!
//! For each suggested role: look it up in the store; on a miss, generate the
//! detail, store it, and use it. Roles whose detail cannot be generated are
//! left out of the result.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::job_role::{normalize_role_name, JobRole, ProjectIdea};
use crate::roles::store::RoleStore;
use crate::roles::suggest::{RoleSuggester, RoleSuggestion};

pub const RECOMMEND_PREVIEW_CHARS: usize = 130;
pub const LISTING_PREVIEW_CHARS: usize = 120;
const ELLIPSIS: &str = "...";

pub const SKILLS_REQUIRED: &str = "Skills array required";

/// One entry of a recommendation response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedJob {
    pub role: String,
    pub score: Option<f64>,
    pub preview: String,
    pub project_ideas: Vec<String>,
}

impl EnrichedJob {
    fn build(role: &JobRole, suggestion: &RoleSuggestion) -> Self {
        EnrichedJob {
            role: role.role_name.clone(),
            score: suggestion.score,
            preview: preview(&role.description, RECOMMEND_PREVIEW_CHARS),
            project_ideas: idea_titles(&role.project_ideas),
        }
    }
}

/// Suggests roles for `skills` and enriches each one from the store, generating
/// and storing detail for roles seen for the first time.
pub async fn recommend(
    store: &dyn RoleStore,
    suggester: &dyn RoleSuggester,
    skills: &[String],
) -> Result<Vec<EnrichedJob>, AppError> {
    let skills = clean_skills(skills);
    if skills.is_empty() {
        return Err(AppError::Validation(SKILLS_REQUIRED.to_string()));
    }

    let suggestions = suggester.suggest_roles(&skills).await?;
    info!(
        "Recommending for {} skill(s): {} suggestion(s)",
        skills.len(),
        suggestions.len()
    );

    let mut jobs = Vec::with_capacity(suggestions.len());
    for suggestion in &suggestions {
        let key = normalize_role_name(&suggestion.role);

        if let Some(stored) = store.find_by_name(&key).await? {
            debug!("Cache hit for role '{key}'");
            jobs.push(EnrichedJob::build(&stored, suggestion));
            continue;
        }

        debug!("Cache miss for role '{key}', generating detail");
        let Some(detail) = suggester.describe_role(&suggestion.role).await else {
            warn!("Skipping role '{}': no detail available", suggestion.role);
            continue;
        };

        let role = detail.into_job_role(&suggestion.role);
        store.insert(&role).await?;
        info!("Generated and stored role '{}'", role.role_name);
        jobs.push(EnrichedJob::build(&role, suggestion));
    }

    Ok(jobs)
}

/// First `limit` characters of `description` followed by `...`.
/// The marker is appended even when nothing was cut.
pub fn preview(description: &str, limit: usize) -> String {
    let mut out: String = description.chars().take(limit).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Project ideas reduced to their titles.
pub fn idea_titles(ideas: &[ProjectIdea]) -> Vec<String> {
    ideas.iter().map(|idea| idea.title().to_string()).collect()
}

fn clean_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
