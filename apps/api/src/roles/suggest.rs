//! Suggestion Client: turns skills into ranked role names and role names into
//! structured detail, via the LLM.
//!
//! Model output is best-effort structured text. Anything that does not match
//! the expected shape degrades to "no suggestions" / "no detail" instead of
//! an error; only a failed or unparseable provider call is an error.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::job_role::{JobRole, ProjectIdea};
use crate::roles::prompts::{DESCRIBE_ROLE_PROMPT, SUGGEST_ROLES_PROMPT};

/// Upper bound on suggestions kept per request.
pub const MAX_SUGGESTIONS: usize = 3;

/// A candidate role for a set of skills. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSuggestion {
    pub role: String,
    /// 0 – 100; `None` when the model gave no usable score.
    pub score: Option<f64>,
}

/// Generated detail for a single role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetail {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, alias = "tech_stack", deserialize_with = "lenient_list")]
    pub tech_stack: Vec<String>,
    #[serde(default, alias = "resume_keywords", deserialize_with = "lenient_list")]
    pub resume_keywords: Vec<String>,
    #[serde(default, alias = "project_ideas", deserialize_with = "lenient_list")]
    pub project_ideas: Vec<ProjectIdea>,
    #[serde(default, alias = "roadmap_link", deserialize_with = "lenient_link")]
    pub roadmap_link: Option<String>,
}

impl RoleDetail {
    pub fn into_job_role(self, role_name: &str) -> JobRole {
        JobRole {
            role_name: role_name.trim().to_string(),
            description: self.description,
            tech_stack: self.tech_stack,
            resume_keywords: self.resume_keywords,
            project_ideas: self.project_ideas,
            roadmap_link: self.roadmap_link,
        }
    }
}

/// Source of role suggestions and role detail.
/// Carried in `AppState` as `Arc<dyn RoleSuggester>`.
#[async_trait]
pub trait RoleSuggester: Send + Sync {
    /// Up to `MAX_SUGGESTIONS` roles, best fit first.
    async fn suggest_roles(&self, skills: &[String]) -> Result<Vec<RoleSuggestion>, AppError>;

    /// Detail for one role, or `None` on any failure.
    async fn describe_role(&self, role_name: &str) -> Option<RoleDetail>;
}

/// `RoleSuggester` backed by the LLM client.
#[derive(Clone)]
pub struct LlmRoleSuggester {
    llm: LlmClient,
}

impl LlmRoleSuggester {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RoleSuggester for LlmRoleSuggester {
    async fn suggest_roles(&self, skills: &[String]) -> Result<Vec<RoleSuggestion>, AppError> {
        let prompt = SUGGEST_ROLES_PROMPT.replace("{skills}", &skills.join(", "));
        let raw: Value = self
            .llm
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Provider(format!("Role suggestion failed: {e}")))?;

        let suggestions = parse_suggestions(raw);
        debug!("Provider suggested {} role(s)", suggestions.len());
        Ok(suggestions)
    }

    async fn describe_role(&self, role_name: &str) -> Option<RoleDetail> {
        let prompt = DESCRIBE_ROLE_PROMPT.replace("{role}", role_name.trim());
        match self.llm.call_json::<Value>(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(raw) => {
                let detail = parse_role_detail(raw);
                if detail.is_none() {
                    warn!("Unusable detail returned for role '{role_name}'");
                }
                detail
            }
            Err(e) => {
                warn!("Describing role '{role_name}' failed: {e}");
                None
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestion payload shapes
// ────────────────────────────────────────────────────────────────────────────

/// The envelopes the model has been seen to use for a suggestion list.
#[derive(Debug)]
enum SuggestionPayload {
    BareList(Vec<Value>),
    RolesField(Vec<Value>),
    JobsField(Vec<Value>),
    Unrecognized(Value),
}

impl SuggestionPayload {
    fn classify(raw: Value) -> Self {
        match raw {
            Value::Array(items) => SuggestionPayload::BareList(items),
            Value::Object(mut map) => {
                if let Some(items) = take_array(&mut map, "roles") {
                    SuggestionPayload::RolesField(items)
                } else if let Some(items) = take_array(&mut map, "jobs") {
                    SuggestionPayload::JobsField(items)
                } else {
                    SuggestionPayload::Unrecognized(Value::Object(map))
                }
            }
            other => SuggestionPayload::Unrecognized(other),
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            SuggestionPayload::BareList(items)
            | SuggestionPayload::RolesField(items)
            | SuggestionPayload::JobsField(items) => items,
            SuggestionPayload::Unrecognized(raw) => {
                warn!("Unrecognized role suggestion payload: {raw}");
                Vec::new()
            }
        }
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    if !matches!(map.get(key), Some(Value::Array(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// One element of a suggestion list: a bare name or a scored object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionItem {
    Name(String),
    Scored(ScoredRole),
}

#[derive(Debug, Deserialize)]
struct ScoredRole {
    #[serde(alias = "name", alias = "title", alias = "roleName")]
    role: String,
    #[serde(default, deserialize_with = "lenient_score")]
    score: Option<f64>,
}

impl From<SuggestionItem> for RoleSuggestion {
    fn from(item: SuggestionItem) -> Self {
        match item {
            SuggestionItem::Name(role) => RoleSuggestion {
                role: role.trim().to_string(),
                score: None,
            },
            SuggestionItem::Scored(scored) => RoleSuggestion {
                role: scored.role.trim().to_string(),
                score: scored.score.map(|s| s.clamp(0.0, 100.0)),
            },
        }
    }
}

/// Resolves whatever the model returned into at most `MAX_SUGGESTIONS`
/// suggestions. Unusable elements are skipped.
pub fn parse_suggestions(raw: Value) -> Vec<RoleSuggestion> {
    SuggestionPayload::classify(raw)
        .into_items()
        .into_iter()
        .filter_map(|item| serde_json::from_value::<SuggestionItem>(item).ok())
        .map(RoleSuggestion::from)
        .filter(|s| !s.role.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Reads generated role detail. A missing or blank description means the
/// generation failed.
pub fn parse_role_detail(raw: Value) -> Option<RoleDetail> {
    if !raw.is_object() {
        return None;
    }
    serde_json::from_value::<RoleDetail>(raw)
        .ok()
        .filter(|detail| !detail.description.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field readers
// ────────────────────────────────────────────────────────────────────────────

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|s| s.is_finite()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    })
}

fn lenient_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
