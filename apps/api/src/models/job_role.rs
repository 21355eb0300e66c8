use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use tracing::debug;

/// Raw `job_roles` row. List-valued columns hold JSON array text.
#[derive(Debug, Clone, FromRow)]
pub struct JobRoleRow {
    pub role_name: String,
    pub description: String,
    pub tech_stack: Option<String>,
    pub resume_keywords: Option<String>,
    pub project_ideas: Option<String>,
    pub roadmap_link: Option<String>,
}

/// A persisted role with its list columns decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRole {
    pub role_name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub resume_keywords: Vec<String>,
    pub project_ideas: Vec<ProjectIdea>,
    pub roadmap_link: Option<String>,
}

impl From<JobRoleRow> for JobRole {
    fn from(row: JobRoleRow) -> Self {
        JobRole {
            role_name: row.role_name,
            description: row.description,
            tech_stack: decode_list(row.tech_stack.as_deref()),
            resume_keywords: decode_list(row.resume_keywords.as_deref()),
            project_ideas: decode_list(row.project_ideas.as_deref()),
            roadmap_link: row.roadmap_link,
        }
    }
}

/// A project idea as generated: either a bare title or an object with a
/// `title` plus whatever else the model produced (kept verbatim).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectIdea {
    Title(String),
    Detailed(DetailedIdea),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedIdea {
    pub title: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ProjectIdea {
    pub fn title(&self) -> &str {
        match self {
            ProjectIdea::Title(title) => title,
            ProjectIdea::Detailed(idea) => &idea.title,
        }
    }
}

/// Lookup key for role names: surrounding whitespace dropped, lower-cased.
pub fn normalize_role_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Serializes a list for storage in a text column.
pub fn encode_list<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Reads a list back from a text column.
/// Absent, blank or malformed content yields an empty list; elements that do
/// not decode as `T` are dropped.
pub fn decode_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Ok(other) => {
            debug!("Stored list column is not an array: {other}");
            Vec::new()
        }
        Err(e) => {
            debug!("Stored list column is not valid JSON: {e}");
            Vec::new()
        }
    }
}
