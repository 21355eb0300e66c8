//! In-memory collaborators for orchestrator and HTTP tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map};

use crate::errors::AppError;
use crate::models::job_role::{normalize_role_name, DetailedIdea, JobRole, ProjectIdea};
use crate::roles::store::RoleStore;
use crate::roles::suggest::{RoleDetail, RoleSuggester, RoleSuggestion};

#[derive(Default)]
pub struct InMemoryRoleStore {
    roles: Mutex<Vec<JobRole>>,
}

impl InMemoryRoleStore {
    pub fn with_roles(roles: Vec<JobRole>) -> Self {
        Self {
            roles: Mutex::new(roles),
        }
    }

    pub fn len(&self) -> usize {
        self.roles.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<JobRole>, AppError> {
        let key = normalize_role_name(name);
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| normalize_role_name(&r.role_name) == key)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<JobRole>, AppError> {
        let mut roles = self.roles.lock().unwrap().clone();
        roles.sort_by(|a, b| a.role_name.cmp(&b.role_name));
        Ok(roles)
    }

    async fn insert(&self, role: &JobRole) -> Result<(), AppError> {
        let mut role = role.clone();
        role.role_name = role.role_name.trim().to_string();
        self.roles.lock().unwrap().push(role);
        Ok(())
    }
}

/// Store whose database is unreachable: lookups miss or fail, writes fail.
pub struct FailingRoleStore {
    fail_lookups: bool,
}

impl FailingRoleStore {
    pub fn on_lookup() -> Self {
        Self { fail_lookups: true }
    }

    /// Lookups report a miss; the write after generation fails.
    pub fn on_insert() -> Self {
        Self {
            fail_lookups: false,
        }
    }
}

#[async_trait]
impl RoleStore for FailingRoleStore {
    async fn find_by_name(&self, _name: &str) -> Result<Option<JobRole>, AppError> {
        if self.fail_lookups {
            return Err(AppError::Store(sqlx::Error::PoolTimedOut));
        }
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<JobRole>, AppError> {
        Err(AppError::Store(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _role: &JobRole) -> Result<(), AppError> {
        Err(AppError::Store(sqlx::Error::PoolClosed))
    }
}

/// Returns canned suggestions and per-role detail; records what was asked.
pub struct ScriptedSuggester {
    suggestions: Option<Vec<RoleSuggestion>>,
    details: HashMap<String, RoleDetail>,
    described: Mutex<Vec<String>>,
    suggest_calls: AtomicUsize,
}

impl ScriptedSuggester {
    pub fn new(suggestions: Vec<RoleSuggestion>) -> Self {
        Self {
            suggestions: Some(suggestions),
            details: HashMap::new(),
            described: Mutex::new(Vec::new()),
            suggest_calls: AtomicUsize::new(0),
        }
    }

    /// A suggester whose provider call always fails.
    pub fn failing() -> Self {
        Self {
            suggestions: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_detail(mut self, role: &str, detail: RoleDetail) -> Self {
        self.details.insert(normalize_role_name(role), detail);
        self
    }

    pub fn described(&self) -> Vec<String> {
        self.described.lock().unwrap().clone()
    }

    pub fn suggest_calls(&self) -> usize {
        self.suggest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleSuggester for ScriptedSuggester {
    async fn suggest_roles(&self, _skills: &[String]) -> Result<Vec<RoleSuggestion>, AppError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        self.suggestions
            .clone()
            .ok_or_else(|| AppError::Provider("API error (status 529): overloaded".to_string()))
    }

    async fn describe_role(&self, role_name: &str) -> Option<RoleDetail> {
        self.described.lock().unwrap().push(role_name.to_string());
        self.details.get(&normalize_role_name(role_name)).cloned()
    }
}

pub fn sample_role(name: &str, description: &str) -> JobRole {
    let mut details = Map::new();
    details.insert("description".to_string(), json!("Background workers over Redis"));
    JobRole {
        role_name: name.to_string(),
        description: description.to_string(),
        tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        resume_keywords: vec!["REST".to_string(), "microservices".to_string()],
        project_ideas: vec![
            ProjectIdea::Title("REST API".to_string()),
            ProjectIdea::Detailed(DetailedIdea {
                title: "Job queue".to_string(),
                details,
            }),
        ],
        roadmap_link: Some("https://roadmap.sh/backend".to_string()),
    }
}

pub fn sample_detail(description: &str) -> RoleDetail {
    let mut details = Map::new();
    details.insert("description".to_string(), json!("Kafka into a warehouse"));
    RoleDetail {
        description: description.to_string(),
        tech_stack: vec!["Python".to_string(), "Airflow".to_string()],
        resume_keywords: vec!["ETL".to_string(), "data modeling".to_string()],
        project_ideas: vec![ProjectIdea::Detailed(DetailedIdea {
            title: "Streaming ETL".to_string(),
            details,
        })],
        roadmap_link: Some("https://roadmap.sh/data-engineer".to_string()),
    }
}
