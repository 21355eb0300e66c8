//! Store Accessor: typed access to the `job_roles` table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::job_role::{encode_list, normalize_role_name, JobRole, JobRoleRow};

/// Persistence seam for role details. `AppState` carries an `Arc<dyn RoleStore>`.
///
/// Rows are written once and never updated. `insert` performs no conflict
/// handling: callers only insert after a lookup miss.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Case-insensitive, whitespace-trimmed exact match on the role name.
    async fn find_by_name(&self, name: &str) -> Result<Option<JobRole>, AppError>;

    /// Every stored role, ascending by role name.
    async fn list_all(&self) -> Result<Vec<JobRole>, AppError>;

    async fn insert(&self, role: &JobRole) -> Result<(), AppError>;
}

/// `RoleStore` over the shared PostgreSQL pool.
#[derive(Clone)]
pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<JobRole>, AppError> {
        let row = sqlx::query_as::<_, JobRoleRow>(
            r#"
            SELECT role_name, description, tech_stack, resume_keywords,
                   project_ideas, roadmap_link
            FROM job_roles
            WHERE LOWER(TRIM(role_name)) = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(normalize_role_name(name))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(JobRole::from))
    }

    async fn list_all(&self) -> Result<Vec<JobRole>, AppError> {
        let rows = sqlx::query_as::<_, JobRoleRow>(
            r#"
            SELECT role_name, description, tech_stack, resume_keywords,
                   project_ideas, roadmap_link
            FROM job_roles
            ORDER BY role_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobRole::from).collect())
    }

    async fn insert(&self, role: &JobRole) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO job_roles
                (role_name, description, tech_stack, resume_keywords, project_ideas, roadmap_link)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(role.role_name.trim())
        .bind(&role.description)
        .bind(encode_list(&role.tech_stack))
        .bind(encode_list(&role.resume_keywords))
        .bind(encode_list(&role.project_ideas))
        .bind(role.roadmap_link.as_deref())
        .execute(&self.pool)
        .await?;

        info!("Stored details for role '{}'", role.role_name.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../sql/job_roles.sql");

    #[test]
    fn test_schema_uniqueness_matches_lookup_normalization() {
        let schema: String = SCHEMA.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(schema.contains(
            "CREATE UNIQUE INDEX IF NOT EXISTS job_roles_normalized_name_idx ON job_roles (LOWER(TRIM(role_name)))"
        ));
        assert!(!schema.contains("role_name TEXT NOT NULL UNIQUE"));
    }
}
