use std::sync::Arc;

use crate::roles::store::RoleStore;
use crate::roles::suggest::RoleSuggester;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Role detail cache. Production: `PgRoleStore` over the process-wide pool.
    pub roles: Arc<dyn RoleStore>,
    /// Production: `LlmRoleSuggester`.
    pub suggester: Arc<dyn RoleSuggester>,
}
