use std::sync::Arc;

use stockkeep_infra::{
    AppConfig, InMemoryInventoryRepository, InventoryRepository, PostgresInventoryRepository,
    RepositoryError,
};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    repository: Arc<dyn InventoryRepository>,
}

impl AppServices {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &dyn InventoryRepository {
        self.repository.as_ref()
    }
}

/// Open the repository selected by `config`.
///
/// With `DATABASE_URL` set this connects to Postgres and creates the table if
/// needed; otherwise records live in process memory only.
pub async fn build_repository(
    config: &AppConfig,
) -> Result<Arc<dyn InventoryRepository>, RepositoryError> {
    match &config.database {
        Some(db) => {
            let repo = PostgresInventoryRepository::connect(db).await?;
            repo.init_schema().await?;
            Ok(Arc::new(repo))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory inventory store");
            Ok(Arc::new(InMemoryInventoryRepository::new()))
        }
    }
}
