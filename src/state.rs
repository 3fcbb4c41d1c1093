use crate::config::AppConfig;
use crate::students::{MemoryStudentStore, PgStudentStore, StudentStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database_url {
            Some(url) => {
                let pg = PgStudentStore::connect(url, config.max_connections).await?;
                tracing::info!("using postgres student store");
                Arc::new(pg) as Arc<dyn StudentStore>
            }
            None => {
                tracing::warn!("DATABASE_URL not set; students are kept in memory only");
                Arc::new(MemoryStudentStore::new()) as Arc<dyn StudentStore>
            }
        };

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn StudentStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(MemoryStudentStore::new()),
            Arc::new(AppConfig::default()),
        )
    }
}
