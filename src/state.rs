use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url())
            .await
            .context("connect to database")?;
        Ok(Self { db, config })
    }

    /// State over a lazy pool that never actually connects. Handler paths
    /// that fail before touching the store can be exercised with this.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            db_host: "localhost".into(),
            db_name: "ziver_test".into(),
            db_user: "postgres".into(),
            db_password: "postgres".into(),
        });
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url())
            .expect("lazy pool ok");
        Self { db, config }
    }
}
