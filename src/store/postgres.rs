use super::{AnswerRecord, AnswerStore};
use crate::config::PostgresConfig;
use crate::error::Error;
use async_trait::async_trait;
use deadpool_postgres::{Pool, Runtime};
use tokio_postgres::NoTls;
use tracing::info;

/// Postgres-backed implementation of the narrow store contract.
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Build the pool and verify connectivity with a single checkout.
    pub async fn connect(cfg: &PostgresConfig) -> Result<Self, Error> {
        let mut pool_cfg = deadpool_postgres::Config::new();
        pool_cfg.url = Some(cfg.url.clone());
        pool_cfg.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        let pool = pool_cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| Error::Database(format!("pool creation failed: {e}")))?;

        let _client = pool
            .get()
            .await
            .map_err(|e| Error::Database(format!("connection test failed: {e}")))?;

        info!("database connection established");

        Ok(Self { pool })
    }
}

#[async_trait]
impl AnswerStore for PostgresStore {
    async fn answers_by_session(&self, session_id: &str) -> Result<Vec<AnswerRecord>, Error> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = client
            .query(
                "SELECT id, question_id, session_id, minio_filename \
                 FROM answers WHERE session_id = $1 ORDER BY id",
                &[&session_id],
            )
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let answers = rows
            .iter()
            .map(|row| AnswerRecord {
                id: row.get(0),
                question_id: row.get(1),
                session_id: row.get(2),
                object_key: row.get(3),
            })
            .collect();

        Ok(answers)
    }

    async fn question_text(&self, question_id: i32) -> Result<String, Error> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let row = client
            .query_opt(
                "SELECT question_text FROM questions WHERE id = $1",
                &[&question_id],
            )
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        match row {
            Some(row) => Ok(row.get(0)),
            None => Err(Error::NotFound(format!("question {question_id}"))),
        }
    }
}
