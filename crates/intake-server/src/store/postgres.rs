//! PostgreSQL contact store

use async_trait::async_trait;
use intake_common::{NewContact, SchemaError, StoreError};
use sqlx::PgPool;

use super::ContactStore;
use crate::config::DatabaseConfig;
use crate::db::{self, DbResult};

/// Table definition; `IF NOT EXISTS` keeps it safe to run on every start
const CREATE_CONTACTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id BIGSERIAL PRIMARY KEY,
        first_name VARCHAR(50) NOT NULL,
        second_name VARCHAR(50) NOT NULL,
        email TEXT NOT NULL,
        phone VARCHAR(20) NOT NULL,
        eircode VARCHAR(10) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const INSERT_CONTACT: &str = r#"
    INSERT INTO contacts (first_name, second_name, email, phone, eircode)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

/// Contact store backed by a PostgreSQL connection pool
#[derive(Clone, Debug)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a bounded pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = db::create_pool(config).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    #[tracing::instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), SchemaError> {
        sqlx::query(CREATE_CONTACTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| SchemaError::new(e.to_string()))?;

        tracing::debug!("Contacts table ready");
        Ok(())
    }

    #[tracing::instrument(skip(self, contact))]
    async fn insert(&self, contact: &NewContact) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(INSERT_CONTACT)
            .bind(&contact.first_name)
            .bind(&contact.second_name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(&contact.eircode)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::new(e.to_string()))?;

        tracing::debug!(contact_id = id, "Contact inserted");
        Ok(id)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::new(e.to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::new(e.to_string()))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
