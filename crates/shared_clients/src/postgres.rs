use crate::{AsyncWarehouseAdapter, DatabaseAdapterError};
use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, Error, NoTls};

impl From<Error> for DatabaseAdapterError {
    #[track_caller]
    fn from(err: Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            match *db_err.code() {
                SqlState::CONNECTION_DOES_NOT_EXIST => {
                    DatabaseAdapterError::invalid_connection(db_err.to_string())
                }
                SqlState::SYNTAX_ERROR => DatabaseAdapterError::syntax(db_err.to_string()),
                SqlState::IO_ERROR => {
                    DatabaseAdapterError::from(std::io::Error::other(db_err.to_string()))
                }
                _ => DatabaseAdapterError::unexpected(db_err.to_string()),
            }
        } else {
            DatabaseAdapterError::unexpected(err.to_string())
        }
    }
}

/// Warehouse adapter over a single tokio-postgres connection. Redshift
/// speaks the Postgres wire protocol, so the same client covers both.
pub struct PostgresAdapter {
    client: Client,
    _driver: tokio::task::JoinHandle<()>, // keeps the connection task alive
}

impl PostgresAdapter {
    /// Connect, spawning the connection driver in the background.
    pub async fn new(
        host: &str,
        port: u16,
        db: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, DatabaseAdapterError> {
        let conn_str = format!(
            "host={} port={} user={} password={} dbname={}",
            host, port, user, password, db
        );
        let (client, connection) = tokio_postgres::connect(&conn_str, NoTls).await?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("postgres driver task exited: {e}");
            }
        });

        Ok(Self {
            client,
            _driver: driver,
        })
    }
}

#[async_trait]
impl AsyncWarehouseAdapter for PostgresAdapter {
    async fn execute(&mut self, sql: &str) -> Result<(), DatabaseAdapterError> {
        // batch_execute runs outside an explicit transaction: each
        // statement commits on its own, which is the lifecycle the
        // orchestrator's drop-then-create recovery story assumes.
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    async fn query_scalar(&self, sql: &str) -> Result<i64, DatabaseAdapterError> {
        let row = self.client.query_one(sql, &[]).await?;
        // COUNT(*) comes back as int8 but a boolean cast arrives as int4;
        // accept either width.
        if let Ok(value) = row.try_get::<_, i64>(0) {
            return Ok(value);
        }
        row.try_get::<_, i32>(0)
            .map(i64::from)
            .map_err(|e| DatabaseAdapterError::result(e.to_string()))
    }
}
