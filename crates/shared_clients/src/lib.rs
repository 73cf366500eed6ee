pub mod blob;
pub mod postgres;

use crate::postgres::PostgresAdapter;
use async_trait::async_trait;
use common::config::WarehouseConnection;
use common::error::diagnostics::DiagnosticMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseAdapterError {
    #[error("invalid connection details: {context}")]
    InvalidConnectionError { context: DiagnosticMessage },
    #[error("SQL syntax error: {context}")]
    SyntaxError { context: DiagnosticMessage },
    #[error("unexpected database error: {context}")]
    UnexpectedError { context: DiagnosticMessage },
    #[error("I/O error: {context}")]
    IoError {
        context: DiagnosticMessage,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected result shape: {context}")]
    ResultError { context: DiagnosticMessage },
}

impl DatabaseAdapterError {
    #[track_caller]
    pub fn invalid_connection(message: impl Into<String>) -> Self {
        Self::InvalidConnectionError {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::SyntaxError {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedError {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn result(message: impl Into<String>) -> Self {
        Self::ResultError {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

impl From<std::io::Error> for DatabaseAdapterError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        let message = err.to_string();
        DatabaseAdapterError::IoError {
            context: DiagnosticMessage::new(message),
            source: err,
        }
    }
}

/// The surface the pipeline needs from a warehouse: run a statement to
/// completion (server-confirmed, autocommit) and fetch a single scalar.
#[async_trait]
pub trait AsyncWarehouseAdapter: Send + Sync {
    async fn execute(&mut self, sql: &str) -> Result<(), DatabaseAdapterError>;

    /// Run a query whose result is a single row with a single numeric
    /// column, as the quality predicates produce.
    async fn query_scalar(&self, sql: &str) -> Result<i64, DatabaseAdapterError>;
}

pub type AsyncWarehouse = Box<dyn AsyncWarehouseAdapter + Send + Sync + 'static>;

pub async fn connect_warehouse(
    conn: &WarehouseConnection,
) -> Result<AsyncWarehouse, DatabaseAdapterError> {
    Ok(Box::new(
        PostgresAdapter::new(
            &conn.host,
            conn.port,
            &conn.database,
            &conn.user,
            &conn.password,
        )
        .await?,
    ))
}
