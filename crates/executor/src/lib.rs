pub mod loader;
pub mod pipeline;
pub mod quality;
pub mod transform;

pub use pipeline::{Pipeline, RunState};

use common::error::diagnostics::DiagnosticMessage;
use shared_clients::DatabaseAdapterError;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("bulk load failed: {context}")]
    LoadFailed {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
    #[error("quality check {index} ({name}) failed: found {observed} instead of 0")]
    QualityCheckFailed {
        /// 1-based position of the check in the catalog's list.
        index: usize,
        name: &'static str,
        observed: i64,
    },
    #[error("transform failed: {context}")]
    TransformFailed {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
    #[error("statement failed: {context}")]
    FailedToExecute {
        context: DiagnosticMessage,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl ExecutorError {
    #[track_caller]
    pub fn load(message: impl Into<String>) -> Self {
        Self::LoadFailed {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    #[track_caller]
    pub fn transform(message: impl Into<String>) -> Self {
        Self::TransformFailed {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    #[track_caller]
    pub fn failed_to_execute(message: impl Into<String>) -> Self {
        Self::FailedToExecute {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }
}

impl From<DatabaseAdapterError> for ExecutorError {
    #[track_caller]
    fn from(value: DatabaseAdapterError) -> Self {
        ExecutorError::FailedToExecute {
            context: DiagnosticMessage::new(value.to_string()),
            source: Some(Box::new(value)),
        }
    }
}
