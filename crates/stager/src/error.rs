use common::error::diagnostics::DiagnosticMessage;
use shared_clients::blob::BlobStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagerError {
    #[error("upstream fetch failed: {context}")]
    Fetch {
        context: DiagnosticMessage,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("response decode failed: {context}")]
    Decode { context: DiagnosticMessage },
    #[error("parquet conversion failed: {context}")]
    Parquet {
        context: DiagnosticMessage,
        #[source]
        source: parquet::errors::ParquetError,
    },
    #[error(transparent)]
    Store(#[from] BlobStoreError),
}

impl StagerError {
    #[track_caller]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            context: DiagnosticMessage::new(message.into()),
            source: None,
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            context: DiagnosticMessage::new(message.into()),
        }
    }
}

impl From<reqwest::Error> for StagerError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        StagerError::Fetch {
            context: DiagnosticMessage::new(message),
            source: Some(err),
        }
    }
}

impl From<parquet::errors::ParquetError> for StagerError {
    #[track_caller]
    fn from(err: parquet::errors::ParquetError) -> Self {
        let message = err.to_string();
        StagerError::Parquet {
            context: DiagnosticMessage::new(message),
            source: err,
        }
    }
}

impl From<csv::Error> for StagerError {
    #[track_caller]
    fn from(err: csv::Error) -> Self {
        StagerError::decode(err.to_string())
    }
}
