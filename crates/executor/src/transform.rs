use crate::ExecutorError;
use catalog::SchemaCatalog;
use common::diag;
use shared_clients::AsyncWarehouse;
use tracing::info;

/// Runs the catalog's populate statements strictly in order: time
/// dimension, taxi facts, weather facts, then the nearest-timestamp view.
/// Each statement is a self-contained bulk transformation; must run only
/// after the quality gate has passed.
pub struct TransformEngine;

impl TransformEngine {
    pub async fn run(
        adapter: &mut AsyncWarehouse,
        catalog: &SchemaCatalog,
    ) -> Result<(), ExecutorError> {
        for (position, statement) in catalog.populate_statements().iter().enumerate() {
            info!(step = position + 1, "running transform statement");
            adapter
                .execute(statement)
                .await
                .map_err(|e| ExecutorError::TransformFailed {
                    context: diag!("populate step {}: {e}", position + 1),
                    source: Some(Box::new(e)),
                })?;
        }
        Ok(())
    }
}
