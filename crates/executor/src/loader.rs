use crate::ExecutorError;
use catalog::SchemaCatalog;
use common::diag;
use shared_clients::AsyncWarehouse;
use tracing::info;

/// Issues one bulk COPY per catalog binding, appending every CSV object
/// under the binding's prefix into its staging table.
///
/// Not idempotent on its own: re-running appends duplicates. The
/// orchestrator's drop-then-create sequencing is what makes the whole run
/// idempotent. Any engine load error (missing or malformed source data)
/// is fatal; there is no partial-load recovery.
pub struct BulkLoader;

impl BulkLoader {
    pub async fn run(
        adapter: &mut AsyncWarehouse,
        catalog: &SchemaCatalog,
    ) -> Result<(), ExecutorError> {
        for binding in catalog.copy_bindings() {
            info!(table = binding.table, prefix = %binding.prefix, "copying staged objects");
            adapter
                .execute(&binding.statement(catalog.config()))
                .await
                .map_err(|e| ExecutorError::LoadFailed {
                    context: diag!("COPY into {} from '{}': {e}", binding.table, binding.prefix),
                    source: Some(Box::new(e)),
                })?;
        }
        Ok(())
    }
}
