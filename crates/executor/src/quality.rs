use crate::ExecutorError;
use catalog::SchemaCatalog;
use shared_clients::AsyncWarehouse;
use tracing::info;

/// Runs every catalog quality predicate and requires each scalar result to
/// be zero. The first non-zero result aborts the run before any transform
/// executes, reporting the failing check's index, name, and observed value.
pub struct QualityGate;

impl QualityGate {
    pub async fn run(
        adapter: &AsyncWarehouse,
        catalog: &SchemaCatalog,
    ) -> Result<(), ExecutorError> {
        for (position, check) in catalog.quality_checks().iter().enumerate() {
            let index = position + 1;
            let observed = adapter.query_scalar(&check.statement).await?;
            if observed != 0 {
                return Err(ExecutorError::QualityCheckFailed {
                    index,
                    name: check.name,
                    observed,
                });
            }
            info!(index, name = check.name, "quality check passed");
        }
        Ok(())
    }
}
