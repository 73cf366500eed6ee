use catalog::{CatalogConfig, SchemaCatalog};
use common::config::loader::read_config;
use common::error::PipelineError;
use executor::pipeline::Pipeline;
use shared_clients::connect_warehouse;
use std::path::PathBuf;
use tracing::info;

/// Full-refresh the warehouse from whatever the staging step last
/// deposited: drop, create, copy, quality-check, populate.
pub fn handle_run(config_path: Option<PathBuf>) -> Result<(), PipelineError> {
    let config = read_config(config_path).map_err(PipelineError::init)?;
    let catalog = SchemaCatalog::new(CatalogConfig::from_pipeline(&config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(PipelineError::init)?;

    runtime.block_on(async {
        let adapter = connect_warehouse(&config.warehouse)
            .await
            .map_err(PipelineError::init)?;
        let state = Pipeline::new(catalog, adapter)
            .run()
            .await
            .map_err(PipelineError::run)?;
        info!(?state, "warehouse refresh complete");
        Ok(())
    })
}
