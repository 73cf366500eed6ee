use common::config::loader::read_config;
use common::error::PipelineError;
use shared_clients::blob::BlobStore;
use stager::Stager;
use std::path::PathBuf;

/// Fetch the window's weather and trip data from upstream and deposit it
/// in the blob store under the prefixes the warehouse copies from.
pub fn handle_stage(config_path: Option<PathBuf>) -> Result<(), PipelineError> {
    let config = read_config(config_path).map_err(PipelineError::init)?;
    let store = BlobStore::amazon(&config.storage).map_err(PipelineError::init)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(PipelineError::init)?;

    runtime.block_on(async {
        Stager::new(&config, store)
            .stage_all()
            .await
            .map_err(PipelineError::stage)
    })
}
