use crate::config::components::PipelineConfig;
use crate::config::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "pipeline.yml";

/// Load the pipeline configuration. `config_path` points at the directory
/// holding `pipeline.yml`; when absent the current directory is used.
pub fn read_config(config_path: Option<PathBuf>) -> Result<PipelineConfig, ConfigError> {
    let file_path = match config_path {
        Some(dir) => dir.join(CONFIG_FILE),
        None => CONFIG_FILE.into(),
    };
    read_config_file(&file_path)
}

pub fn read_config_file(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let config: PipelineConfig = serde_yaml::from_reader(file)?;

    if config.run.end_date < config.run.start_date {
        return Err(ConfigError::Invalid(format!(
            "run window ends ({}) before it starts ({})",
            config.run.end_date, config.run.start_date
        )));
    }

    Ok(config)
}
