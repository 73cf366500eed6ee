//! Declarative schema catalog for the trip/weather warehouse.
//!
//! Pure data: ordered statement lists for creating and dropping the schema,
//! copy bindings for the bulk loader, quality predicates for the gate, and
//! the populate statements the transform engine runs. Nothing in here
//! touches a connection.

mod copy;
mod populate;
mod quality;
mod tables;

pub use copy::CopyBinding;
pub use quality::QualityCheck;

use common::config::PipelineConfig;

/// The slice of run configuration the catalog renders statements from.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub city: String,
    pub window_label: String,
    /// Hourly observations a complete window should contain (24 per day).
    pub expected_observations: i64,
    pub timezone: String,
}

impl CatalogConfig {
    pub fn from_pipeline(config: &PipelineConfig) -> Self {
        Self {
            bucket: config.storage.bucket.clone(),
            region: config.storage.region.clone(),
            access_key_id: config.storage.access_key_id.clone(),
            secret_access_key: config.storage.secret_access_key.clone(),
            city: config.run.city.clone(),
            window_label: config.run.label(),
            expected_observations: config.run.num_days() * 24,
            timezone: config.run.timezone.clone(),
        }
    }
}

pub struct SchemaCatalog {
    config: CatalogConfig,
}

impl SchemaCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// DDL in dependency order: staging, dimensions, facts. The derived
    /// view is created by the last populate statement, once its inputs
    /// hold data.
    pub fn create_statements(&self) -> Vec<String> {
        tables::CREATE_TABLE_STATEMENTS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Reverse dependency order, view first.
    pub fn drop_statements(&self) -> Vec<String> {
        tables::DROP_STATEMENTS.iter().map(|s| s.to_string()).collect()
    }

    pub fn copy_bindings(&self) -> Vec<CopyBinding> {
        copy::bindings(&self.config)
    }

    pub fn quality_checks(&self) -> Vec<QualityCheck> {
        quality::checks(&self.config)
    }

    pub fn populate_statements(&self) -> Vec<String> {
        populate::statements(&self.config)
    }
}
