use crate::loader::BulkLoader;
use crate::quality::QualityGate;
use crate::transform::TransformEngine;
use crate::ExecutorError;
use catalog::SchemaCatalog;
use shared_clients::AsyncWarehouse;
use tracing::info;

/// Where a run has got to. Linear, no branching: a failure leaves the
/// warehouse in whatever state the last successful step reached, and
/// re-running from the start is the only recovery path. That re-run is
/// safe because Drop then Create is always the first pair of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// External staging has deposited CSV objects; nothing executed yet.
    Staged,
    Dropped,
    Created,
    Loaded,
    Validated,
    Populated,
    Done,
}

/// Sequences one full-refresh run: drop all, create all, copy all,
/// quality-check, populate all. Owns the single warehouse connection for
/// the duration; each statement commits on its own, so there is no
/// automatic rollback of a partially completed phase.
pub struct Pipeline {
    catalog: SchemaCatalog,
    adapter: AsyncWarehouse,
    state: RunState,
}

impl Pipeline {
    pub fn new(catalog: SchemaCatalog, adapter: AsyncWarehouse) -> Self {
        Self {
            catalog,
            adapter,
            state: RunState::Staged,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the pipeline to completion, consuming it so the connection is
    /// released on success and failure paths alike.
    pub async fn run(mut self) -> Result<RunState, ExecutorError> {
        self.advance().await.map(|_| self.state)
    }

    async fn advance(&mut self) -> Result<(), ExecutorError> {
        info!("dropping warehouse tables");
        for statement in self.catalog.drop_statements() {
            self.adapter.execute(&statement).await?;
        }
        self.state = RunState::Dropped;

        info!("creating warehouse tables");
        for statement in self.catalog.create_statements() {
            self.adapter.execute(&statement).await?;
        }
        self.state = RunState::Created;

        info!("bulk loading staged objects");
        BulkLoader::run(&mut self.adapter, &self.catalog).await?;
        self.state = RunState::Loaded;

        info!("checking quality of staged data");
        QualityGate::run(&self.adapter, &self.catalog).await?;
        self.state = RunState::Validated;

        info!("populating dimension and fact tables");
        TransformEngine::run(&mut self.adapter, &self.catalog).await?;
        self.state = RunState::Populated;

        self.state = RunState::Done;
        info!("pipeline run complete");
        Ok(())
    }
}
