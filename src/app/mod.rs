// Application layer: wires adapters, config and the engine into one run.

use crate::adapters::{load_lexicon, DirectorySource};
use crate::config::cli::LocalStorage;
use crate::core::engine::{AnalysisEngine, RunOutcome};
use crate::core::pipeline::ScreenplayPipeline;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads the lexicon, indexes the script directory and runs every phase.
pub async fn run_analysis<C: ConfigProvider>(config: C, monitor_enabled: bool) -> Result<RunOutcome> {
    let lexicon = Arc::new(load_lexicon(&config)?);
    let source = DirectorySource::open(config.scripts_dir())?;
    let storage = LocalStorage::new(config.output_path());

    let pipeline = ScreenplayPipeline::new(storage, source, config, lexicon);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await
}
