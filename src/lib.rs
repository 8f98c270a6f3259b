pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::run_analysis;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    bechdel::BechdelClassifier,
    corpus::{CorpusBuilder, CorpusSettings, SamplingOrder},
    dialogue::DialogueExtractor,
    engine::{AnalysisEngine, RunOutcome},
    layout::{LayoutClassifier, NameIndentSet},
    lexicon::Lexicon,
    pipeline::ScreenplayPipeline,
};
pub use domain::model::{ClassificationResult, DialogueEntry, Script};
pub use utils::error::{BechdelError, Result};
