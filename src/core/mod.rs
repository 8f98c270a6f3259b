pub mod bechdel;
pub mod corpus;
pub mod dialogue;
pub mod engine;
pub mod layout;
pub mod lexicon;
pub mod pipeline;

pub use crate::domain::model::{AnalysisReport, ClassificationResult, DialogueEntry, Script};
pub use crate::domain::ports::{AnalysisPipeline, ConfigProvider, DocumentSource, Storage};
pub use crate::utils::error::Result;
