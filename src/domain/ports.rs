use crate::domain::model::{AnalysisReport, RawDocument, Script};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// A fixed, indexable collection of candidate screenplays.
pub trait DocumentSource: Send + Sync {
    /// Stable identifiers for every candidate document.
    fn document_ids(&self) -> &[String];

    /// Converts one document. `Err(UnparsableDocument)` means "skip it".
    fn load(&self, id: &str) -> Result<RawDocument>;
}

pub trait ConfigProvider: Send + Sync {
    fn scripts_dir(&self) -> &str;
    fn male_names_path(&self) -> &str;
    fn female_names_path(&self) -> &str;
    fn num_scripts(&self) -> usize;
    fn name_tolerance_ratio(&self) -> f64;
    fn minimum_interactions(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn extra_male_tags(&self) -> &[String] {
        &[]
    }
    fn extra_female_tags(&self) -> &[String] {
        &[]
    }
}

#[async_trait]
pub trait AnalysisPipeline: Send + Sync {
    async fn collect(&self) -> Result<Vec<Script>>;
    async fn classify(&self, scripts: Vec<Script>) -> Result<AnalysisReport>;
    async fn report(&self, report: AnalysisReport) -> Result<String>;
}
