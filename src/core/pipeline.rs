use crate::core::corpus::{classify_corpus, CorpusBuilder, CorpusSettings, SamplingOrder};
use crate::core::lexicon::Lexicon;
use crate::core::{AnalysisPipeline, AnalysisReport, ConfigProvider, DocumentSource, Script, Storage};
use crate::domain::model::{ClassificationResult, CorpusSummary};
use crate::utils::error::Result;
use std::sync::Arc;

pub const SUMMARY_FILE: &str = "summary.json";
pub const SCRIPTS_FILE: &str = "scripts.csv";

/// Screenplay directory → corpus → Bechdel report.
pub struct ScreenplayPipeline<S: Storage, D: DocumentSource, C: ConfigProvider> {
    storage: S,
    source: D,
    config: C,
    lexicon: Arc<Lexicon>,
    order: SamplingOrder,
}

impl<S: Storage, D: DocumentSource, C: ConfigProvider> ScreenplayPipeline<S, D, C> {
    pub fn new(storage: S, source: D, config: C, lexicon: Arc<Lexicon>) -> Self {
        let order = SamplingOrder::from_seed(config.seed());
        Self {
            storage,
            source,
            config,
            lexicon,
            order,
        }
    }

    /// Replaces the draw order, e.g. with a fixed permutation for replay.
    pub fn with_order(mut self, order: SamplingOrder) -> Self {
        self.order = order;
        self
    }

    pub fn settings(&self) -> CorpusSettings {
        CorpusSettings {
            num_scripts: self.config.num_scripts(),
            name_tolerance_ratio: self.config.name_tolerance_ratio(),
            minimum_interactions: self.config.minimum_interactions(),
        }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

/// Renders the ratios the way the analysis has always printed them.
pub fn format_statistics(summary: &CorpusSummary) -> String {
    let parts: Vec<String> = ClassificationResult::ALL
        .iter()
        .map(|result| {
            let ratio = match result {
                ClassificationResult::Pass => summary.ratios.pass,
                ClassificationResult::FailStage1 => summary.ratios.fail_stage1,
                ClassificationResult::FailStage2 => summary.ratios.fail_stage2,
                ClassificationResult::FailStage3 => summary.ratios.fail_stage3,
            };
            format!("'{}': {}", result.label(), ratio)
        })
        .collect();
    format!("{{{}}}", parts.join(", "))
}

#[async_trait::async_trait]
impl<S: Storage, D: DocumentSource, C: ConfigProvider> AnalysisPipeline
    for ScreenplayPipeline<S, D, C>
{
    async fn collect(&self) -> Result<Vec<Script>> {
        let settings = self.settings();
        tracing::info!(
            "📂 Sampling up to {} scripts from {} candidates in {}",
            settings.num_scripts,
            self.source.document_ids().len(),
            self.config.scripts_dir()
        );

        let corpus = CorpusBuilder::new(&self.source, &self.lexicon, &settings).build(&self.order);

        tracing::debug!("Sampling stats: {:?}", corpus.stats);
        Ok(corpus.scripts)
    }

    async fn classify(&self, scripts: Vec<Script>) -> Result<AnalysisReport> {
        let report = classify_corpus(&self.lexicon, &scripts, self.config.num_scripts());

        for verdict in &report.verdicts {
            tracing::debug!(
                "{} ({} entries): {}",
                verdict.title,
                verdict.entries,
                verdict.classification
            );
        }
        tracing::info!("📈 {}", format_statistics(&report.summary));

        Ok(report)
    }

    async fn report(&self, report: AnalysisReport) -> Result<String> {
        if self.wants("json") {
            let json = serde_json::to_vec_pretty(&report.summary)?;
            self.storage.write_file(SUMMARY_FILE, &json).await?;
            tracing::debug!("Wrote {}", SUMMARY_FILE);
        }

        if self.wants("csv") {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for verdict in &report.verdicts {
                writer.serialize(verdict)?;
            }
            let data = writer
                .into_inner()
                .map_err(|e| crate::utils::error::BechdelError::ProcessingError {
                    message: format!("Failed to flush CSV report: {}", e),
                })?;
            self.storage.write_file(SCRIPTS_FILE, &data).await?;
            tracing::debug!("Wrote {}", SCRIPTS_FILE);
        }

        Ok(self.config.output_path().to_string())
    }
}
