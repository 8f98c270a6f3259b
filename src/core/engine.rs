use crate::core::AnalysisPipeline;
use crate::domain::model::CorpusSummary;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct AnalysisEngine<P: AnalysisPipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub summary: CorpusSummary,
}

impl<P: AnalysisPipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🎬 Starting screenplay analysis");

        // Collect
        let scripts = self.pipeline.collect().await?;
        tracing::info!("📚 Collected {} scripts", scripts.len());
        self.monitor.mark("collect");

        // Classify
        let report = self.pipeline.classify(scripts).await?;
        tracing::info!("🔎 Classified {} scripts", report.verdicts.len());
        self.monitor.mark("classify");

        // Report
        let summary = report.summary.clone();
        let output_path = self.pipeline.report(report).await?;
        tracing::info!("💾 Report saved to: {}", output_path);
        self.monitor.mark("report");

        self.monitor.log_final_stats();

        Ok(RunOutcome {
            output_path,
            summary,
        })
    }
}
