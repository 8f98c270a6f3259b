use serde::{Deserialize, Serialize};
use std::fmt;

/// A bold-styled text fragment, kept with its raw leading whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoldFragment {
    pub raw: String,
}

impl BoldFragment {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn indent(&self) -> usize {
        indent_of(&self.raw)
    }
}

/// Count of leading whitespace characters.
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// A screenplay after markup conversion.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub title: String,
    pub bold_fragments: Vec<BoldFragment>,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    pub speaker: String,
    pub utterance: String,
}

impl DialogueEntry {
    pub fn new(speaker: impl Into<String>, utterance: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            utterance: utterance.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub title: String,
    pub entries: Vec<DialogueEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationResult {
    Pass,
    FailStage1,
    FailStage2,
    FailStage3,
}

impl ClassificationResult {
    pub const ALL: [ClassificationResult; 4] = [
        ClassificationResult::Pass,
        ClassificationResult::FailStage1,
        ClassificationResult::FailStage2,
        ClassificationResult::FailStage3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClassificationResult::Pass => "Pass",
            ClassificationResult::FailStage1 => "Fail 1",
            ClassificationResult::FailStage2 => "Fail 2",
            ClassificationResult::FailStage3 => "Fail 3",
        }
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified script, as written to the per-script report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptVerdict {
    pub title: String,
    pub entries: usize,
    pub classification: ClassificationResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageCounts {
    pub pass: usize,
    pub fail_stage1: usize,
    pub fail_stage2: usize,
    pub fail_stage3: usize,
}

impl StageCounts {
    pub fn record(&mut self, result: ClassificationResult) {
        match result {
            ClassificationResult::Pass => self.pass += 1,
            ClassificationResult::FailStage1 => self.fail_stage1 += 1,
            ClassificationResult::FailStage2 => self.fail_stage2 += 1,
            ClassificationResult::FailStage3 => self.fail_stage3 += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail_stage1 + self.fail_stage2 + self.fail_stage3
    }
}

/// Fractions of the accepted corpus per outcome. All zero for an empty corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageRatios {
    pub pass: f64,
    pub fail_stage1: f64,
    pub fail_stage2: f64,
    pub fail_stage3: f64,
}

impl StageRatios {
    pub fn from_counts(counts: &StageCounts) -> Self {
        let total = counts.total();
        if total == 0 {
            return Self::default();
        }
        let ratio = |n: usize| n as f64 / total as f64;
        Self {
            pass: ratio(counts.pass),
            fail_stage1: ratio(counts.fail_stage1),
            fail_stage2: ratio(counts.fail_stage2),
            fail_stage3: ratio(counts.fail_stage3),
        }
    }

    pub fn sum(&self) -> f64 {
        self.pass + self.fail_stage1 + self.fail_stage2 + self.fail_stage3
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub requested_scripts: usize,
    pub total_scripts: usize,
    pub counts: StageCounts,
    pub ratios: StageRatios,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Output of the classify phase.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub verdicts: Vec<ScriptVerdict>,
    pub summary: CorpusSummary,
}
