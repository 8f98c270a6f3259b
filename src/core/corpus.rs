use crate::core::bechdel::BechdelClassifier;
use crate::core::dialogue::DialogueExtractor;
use crate::core::layout::{LayoutClassifier, NameIndentSet, DEFAULT_NAME_TOLERANCE_RATIO};
use crate::core::lexicon::Lexicon;
use crate::domain::model::{
    AnalysisReport, CorpusSummary, RawDocument, Script, ScriptVerdict, StageCounts, StageRatios,
};
use crate::domain::ports::DocumentSource;
use crate::utils::error::BechdelError;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::HashSet;

pub const DEFAULT_MINIMUM_INTERACTIONS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSettings {
    pub num_scripts: usize,
    pub name_tolerance_ratio: f64,
    pub minimum_interactions: usize,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            num_scripts: 10,
            name_tolerance_ratio: DEFAULT_NAME_TOLERANCE_RATIO,
            minimum_interactions: DEFAULT_MINIMUM_INTERACTIONS,
        }
    }
}

/// Order in which documents are drawn from the source index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplingOrder {
    /// Index order, mostly for debugging a single directory.
    Sequential,
    /// Reproducible shuffle.
    Seeded(u64),
    /// Fresh shuffle per run.
    Random,
    /// Caller-supplied permutation. Out-of-range and repeated indices are ignored.
    Fixed(Vec<usize>),
}

impl SamplingOrder {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(SamplingOrder::Random, SamplingOrder::Seeded)
    }

    pub fn permutation(&self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        match self {
            SamplingOrder::Sequential => {}
            SamplingOrder::Seeded(seed) => indices.shuffle(&mut StdRng::seed_from_u64(*seed)),
            SamplingOrder::Random => indices.shuffle(&mut rand::thread_rng()),
            SamplingOrder::Fixed(order) => {
                let mut seen = HashSet::new();
                indices = order
                    .iter()
                    .copied()
                    .filter(|&i| i < len && seen.insert(i))
                    .collect();
            }
        }
        indices
    }
}

/// What happened to one drawn document.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    Accepted(Script),
    Rejected { id: String, entries: usize },
    Unparsable { id: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplingStats {
    pub drawn: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub unparsable: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub scripts: Vec<Script>,
    pub stats: SamplingStats,
}

impl Corpus {
    /// True when the source ran out before `num_scripts` were accepted.
    pub fn is_short(&self, settings: &CorpusSettings) -> bool {
        self.scripts.len() < settings.num_scripts
    }
}

/// Layout inference followed by dialogue extraction for one document.
pub fn extract_script(
    lexicon: &Lexicon,
    name_tolerance_ratio: f64,
    document: RawDocument,
) -> (NameIndentSet, Script) {
    let names = LayoutClassifier::new(lexicon, name_tolerance_ratio).classify(&document.bold_fragments);
    let entries = DialogueExtractor::new(lexicon, &names).extract(&document.lines);
    (
        names,
        Script {
            title: document.title,
            entries,
        },
    )
}

pub struct CorpusBuilder<'a, D: DocumentSource> {
    source: &'a D,
    lexicon: &'a Lexicon,
    settings: &'a CorpusSettings,
}

impl<'a, D: DocumentSource> CorpusBuilder<'a, D> {
    pub fn new(source: &'a D, lexicon: &'a Lexicon, settings: &'a CorpusSettings) -> Self {
        Self {
            source,
            lexicon,
            settings,
        }
    }

    pub fn process(&self, id: &str) -> DocumentOutcome {
        let document = match self.source.load(id) {
            Ok(document) => document,
            Err(BechdelError::UnparsableDocument { reason, .. }) => {
                return DocumentOutcome::Unparsable {
                    id: id.to_string(),
                    reason,
                }
            }
            Err(e) => {
                return DocumentOutcome::Unparsable {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        let (names, script) =
            extract_script(self.lexicon, self.settings.name_tolerance_ratio, document);
        tracing::debug!(
            "{}: name depths {:?}, {} dialogue entries",
            id,
            names.depths,
            script.entries.len()
        );

        if script.entries.len() > self.settings.minimum_interactions {
            DocumentOutcome::Accepted(script)
        } else {
            DocumentOutcome::Rejected {
                id: id.to_string(),
                entries: script.entries.len(),
            }
        }
    }

    /// Draws documents in `order` until `num_scripts` are accepted or the
    /// index is exhausted.
    pub fn build(&self, order: &SamplingOrder) -> Corpus {
        let ids = self.source.document_ids();
        let mut corpus = Corpus::default();

        for index in order.permutation(ids.len()) {
            if corpus.scripts.len() >= self.settings.num_scripts {
                break;
            }
            let id = &ids[index];
            corpus.stats.drawn += 1;

            match self.process(id) {
                DocumentOutcome::Accepted(script) => {
                    corpus.stats.accepted += 1;
                    tracing::info!(
                        "Parsed files = {}/{} ({})",
                        corpus.stats.accepted,
                        self.settings.num_scripts,
                        script.title
                    );
                    corpus.scripts.push(script);
                }
                DocumentOutcome::Rejected { id, entries } => {
                    corpus.stats.rejected += 1;
                    tracing::debug!(
                        "Rejected {}: {} entries (need more than {})",
                        id,
                        entries,
                        self.settings.minimum_interactions
                    );
                }
                DocumentOutcome::Unparsable { id, reason } => {
                    corpus.stats.unparsable += 1;
                    tracing::debug!("Skipped {}: {}", id, reason);
                }
            }
        }

        if corpus.is_short(self.settings) {
            tracing::warn!(
                "⚠️ Source exhausted: accepted {} of {} requested scripts",
                corpus.scripts.len(),
                self.settings.num_scripts
            );
        }

        corpus
    }
}

/// Classifies every script and aggregates the outcome ratios.
pub fn classify_corpus(lexicon: &Lexicon, scripts: &[Script], requested: usize) -> AnalysisReport {
    let classifier = BechdelClassifier::new(lexicon);
    let mut counts = StageCounts::default();

    let verdicts: Vec<ScriptVerdict> = scripts
        .iter()
        .map(|script| {
            let classification = classifier.evaluate(&script.entries);
            counts.record(classification);
            ScriptVerdict {
                title: script.title.clone(),
                entries: script.entries.len(),
                classification,
            }
        })
        .collect();

    let summary = CorpusSummary {
        requested_scripts: requested,
        total_scripts: counts.total(),
        ratios: StageRatios::from_counts(&counts),
        counts,
        generated_at: chrono::Utc::now(),
    };

    AnalysisReport { verdicts, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BoldFragment, ClassificationResult};
    use crate::utils::error::Result;
    use std::collections::HashMap;

    struct MockSource {
        ids: Vec<String>,
        docs: HashMap<String, RawDocument>,
    }

    impl MockSource {
        fn new(docs: Vec<(&str, Option<RawDocument>)>) -> Self {
            Self {
                ids: docs.iter().map(|(id, _)| id.to_string()).collect(),
                docs: docs
                    .into_iter()
                    .filter_map(|(id, doc)| doc.map(|d| (id.to_string(), d)))
                    .collect(),
            }
        }
    }

    impl DocumentSource for MockSource {
        fn document_ids(&self) -> &[String] {
            &self.ids
        }

        fn load(&self, id: &str) -> Result<RawDocument> {
            self.docs
                .get(id)
                .cloned()
                .ok_or_else(|| BechdelError::UnparsableDocument {
                    id: id.to_string(),
                    reason: "no <pre> block".to_string(),
                })
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(["Bob"], ["Alice", "Beth"])
    }

    /// A screenplay with `turns` alternating cues.
    fn screenplay(title: &str, speakers: &[&str], turns: usize) -> RawDocument {
        let mut lines = vec![title.to_string(), String::new()];
        let mut bold = vec![BoldFragment::new(title)];
        for i in 0..turns {
            let cue = format!("        {}", speakers[i % speakers.len()].to_uppercase());
            bold.push(BoldFragment::new(cue.clone()));
            lines.push(cue);
            lines.push(format!("    Line number {}.", i));
            lines.push(String::new());
        }
        RawDocument {
            title: title.to_string(),
            bold_fragments: bold,
            lines,
        }
    }

    fn settings(num_scripts: usize, minimum_interactions: usize) -> CorpusSettings {
        CorpusSettings {
            num_scripts,
            minimum_interactions,
            ..Default::default()
        }
    }

    #[test]
    fn test_permutations() {
        assert_eq!(SamplingOrder::Sequential.permutation(3), vec![0, 1, 2]);
        assert_eq!(
            SamplingOrder::Fixed(vec![2, 7, 2, 0]).permutation(3),
            vec![2, 0]
        );

        let a = SamplingOrder::Seeded(42).permutation(20);
        let b = SamplingOrder::Seeded(42).permutation(20);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_build_skips_unparsable_and_short_documents() {
        let lexicon = lexicon();
        let source = MockSource::new(vec![
            ("broken.html", None),
            ("short.html", Some(screenplay("SHORT", &["alice", "bob"], 3))),
            ("long.html", Some(screenplay("LONG", &["alice", "beth"], 8))),
            ("other.html", Some(screenplay("OTHER", &["bob", "alice"], 8))),
        ]);
        let settings = settings(1, 5);

        let corpus = CorpusBuilder::new(&source, &lexicon, &settings)
            .build(&SamplingOrder::Fixed(vec![0, 1, 2, 3]));

        assert_eq!(corpus.scripts.len(), 1);
        assert_eq!(corpus.scripts[0].title, "LONG");
        assert_eq!(
            corpus.stats,
            SamplingStats {
                drawn: 3,
                accepted: 1,
                rejected: 1,
                unparsable: 1
            }
        );
    }

    #[test]
    fn test_exhausted_source_returns_short_corpus() {
        let lexicon = lexicon();
        let source = MockSource::new(vec![
            ("a.html", Some(screenplay("A", &["alice", "beth"], 6))),
            ("b.html", None),
        ]);
        let settings = settings(5, 5);

        let corpus = CorpusBuilder::new(&source, &lexicon, &settings).build(&SamplingOrder::Random);

        assert_eq!(corpus.scripts.len(), 1);
        assert!(corpus.is_short(&settings));
        assert_eq!(corpus.stats.drawn, 2);
    }

    #[test]
    fn test_accepted_scripts_exceed_minimum() {
        let lexicon = lexicon();
        let source = MockSource::new(vec![
            ("exact.html", Some(screenplay("EXACT", &["alice", "bob"], 5))),
            ("more.html", Some(screenplay("MORE", &["alice", "bob"], 6))),
        ]);
        let settings = settings(2, 5);

        let corpus =
            CorpusBuilder::new(&source, &lexicon, &settings).build(&SamplingOrder::Sequential);

        assert_eq!(corpus.scripts.len(), 1);
        assert!(corpus.scripts.iter().all(|s| s.entries.len() > 5));
    }

    #[test]
    fn test_document_without_bold_is_rejected() {
        let lexicon = lexicon();
        let mut doc = screenplay("PLAIN", &["alice", "beth"], 10);
        doc.bold_fragments.clear();
        let source = MockSource::new(vec![("plain.html", Some(doc))]);
        let settings = settings(1, 0);

        match CorpusBuilder::new(&source, &lexicon, &settings).process("plain.html") {
            DocumentOutcome::Rejected { entries, .. } => assert_eq!(entries, 0),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_corpus_ratios_sum_to_one() {
        let lexicon = lexicon();
        let scripts: Vec<Script> = [
            ("PASSES", &["alice", "beth"][..]),
            ("ISOLATED", &["alice", "bob"][..]),
            ("ALSO ISOLATED", &["bob", "beth"][..]),
        ]
        .iter()
        .map(|(title, speakers)| extract_script(&lexicon, 0.6, screenplay(title, speakers, 6)).1)
        .collect();

        let report = classify_corpus(&lexicon, &scripts, 3);

        assert_eq!(report.verdicts[0].classification, ClassificationResult::Pass);
        assert_eq!(report.verdicts[1].classification, ClassificationResult::FailStage3);
        assert_eq!(report.summary.counts.pass, 1);
        assert_eq!(report.summary.counts.fail_stage3, 2);
        assert_eq!(report.summary.total_scripts, 3);
        assert!((report.summary.ratios.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_classify_empty_corpus() {
        let report = classify_corpus(&lexicon(), &[], 10);
        assert_eq!(report.summary.total_scripts, 0);
        assert_eq!(report.summary.ratios, StageRatios::default());
    }
}
