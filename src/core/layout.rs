use crate::core::lexicon::{normalize_token, Lexicon};
use crate::domain::model::BoldFragment;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_NAME_TOLERANCE_RATIO: f64 = 0.6;

/// Normalized bold fragments keyed by indentation depth.
pub type IndentGroups = BTreeMap<usize, Vec<String>>;

/// Indentation depths whose bold lines are dominated by character names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndentSet {
    pub depths: BTreeSet<usize>,
    pub matches: BTreeMap<usize, Vec<String>>,
}

impl NameIndentSet {
    pub fn contains(&self, depth: usize) -> bool {
        self.depths.contains(&depth)
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

pub fn group_by_indent(fragments: &[BoldFragment]) -> IndentGroups {
    let mut groups = IndentGroups::new();
    for fragment in fragments {
        groups
            .entry(fragment.indent())
            .or_default()
            .push(fragment.raw.trim().to_lowercase());
    }
    groups
}

pub struct LayoutClassifier<'a> {
    lexicon: &'a Lexicon,
    name_tolerance_ratio: f64,
}

impl<'a> LayoutClassifier<'a> {
    pub fn new(lexicon: &'a Lexicon, name_tolerance_ratio: f64) -> Self {
        Self {
            lexicon,
            name_tolerance_ratio,
        }
    }

    pub fn classify(&self, fragments: &[BoldFragment]) -> NameIndentSet {
        let mut result = NameIndentSet::default();

        for (depth, texts) in group_by_indent(fragments) {
            let mut total = 0usize;
            let mut names = Vec::new();

            // 以空白切分，順便吸收 "(CONT'D)" 這類延續標記
            for token in texts.iter().flat_map(|t| t.split_whitespace()) {
                let token = normalize_token(token);
                if self.lexicon.is_person(&token) {
                    names.push(token);
                }
                total += 1;
            }

            if total == 0 {
                continue;
            }

            let ratio = names.len() as f64 / total as f64;
            tracing::trace!(depth, ratio, total, "indent group name density");

            if ratio >= self.name_tolerance_ratio {
                result.depths.insert(depth);
                result.matches.insert(depth, names);
            }
        }

        result
    }
}
