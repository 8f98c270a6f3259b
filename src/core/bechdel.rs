use crate::core::lexicon::Lexicon;
use crate::domain::model::{ClassificationResult, DialogueEntry};

/// C1: two different female speakers talk back to back.
pub fn consecutive_distinct_female(current: &str, previous: Option<&str>) -> bool {
    previous.is_some_and(|prev| prev != current)
}

/// C2: neither line of the exchange mentions a man.
pub fn not_about_a_man(lexicon: &Lexicon, text: &str, previous_text: Option<&str>) -> bool {
    match previous_text {
        None => true,
        Some(prev) => !lexicon.mentions_male(text) && !lexicon.mentions_male(prev),
    }
}

/// C3: both speakers are named women, not just "she" or "mother".
pub fn both_named(lexicon: &Lexicon, current: &str, previous: Option<&str>) -> bool {
    lexicon.is_female_name(current) && previous.is_some_and(|p| lexicon.is_female_name(p))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Criteria {
    pub c1: bool,
    pub c2: bool,
    pub c3: bool,
}

impl Criteria {
    pub fn between(lexicon: &Lexicon, previous: Option<&DialogueEntry>, current: &DialogueEntry) -> Self {
        let prev_speaker = previous.map(|p| p.speaker.as_str());
        let prev_text = previous.map(|p| p.utterance.as_str());
        Self {
            c1: consecutive_distinct_female(&current.speaker, prev_speaker),
            c2: not_about_a_man(lexicon, &current.utterance, prev_text),
            c3: both_named(lexicon, &current.speaker, prev_speaker),
        }
    }

    pub fn all(&self) -> bool {
        self.c1 && self.c2 && self.c3
    }

    /// Exactly one of C1 or C2 holds and the speakers are not both named.
    pub fn partial_one(&self) -> bool {
        (self.c1 && !self.c2 && !self.c3) || (self.c2 && !self.c1 && !self.c3)
    }

    /// Exactly two of the three criteria hold.
    pub fn partial_two(&self) -> bool {
        (self.c1 && self.c3 && !self.c2)
            || (self.c1 && self.c2 && !self.c3)
            || (self.c2 && self.c3 && !self.c1)
    }
}

/// Progress of one script through the test. Latches only move forward.
///
/// `PartialTwo` is "two-of-three seen, single-criterion signal not yet seen";
/// it classifies the same as `None` until `PartialOne` joins it in `PartialBoth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    None,
    PartialOne,
    PartialTwo,
    PartialBoth,
    Passed,
}

impl ScanState {
    fn from_latches(one: bool, two: bool) -> Self {
        match (one, two) {
            (false, false) => ScanState::None,
            (true, false) => ScanState::PartialOne,
            (false, true) => ScanState::PartialTwo,
            (true, true) => ScanState::PartialBoth,
        }
    }

    fn latches(self) -> (bool, bool) {
        match self {
            ScanState::None => (false, false),
            ScanState::PartialOne => (true, false),
            ScanState::PartialTwo => (false, true),
            ScanState::PartialBoth | ScanState::Passed => (true, true),
        }
    }

    pub fn advance(self, criteria: Criteria) -> Self {
        if self == ScanState::Passed || criteria.all() {
            return ScanState::Passed;
        }
        let (one, two) = self.latches();
        Self::from_latches(one || criteria.partial_one(), two || criteria.partial_two())
    }

    pub fn classification(self) -> ClassificationResult {
        match self {
            ScanState::Passed => ClassificationResult::Pass,
            ScanState::PartialBoth => ClassificationResult::FailStage1,
            ScanState::PartialOne => ClassificationResult::FailStage2,
            ScanState::None | ScanState::PartialTwo => ClassificationResult::FailStage3,
        }
    }
}

/// Single-pass evaluator over one script's dialogue.
///
/// Criteria are only checked between a female turn and the female turn right
/// before it, spoken by someone else; any other speaker breaks the pairing.
pub struct BechdelClassifier<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> BechdelClassifier<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn scan(&self, entries: &[DialogueEntry]) -> ScanState {
        let mut state = ScanState::None;
        let mut previous: Option<&DialogueEntry> = None;

        for entry in entries {
            if !self.lexicon.is_female(&entry.speaker) {
                previous = None;
                continue;
            }

            // 同一人連續說話不算對話
            if let Some(prev) = previous.filter(|p| p.speaker != entry.speaker) {
                state = state.advance(Criteria::between(self.lexicon, Some(prev), entry));
                if state == ScanState::Passed {
                    break;
                }
            }

            previous = Some(entry);
        }

        state
    }

    pub fn evaluate(&self, entries: &[DialogueEntry]) -> ClassificationResult {
        self.scan(entries).classification()
    }
}
