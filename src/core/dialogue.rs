use crate::core::layout::NameIndentSet;
use crate::core::lexicon::{normalize_token, Lexicon};
use crate::domain::model::{indent_of, DialogueEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    AwaitingName,
    InDialogue,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Rebuilds (speaker, utterance) pairs from a screenplay body.
///
/// A line at one of the name depths opens a dialogue block. Every following
/// line is part of the utterance until a blank line or the next cue closes
/// it. A block still open when the document ends is dropped.
pub struct DialogueExtractor<'a> {
    lexicon: &'a Lexicon,
    name_depths: &'a NameIndentSet,
}

impl<'a> DialogueExtractor<'a> {
    pub fn new(lexicon: &'a Lexicon, name_depths: &'a NameIndentSet) -> Self {
        Self {
            lexicon,
            name_depths,
        }
    }

    /// Speaker token for a cue line.
    ///
    /// A cue without spaces is taken as-is. Any other cue (indented, or
    /// `"MIA (CONT'D)"`, `"OLD WOMAN"`) keeps the last word found in the
    /// lexicon, so an indented unknown name yields no speaker.
    pub fn speaker_of(&self, cue: &str) -> Option<String> {
        if !cue.contains(' ') {
            return Some(normalize_token(cue)).filter(|s| !s.is_empty());
        }
        cue.split(' ')
            .map(normalize_token)
            .filter(|w| self.lexicon.is_person(w))
            .last()
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<DialogueEntry> {
        let mut entries = Vec::new();
        let Some((first, rest)) = lines.split_first() else {
            return entries;
        };

        let mut state = ScanState::AwaitingName;
        let mut prev_line = first.as_ref();
        let mut speaker: Option<String> = None;
        let mut dialogue = String::new();

        for line in rest.iter().map(AsRef::as_ref) {
            if state == ScanState::AwaitingName
                && !is_blank(prev_line)
                && self.name_depths.contains(indent_of(prev_line))
            {
                speaker = self.speaker_of(prev_line);
                state = ScanState::InDialogue;
            }

            if state == ScanState::InDialogue {
                if is_blank(line) || self.name_depths.contains(indent_of(line)) {
                    // 下一個名字直接出現時也要先結束目前的台詞
                    state = ScanState::AwaitingName;
                } else {
                    if !dialogue.is_empty() {
                        dialogue.push(' ');
                    }
                    dialogue.push_str(line.trim());
                }
            }

            // 區塊結束：有名字就輸出，沒有名字的台詞直接丟棄
            if state == ScanState::AwaitingName {
                let text = std::mem::take(&mut dialogue);
                if let Some(name) = speaker.take() {
                    if !text.is_empty() {
                        entries.push(DialogueEntry::new(name, text));
                    }
                }
            }

            prev_line = line;
        }

        if state == ScanState::InDialogue {
            tracing::trace!("dropping unterminated dialogue block at end of document");
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::LayoutClassifier;
    use crate::domain::model::BoldFragment;

    fn lexicon() -> Lexicon {
        Lexicon::new(["Vincent", "Jules"], ["Mia", "Jody"])
    }

    fn depths(values: &[usize]) -> NameIndentSet {
        NameIndentSet {
            depths: values.iter().copied().collect(),
            ..Default::default()
        }
    }

    const BODY: &[&str] = &[
        "INT. JACKRABBIT SLIM'S - NIGHT",
        "",
        "          Vincent and Mia sit down.",
        "",
        "                    MIA",
        "          Don't you hate that?",
        "",
        "                    VINCENT (CONT'D)",
        "          Hate what?",
        "          Uncomfortable silences.",
        "",
        "                    JODY",
        "          Lance, wake up!",
        "",
    ];

    #[test]
    fn test_extract_basic_dialogue() {
        let lexicon = lexicon();
        let names = depths(&[20]);
        let entries = DialogueExtractor::new(&lexicon, &names).extract(BODY);

        assert_eq!(
            entries,
            vec![
                DialogueEntry::new("mia", "Don't you hate that?"),
                DialogueEntry::new("vincent", "Hate what? Uncomfortable silences."),
                DialogueEntry::new("jody", "Lance, wake up!"),
            ]
        );
    }

    #[test]
    fn test_cue_without_blank_line_starts_new_entry() {
        let lexicon = lexicon();
        let names = depths(&[20]);
        let lines = [
            "",
            "                    MIA",
            "    Don't you hate that?",
            "                    JODY",
            "    Lance, wake up!",
            "",
        ];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(&lines);

        assert_eq!(
            entries,
            vec![
                DialogueEntry::new("mia", "Don't you hate that?"),
                DialogueEntry::new("jody", "Lance, wake up!"),
            ]
        );
    }

    #[test]
    fn test_unterminated_final_block_is_dropped() {
        let lexicon = lexicon();
        let names = depths(&[20]);
        let body = &BODY[..BODY.len() - 1];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(body);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].speaker, "vincent");
    }

    #[test]
    fn test_whitespace_only_line_closes_block() {
        let lexicon = lexicon();
        let names = depths(&[4]);
        let lines = ["    MIA", "  Hi.", "   ", "    JULES", "  Hey.", ""];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(&lines);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].utterance, "Hi.");
    }

    #[test]
    fn test_unknown_multi_word_cue_does_not_leak_into_next_entry() {
        let lexicon = lexicon();
        let names = depths(&[4]);
        let lines = [
            "    THE STRANGER",
            "  Who's there?",
            "",
            "    MIA",
            "  Me.",
            "",
        ];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(&lines);

        assert_eq!(entries, vec![DialogueEntry::new("mia", "Me.")]);
    }

    #[test]
    fn test_unknown_cue_is_kept_only_without_indentation() {
        let lexicon = lexicon();
        let names = depths(&[0, 4]);
        let lines = [
            "    ZED",
            "  Zed's dead, baby.",
            "",
            "ZED",
            "  Zed's dead.",
            "",
            "    MIA",
            "  Who's Zed?",
            "",
        ];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(&lines);

        assert_eq!(
            entries,
            vec![
                DialogueEntry::new("zed", "Zed's dead."),
                DialogueEntry::new("mia", "Who's Zed?"),
            ]
        );
        assert_eq!(DialogueExtractor::new(&lexicon, &names).speaker_of("    ZED"), None);
    }

    #[test]
    fn test_no_empty_speaker_or_utterance() {
        let lexicon = lexicon();
        let names = depths(&[0, 4]);
        let lines = ["", "    MIA", "", "", "    JULES", "", "    ", "x", "", "MIA", "  ok", ""];
        let entries = DialogueExtractor::new(&lexicon, &names).extract(&lines);

        assert!(entries
            .iter()
            .all(|e| !e.speaker.is_empty() && !e.utterance.is_empty()));
        assert_eq!(entries, vec![DialogueEntry::new("mia", "ok")]);
    }

    #[test]
    fn test_no_bold_fragments_yields_no_dialogue() {
        let lexicon = lexicon();
        let names = LayoutClassifier::new(&lexicon, 0.6).classify(&Vec::<BoldFragment>::new());
        let entries = DialogueExtractor::new(&lexicon, &names).extract(BODY);

        assert!(names.is_empty());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let lexicon = lexicon();
        let names = depths(&[4]);
        let extractor = DialogueExtractor::new(&lexicon, &names);
        assert!(extractor.extract::<&str>(&[]).is_empty());
        assert!(extractor.extract(&["    MIA"]).is_empty());
    }
}
