use std::collections::HashSet;

// 常見的性別指稱詞，劇本中常以此代替角色名稱
pub const ADDITIONAL_FEMALE_TAGS: [&str; 11] = [
    "woman",
    "women",
    "girl",
    "she",
    "her",
    "grandmother",
    "grandma",
    "mother",
    "daughter",
    "girlfriend",
    "niece",
];

pub const ADDITIONAL_MALE_TAGS: [&str; 11] = [
    "man",
    "men",
    "boy",
    "he",
    "him",
    "grandfather",
    "grandpa",
    "father",
    "son",
    "nephew",
    "boyfriend",
];

/// Lower-cases and removes ASCII punctuation and surrounding whitespace.
///
/// Every token compared against a [`Lexicon`] goes through this, so
/// `"MARY (CONT'D)"`-style fragments and name-list entries agree.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Splits free text into normalized word tokens.
///
/// Each whitespace-separated word is normalized like a lexicon entry
/// (`"O'Brien"` -> `"obrien"`). Words carrying punctuation also yield their
/// alphanumeric pieces, so `"he's"` still produces `"he"`.
pub fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .flat_map(|word| {
            let pieces: Vec<String> = if word.chars().any(|c| c.is_ascii_punctuation()) {
                word.split(|c: char| !c.is_alphanumeric())
                    .filter(|p| !p.is_empty())
                    .map(str::to_lowercase)
                    .collect()
            } else {
                Vec::new()
            };
            std::iter::once(normalize_token(word)).chain(pieces)
        })
        .filter(|w| !w.is_empty())
}

/// Immutable gendered name and tag sets.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    female_names: HashSet<String>,
    male_tags: HashSet<String>,
    female_tags: HashSet<String>,
    person_tags: HashSet<String>,
}

impl Lexicon {
    /// Builds a lexicon with the built-in auxiliary tags.
    pub fn new<M, F>(male_names: M, female_names: F) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        Self::builder()
            .male_names(male_names)
            .female_names(female_names)
            .male_tags(ADDITIONAL_MALE_TAGS)
            .female_tags(ADDITIONAL_FEMALE_TAGS)
            .build()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    pub fn is_person(&self, token: &str) -> bool {
        self.person_tags.contains(token)
    }

    pub fn is_female(&self, token: &str) -> bool {
        self.female_tags.contains(token)
    }

    /// Proper-name membership only; `"she"` is female but not a female name.
    pub fn is_female_name(&self, token: &str) -> bool {
        self.female_names.contains(token)
    }

    pub fn is_male(&self, token: &str) -> bool {
        self.male_tags.contains(token)
    }

    /// True when any word of `text` is a male name or tag.
    pub fn mentions_male(&self, text: &str) -> bool {
        word_tokens(text).any(|w| self.male_tags.contains(&w))
    }

    pub fn person_count(&self) -> usize {
        self.person_tags.len()
    }
}

#[derive(Debug, Default)]
pub struct LexiconBuilder {
    male_names: HashSet<String>,
    female_names: HashSet<String>,
    male_tags: HashSet<String>,
    female_tags: HashSet<String>,
}

fn insert_normalized<I>(set: &mut HashSet<String>, items: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    set.extend(
        items
            .into_iter()
            .map(|s| normalize_token(s.as_ref()))
            .filter(|s| !s.is_empty()),
    );
}

impl LexiconBuilder {
    pub fn male_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.male_names, names);
        self
    }

    pub fn female_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.female_names, names);
        self
    }

    pub fn male_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.male_tags, tags);
        self
    }

    pub fn female_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        insert_normalized(&mut self.female_tags, tags);
        self
    }

    pub fn build(self) -> Lexicon {
        let male_tags: HashSet<String> = self.male_names.union(&self.male_tags).cloned().collect();
        let female_tags: HashSet<String> = self
            .female_names
            .union(&self.female_tags)
            .cloned()
            .collect();
        let person_tags = male_tags.union(&female_tags).cloned().collect();

        Lexicon {
            female_names: self.female_names,
            male_tags,
            female_tags,
            person_tags,
        }
    }
}
