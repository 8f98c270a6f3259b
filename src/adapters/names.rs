use crate::core::lexicon::{Lexicon, ADDITIONAL_FEMALE_TAGS, ADDITIONAL_MALE_TAGS};
use crate::core::ConfigProvider;
use crate::utils::error::{BechdelError, Result};
use std::path::Path;

/// Keeps records that start with an uppercase letter, trimmed and lower-cased.
pub fn parse_name_list(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
        .map(|line| line.trim().to_lowercase())
        .collect()
}

pub fn load_name_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| BechdelError::LexiconError {
        message: format!("{}: {}", path.display(), e),
    })?;
    Ok(parse_name_list(&String::from_utf8_lossy(&bytes)))
}

/// Builds the shared lexicon from the configured name lists and tag extras.
pub fn load_lexicon<C: ConfigProvider>(config: &C) -> Result<Lexicon> {
    let male_names = load_name_list(config.male_names_path())?;
    let female_names = load_name_list(config.female_names_path())?;

    if male_names.is_empty() || female_names.is_empty() {
        tracing::warn!(
            "⚠️ Name lists look empty (male: {}, female: {}); few speaker depths will be found",
            male_names.len(),
            female_names.len()
        );
    }

    let lexicon = Lexicon::builder()
        .male_names(&male_names)
        .female_names(&female_names)
        .male_tags(ADDITIONAL_MALE_TAGS)
        .male_tags(config.extra_male_tags())
        .female_tags(ADDITIONAL_FEMALE_TAGS)
        .female_tags(config.extra_female_tags())
        .build();

    tracing::info!(
        "📖 Lexicon loaded: {} male names, {} female names, {} person tags",
        male_names.len(),
        female_names.len(),
        lexicon.person_count()
    );

    Ok(lexicon)
}
