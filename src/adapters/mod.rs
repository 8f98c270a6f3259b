// Adapters layer: concrete implementations for external systems (markup, name lists, script directories).

pub mod directory;
pub mod markup;
pub mod names;

pub use directory::DirectorySource;
pub use markup::MarkupConverter;
pub use names::{load_lexicon, load_name_list, parse_name_list};
