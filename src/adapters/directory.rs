use crate::adapters::markup::MarkupConverter;
use crate::core::DocumentSource;
use crate::domain::model::RawDocument;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

const SCRIPT_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// HTML screenplays in a single directory, indexed by file name.
pub struct DirectorySource {
    root: PathBuf,
    ids: Vec<String>,
    converter: MarkupConverter,
}

impl DirectorySource {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut ids = Vec::new();

        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            let is_script = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if !is_script || !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                ids.push(name.to_string());
            }
        }

        // 排序後索引才穩定，固定種子的抽樣才可重現
        ids.sort();
        tracing::debug!("Indexed {} scripts in {}", ids.len(), root.display());

        Ok(Self {
            root,
            ids,
            converter: MarkupConverter::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn document_ids(&self) -> &[String] {
        &self.ids
    }

    fn load(&self, id: &str) -> Result<RawDocument> {
        let bytes = std::fs::read(self.root.join(id))?;
        self.converter.convert(id, &String::from_utf8_lossy(&bytes))
    }
}
