use crate::{Tree, TreeError};
use std::collections::BTreeMap;

/// [`Tree`] that keeps every file in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryTree {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        MemoryTree::default()
    }

    /// Create a tree from a list of `(path, content)` pairs.
    pub fn from_files<Path, Content>(files: impl IntoIterator<Item = (Path, Content)>) -> Self
    where
        Path: Into<String>,
        Content: AsRef<[u8]>,
    {
        let files =
            files.into_iter().map(|(path, content)| (path.into(), content.as_ref().to_vec()));
        MemoryTree { files: files.collect() }
    }

    /// Content of the file at `path` as UTF-8 text, if it exists.
    pub fn read_to_string(&self, path: &str) -> Option<String> {
        self.files.get(path).map(|content| String::from_utf8_lossy(content).into_owned())
    }
}

impl Tree for MemoryTree {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, TreeError> {
        self.files.get(path).cloned().ok_or_else(|| TreeError::NotFound { path: path.to_string() })
    }

    fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError> {
        self.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }
}
