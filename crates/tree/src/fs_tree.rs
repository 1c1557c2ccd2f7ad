use crate::{Tree, TreeError};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// [`Tree`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsTree { root: root.into() }
    }

    pub fn root(&self) -> &'_ Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Tree for FsTree {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, TreeError> {
        let file_path = self.resolve(path);
        fs::read(&file_path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => TreeError::NotFound { path: path.to_string() },
            _ => TreeError::ReadFile { file_path, error },
        })
    }

    fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError> {
        let file_path = self.resolve(path);

        if let Some(parent_dir) = file_path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| TreeError::CreateDir {
                parent_dir: parent_dir.to_path_buf(),
                error,
            })?;
        }

        tracing::debug!(target: "spartan::tree", ?file_path, len = content.len(), "Write file");
        fs::write(&file_path, content).map_err(|error| TreeError::WriteFile { file_path, error })
    }
}
