mod error;
mod fs_tree;
mod memory_tree;

pub use error::TreeError;
pub use fs_tree::FsTree;
pub use memory_tree::MemoryTree;

use serde::de::DeserializeOwned;

/// A set of files addressed by paths relative to the root of a project.
///
/// Healthchecks only ever talk to the project through this trait, so they can run
/// against the real filesystem ([`FsTree`]) or an in-memory copy ([`MemoryTree`]).
pub trait Tree: Send + Sync {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Read the raw content of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, TreeError>;

    /// Create or overwrite the file at `path`.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError>;
}

/// Read the file at `path` and parse it as JSON.
pub fn read_json<Value>(tree: &dyn Tree, path: &str) -> Result<Value, TreeError>
where
    Value: DeserializeOwned,
{
    let content = tree.read(path)?;
    serde_json::from_slice(&content)
        .map_err(|error| TreeError::ParseJson { path: path.to_string(), error })
}
