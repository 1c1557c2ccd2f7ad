mod custom_deserializer;

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use crate::custom_deserializer::normalize_registry;
use crate::custom_deserializer::{default_registry, deserialize_registry};

/// Settings read from an `.npmrc` file.
///
/// Keys the healthchecks don't care about (auth tokens, scoped registries, store settings)
/// are accepted and ignored.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Npmrc {
    /// The base URL of the npm package registry (trailing slash included).
    #[serde(default = "default_registry", deserialize_with = "deserialize_registry")]
    pub registry: String,
}

impl Npmrc {
    pub fn new() -> Self {
        Npmrc { registry: default_registry() }
    }

    /// Parse the content of an `.npmrc` file.
    pub fn parse(content: &str) -> Result<Self, serde_ini::de::Error> {
        serde_ini::from_str(content)
    }

    /// Load the configuration that applies to the project at `project_dir`.
    ///
    /// The project's `.npmrc` wins over the one in the home directory. Files that are missing
    /// or cannot be parsed are skipped, and the defaults apply when neither is usable.
    pub fn current<HomeDir>(project_dir: &Path, home_dir: HomeDir) -> Self
    where
        HomeDir: FnOnce() -> Option<PathBuf>,
    {
        let candidates = [Some(project_dir.to_path_buf()), home_dir()];
        candidates
            .into_iter()
            .flatten()
            .map(|dir| dir.join(".npmrc"))
            .find_map(|path| Npmrc::load(&path))
            .unwrap_or_default()
    }

    fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match Npmrc::parse(&content) {
            Ok(npmrc) => {
                tracing::debug!(target: "spartan::npmrc", ?path, registry = %npmrc.registry, "Loaded .npmrc");
                Some(npmrc)
            }
            Err(error) => {
                tracing::warn!(target: "spartan::npmrc", ?path, %error, "Ignoring unparsable .npmrc");
                None
            }
        }
    }
}

impl Default for Npmrc {
    fn default() -> Self {
        Self::new()
    }
}
