use reqwest::Client;
use spartan_healthcheck::{Healthcheck, VersionHealthcheck};
use spartan_npmrc::{normalize_registry, Npmrc};
use spartan_tree::FsTree;
use std::path::PathBuf;

/// Application state of a healthcheck run.
pub struct State {
    /// Configuration read from `.npmrc`, with command line overrides applied.
    pub config: Npmrc,
    /// HTTP client to make HTTP requests.
    pub http_client: Client,
    /// Project directory being checked.
    pub tree: FsTree,
}

impl State {
    /// Initialize the application state.
    pub fn init(dir: PathBuf, registry: Option<String>) -> Self {
        let mut config = Npmrc::current(&dir, home::home_dir);
        if let Some(registry) = registry {
            config.registry = normalize_registry(registry);
        }

        State { config, http_client: Client::new(), tree: FsTree::new(dir) }
    }

    /// Every healthcheck this CLI knows about, in the order they run.
    pub fn healthchecks(&self) -> Vec<Box<dyn Healthcheck>> {
        vec![Box::new(VersionHealthcheck::new(
            self.http_client.clone(),
            self.config.registry.clone(),
        ))]
    }
}
