use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use spartan_package_manifest::{DependencyGroup, PackageManifest, PACKAGE_JSON};
use spartan_registry::{PackageVersion, RegistryError};
use spartan_tree::Tree;
use tracing::instrument;

use crate::{Detection, Healthcheck, HealthcheckError, HealthcheckFailure, HealthcheckSeverity};

/// Packages whose declared version is compared against the latest release, in check order.
pub const TRACKED_DEPENDENCIES: [&str; 2] = ["@spartan-ng/brain", "@spartan-ng/cli"];

/// Checks that the spartan packages are declared and up to date with the registry.
#[derive(Debug, Clone)]
pub struct VersionHealthcheck {
    http_client: Client,
    registry: String,
}

impl VersionHealthcheck {
    /// `registry` is the base URL of the registry, trailing slash included.
    pub fn new(http_client: Client, registry: impl Into<String>) -> Self {
        VersionHealthcheck { http_client, registry: registry.into() }
    }

    /// Latest published version of `name`, or `None` when the registry refuses the request.
    async fn fetch_latest(&self, name: &str) -> Result<Option<PackageVersion>, RegistryError> {
        let result =
            PackageVersion::fetch_latest_from_registry(name, &self.http_client, &self.registry)
                .await;

        match result {
            Ok(package_version) => Ok(Some(package_version)),
            Err(RegistryError::UnsuccessfulStatus { url, status }) => {
                tracing::warn!(target: "spartan::healthcheck", ?url, %status, "Cannot fetch metadata");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// Declared range of `name`. Empty ranges count as not declared.
fn installed_range<'a>(dependencies: &HashMap<&str, &'a str>, name: &str) -> Option<&'a str> {
    dependencies.get(name).copied().filter(|range| !range.is_empty())
}

#[async_trait]
impl Healthcheck for VersionHealthcheck {
    fn name(&self) -> &str {
        "Spartan - Dependency Check"
    }

    fn prompt(&self) -> &str {
        "Would you like to update to the latest versions of the dependencies?"
    }

    #[instrument(skip_all, fields(registry = %self.registry))]
    async fn detect(&self, tree: &dyn Tree) -> Result<Detection, HealthcheckError> {
        if !tree.exists(PACKAGE_JSON) {
            return Ok(Detection::skipped("No package.json found."));
        }

        let manifest = PackageManifest::from_tree(tree, PACKAGE_JSON)?;
        let dependencies = manifest.merged_dependencies();
        let mut failures = Vec::new();

        for name in TRACKED_DEPENDENCIES {
            let Some(installed) = installed_range(&dependencies, name) else {
                failures.push(HealthcheckFailure::new(
                    format!("The dependency {name} is not installed."),
                    HealthcheckSeverity::Error,
                    true,
                ));
                continue;
            };

            let Some(latest) = self.fetch_latest(name).await? else {
                failures.push(HealthcheckFailure::new(
                    format!("Failed to fetch metadata for {name}."),
                    HealthcheckSeverity::Error,
                    false,
                ));
                continue;
            };

            tracing::debug!(target: "spartan::healthcheck", name, installed, latest = %latest.version, "Compare versions");
            if !latest.satisfies(installed) {
                failures.push(HealthcheckFailure::new(
                    format!(
                        "The installed version of {name} is not the latest version. The latest version is {}.",
                        latest.version,
                    ),
                    HealthcheckSeverity::Warning,
                    true,
                ));
            }
        }

        Ok(Detection::Completed(failures))
    }

    #[instrument(skip_all, fields(registry = %self.registry))]
    async fn fix(&self, tree: &mut dyn Tree) -> Result<bool, HealthcheckError> {
        let mut manifest = PackageManifest::from_tree(tree, PACKAGE_JSON)?;
        let installed = {
            let dependencies = manifest.merged_dependencies();
            TRACKED_DEPENDENCIES.map(|name| installed_range(&dependencies, name).is_some())
        };

        for (name, is_installed) in TRACKED_DEPENDENCIES.into_iter().zip(installed) {
            if !is_installed {
                tracing::info!(target: "spartan::healthcheck", name, "Not installed, abort fix");
                return Ok(false);
            }

            let Some(latest) = self.fetch_latest(name).await? else {
                tracing::info!(target: "spartan::healthcheck", name, "No metadata, abort fix");
                return Ok(false);
            };

            // the update stays in the section that declares the package
            let group = match manifest.dependency(name, DependencyGroup::Prod) {
                Some(range) if !range.is_empty() => DependencyGroup::Prod,
                _ => DependencyGroup::Dev,
            };
            let version_range = latest.serialize(false);
            tracing::debug!(target: "spartan::healthcheck", name, ?group, %version_range, "Update dependency");
            manifest.add_dependency(name, &version_range, group)?;
        }

        manifest.save(tree)?;
        Ok(true)
    }
}
