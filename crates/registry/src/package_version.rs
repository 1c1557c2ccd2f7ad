use node_semver::{Range, Version};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{NetworkError, RegistryError};

/// Metadata of a single published version, as returned by `<registry><name>/latest`.
///
/// Only the fields a healthcheck needs are kept, everything else in the document is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    #[serde(default)]
    pub name: String,
    pub version: String,
}

impl PackageVersion {
    /// Fetch the version the `latest` dist tag of `name` points to.
    pub async fn fetch_latest_from_registry(
        name: &str,
        http_client: &Client,
        registry: &str,
    ) -> Result<Self, RegistryError> {
        let url = format!("{registry}{name}/latest");

        tracing::debug!(target: "spartan::registry", ?url, "Fetch package metadata");
        let response = http_client
            .get(&url)
            .header("user-agent", "spartan-cli")
            .header("accept", "application/json")
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(error) => return Err(RegistryError::Network(NetworkError { url, error })),
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(target: "spartan::registry", ?url, %status, "Unsuccessful response");
            return Err(RegistryError::UnsuccessfulStatus { url, status });
        }

        match response.json::<PackageVersion>().await {
            Ok(package_version) => Ok(package_version),
            Err(error) => Err(RegistryError::Deserialization { url, error }),
        }
    }

    /// Whether this version falls within `range`.
    ///
    /// A range or version that cannot be parsed never matches.
    pub fn satisfies(&self, range: &str) -> bool {
        let Ok(range) = range.parse::<Range>() else {
            return false;
        };
        let Ok(version) = self.version.parse::<Version>() else {
            return false;
        };
        version.satisfies(&range)
    }

    pub fn serialize(&self, save_exact: bool) -> String {
        let prefix = if save_exact { "" } else { "^" };
        format!("{0}{1}", prefix, self.version)
    }
}
