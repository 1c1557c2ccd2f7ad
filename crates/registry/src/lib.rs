mod error;
mod package_version;

pub use error::{NetworkError, RegistryError};
pub use package_version::PackageVersion;

/// Registry used when nothing else is configured.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";
