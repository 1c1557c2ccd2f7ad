use serde::{Deserialize, Deserializer};
use spartan_registry::DEFAULT_REGISTRY;

pub fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

/// Registry URLs are joined with package names by plain concatenation, so they must end with `/`.
pub fn normalize_registry(registry: String) -> String {
    if registry.ends_with('/') {
        return registry;
    }

    format!("{registry}/")
}

pub fn deserialize_registry<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(normalize_registry)
}
