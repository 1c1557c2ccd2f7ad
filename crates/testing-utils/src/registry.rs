use mockito::{Mock, ServerGuard};
use serde_json::json;

/// Base URL of `server`, in the trailing-slash form registries are configured with.
pub fn registry_url(server: &ServerGuard) -> String {
    format!("{}/", server.url())
}

/// Path requested for the latest metadata of `name`.
pub fn latest_path(name: &str) -> String {
    format!("/{name}/latest")
}

/// Prepare a mock that answers `GET /<name>/latest` with `version`.
///
/// The returned [`Mock`] still has to be created with `create()` or `create_async()`.
pub fn mock_latest(server: &mut ServerGuard, name: &str, version: &str) -> Mock {
    let body = json!({ "name": name, "version": version, "license": "MIT" });
    server
        .mock("GET", latest_path(name).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
}

/// Prepare a mock that answers `GET /<name>/latest` with an empty response of `status`.
pub fn mock_latest_status(server: &mut ServerGuard, name: &str, status: usize) -> Mock {
    server.mock("GET", latest_path(name).as_str()).with_status(status)
}
