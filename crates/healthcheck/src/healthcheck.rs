use async_trait::async_trait;
use derive_more::{Display, Error, From};
use miette::Diagnostic;
use spartan_package_manifest::PackageManifestError;
use spartan_registry::RegistryError;
use spartan_tree::Tree;

/// How bad a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HealthcheckSeverity {
    #[display("error")]
    Error,
    #[display("warning")]
    Warning,
}

/// A single problem reported by [`Healthcheck::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthcheckFailure {
    pub message: String,
    pub severity: HealthcheckSeverity,
    /// Whether [`Healthcheck::fix`] is able to resolve the problem.
    pub fixable: bool,
}

impl HealthcheckFailure {
    pub fn new(message: impl Into<String>, severity: HealthcheckSeverity, fixable: bool) -> Self {
        HealthcheckFailure { message: message.into(), severity, fixable }
    }
}

/// Outcome of [`Healthcheck::detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The check does not apply to the project.
    Skipped { reason: String },
    /// The check ran. An empty list means the project is healthy.
    Completed(Vec<HealthcheckFailure>),
}

impl Detection {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Detection::Skipped { reason: reason.into() }
    }

    pub fn failures(&self) -> &'_ [HealthcheckFailure] {
        match self {
            Detection::Skipped { .. } => &[],
            Detection::Completed(failures) => failures,
        }
    }

    pub fn has_fixable_failures(&self) -> bool {
        self.failures().iter().any(|failure| failure.fixable)
    }

    /// Replay the detection through `failure(message, severity, fixable)` and `skip(reason)`
    /// callbacks, for hosts that consume reports one event at a time.
    ///
    /// Each callback is called zero or more times.
    pub fn report<Failure, Skip>(&self, mut failure: Failure, mut skip: Skip)
    where
        Failure: FnMut(&str, HealthcheckSeverity, bool),
        Skip: FnMut(&str),
    {
        match self {
            Detection::Skipped { reason } => skip(reason),
            Detection::Completed(failures) => {
                for HealthcheckFailure { message, severity, fixable } in failures {
                    failure(message, *severity, *fixable);
                }
            }
        }
    }
}

/// Error type of [`Healthcheck::detect`] and [`Healthcheck::fix`].
///
/// Expected problems of a project are reported through [`Detection`] or the boolean result of
/// `fix`. This type only carries what a check could not anticipate, such as a malformed
/// manifest or a broken connection.
#[derive(Debug, Display, Error, From, Diagnostic)]
#[non_exhaustive]
pub enum HealthcheckError {
    #[diagnostic(transparent)]
    Manifest(PackageManifestError),

    #[diagnostic(transparent)]
    Registry(RegistryError),
}

/// A named, pluggable diagnostic unit.
#[async_trait]
pub trait Healthcheck: Send + Sync {
    /// Human readable identifier.
    fn name(&self) -> &str;

    /// Question asked before [`Healthcheck::fix`] is attempted.
    fn prompt(&self) -> &str;

    /// Inspect the project without modifying it.
    async fn detect(&self, tree: &dyn Tree) -> Result<Detection, HealthcheckError>;

    /// Try to resolve the reported problems. Returns whether it fully succeeded.
    async fn fix(&self, tree: &mut dyn Tree) -> Result<bool, HealthcheckError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_replays_failures_in_order() {
        let detection = Detection::Completed(vec![
            HealthcheckFailure::new("missing", HealthcheckSeverity::Error, true),
            HealthcheckFailure::new("outdated", HealthcheckSeverity::Warning, true),
        ]);

        let mut failures = Vec::new();
        let mut skips = Vec::<String>::new();
        detection.report(
            |message, severity, fixable| failures.push((message.to_string(), severity, fixable)),
            |reason| skips.push(reason.to_string()),
        );

        assert_eq!(
            failures,
            [
                ("missing".to_string(), HealthcheckSeverity::Error, true),
                ("outdated".to_string(), HealthcheckSeverity::Warning, true),
            ]
        );
        assert!(skips.is_empty());
    }

    #[test]
    fn report_replays_skip() {
        let detection = Detection::skipped("No package.json found.");

        let mut failure_count = 0;
        let mut skips = Vec::<String>::new();
        detection.report(|_, _, _| failure_count += 1, |reason| skips.push(reason.to_string()));

        assert_eq!(failure_count, 0);
        assert_eq!(skips, ["No package.json found."]);
        assert!(!detection.has_fixable_failures());
    }

    #[test]
    fn fixable_failures() {
        let not_fixable = Detection::Completed(vec![HealthcheckFailure::new(
            "Failed to fetch metadata for a.",
            HealthcheckSeverity::Error,
            false,
        )]);
        assert!(!not_fixable.has_fixable_failures());
        assert!(!Detection::Completed(vec![]).has_fixable_failures());

        let fixable = Detection::Completed(vec![
            HealthcheckFailure::new("a", HealthcheckSeverity::Error, false),
            HealthcheckFailure::new("b", HealthcheckSeverity::Warning, true),
        ]);
        assert!(fixable.has_fixable_failures());
    }

    #[test]
    fn severity_labels() {
        assert_eq!(HealthcheckSeverity::Error.to_string(), "error");
        assert_eq!(HealthcheckSeverity::Warning.to_string(), "warning");
    }
}
