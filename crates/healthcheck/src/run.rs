use spartan_tree::Tree;

use crate::{Detection, Healthcheck, HealthcheckError, HealthcheckSeverity};

/// What happened after a healthcheck reported its detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// Nothing fixable was reported.
    NotAttempted,
    /// The reporter answered "no" to the prompt.
    Declined,
    /// [`Healthcheck::fix`] returned `true`.
    Fixed,
    /// [`Healthcheck::fix`] returned `false`.
    Failed,
}

/// Result of running a single healthcheck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthcheckReport {
    pub name: String,
    pub detection: Detection,
    pub fix: FixOutcome,
}

impl HealthcheckReport {
    /// Whether the project is left without errors from this check.
    ///
    /// Warnings alone keep a project healthy, and a successful fix resolves what was detected.
    pub fn is_healthy(&self) -> bool {
        match (&self.detection, self.fix) {
            (Detection::Skipped { .. }, _) => true,
            (_, FixOutcome::Fixed) => true,
            (detection, _) => detection
                .failures()
                .iter()
                .all(|failure| failure.severity != HealthcheckSeverity::Error),
        }
    }
}

/// Receives progress of [`RunHealthchecks`] and answers its prompts.
pub trait Reporter {
    /// Called once per healthcheck, right after `detect`.
    fn detected(&mut self, name: &str, detection: &Detection);

    /// Ask whether `fix` should run. Only called when a fixable failure was detected.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Called after `fix` was attempted or declined.
    fn fixed(&mut self, name: &str, outcome: FixOutcome);
}

/// This subroutine runs every healthcheck against a tree, asking before each fix.
#[must_use]
pub struct RunHealthchecks<'a> {
    /// Checks to run, in order.
    pub healthchecks: &'a [Box<dyn Healthcheck>],
    /// Project to inspect and fix.
    pub tree: &'a mut dyn Tree,
    /// Where results are shown and prompts are answered.
    pub reporter: &'a mut dyn Reporter,
}

impl<'a> RunHealthchecks<'a> {
    /// Execute the subroutine.
    ///
    /// The first unexpected error stops the run; checks after it are not executed.
    pub async fn run(self) -> Result<Vec<HealthcheckReport>, HealthcheckError> {
        let RunHealthchecks { healthchecks, tree, reporter } = self;
        let mut reports = Vec::with_capacity(healthchecks.len());

        for healthcheck in healthchecks {
            let name = healthcheck.name();
            tracing::info!(target: "spartan::healthcheck", name, "Detect");
            let detection = healthcheck.detect(tree).await?;
            reporter.detected(name, &detection);

            let fix = if !detection.has_fixable_failures() {
                FixOutcome::NotAttempted
            } else if !reporter.confirm(healthcheck.prompt()) {
                FixOutcome::Declined
            } else if healthcheck.fix(tree).await? {
                FixOutcome::Fixed
            } else {
                FixOutcome::Failed
            };

            if fix != FixOutcome::NotAttempted {
                tracing::info!(target: "spartan::healthcheck", name, ?fix, "Fix");
                reporter.fixed(name, fix);
            }

            reports.push(HealthcheckReport { name: name.to_string(), detection, fix });
        }

        Ok(reports)
    }
}
