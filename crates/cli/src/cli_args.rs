use crate::{FixPolicy, State, TerminalReporter};
use clap::Parser;
use derive_more::{Display, Error};
use miette::{Context, Diagnostic};
use spartan_healthcheck::RunHealthchecks;
use std::path::PathBuf;

/// Check that a project uses up to date spartan packages.
#[derive(Debug, Parser)]
#[clap(name = "spartan-healthcheck")]
#[clap(bin_name = "spartan-healthcheck")]
#[clap(version)]
#[clap(about = "Check that a project uses up to date spartan packages")]
pub struct CliArgs {
    /// Set working directory.
    #[clap(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,

    /// Base URL of the npm registry, overrides the `registry` of `.npmrc`.
    #[clap(long)]
    pub registry: Option<String>,

    /// Apply every available fix without asking.
    #[clap(short = 'y', long, conflicts_with = "no_fix")]
    pub yes: bool,

    /// Only report problems, never modify the project.
    #[clap(long)]
    pub no_fix: bool,
}

/// Error returned when at least one healthcheck left an error behind.
#[derive(Debug, Display, Error, Diagnostic)]
#[display("Healthchecks reported errors: {}", names.join(", "))]
#[diagnostic(
    code(spartan_cli::unhealthy_project),
    help("Resolve the errors listed above, or rerun with --yes to apply the available fixes.")
)]
pub struct UnhealthyProject {
    #[error(not(source))]
    pub names: Vec<String>,
}

impl CliArgs {
    /// Execute the command
    pub async fn run(self) -> miette::Result<()> {
        let CliArgs { dir, registry, yes, no_fix } = self;
        let mut state = State::init(dir, registry);
        let healthchecks = state.healthchecks();
        let mut reporter = TerminalReporter::new(FixPolicy::from_flags(yes, no_fix));

        let reports = RunHealthchecks {
            healthchecks: &healthchecks,
            tree: &mut state.tree,
            reporter: &mut reporter,
        }
        .run()
        .await
        .wrap_err("running the healthchecks")?;

        let names = reports
            .iter()
            .filter(|report| !report.is_healthy())
            .map(|report| report.name.clone())
            .collect::<Vec<_>>();

        if names.is_empty() {
            Ok(())
        } else {
            Err(UnhealthyProject { names }.into())
        }
    }
}
