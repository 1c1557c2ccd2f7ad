mod cli_args;
mod reporter;
mod state;

pub use cli_args::CliArgs;
pub use reporter::{FixPolicy, TerminalReporter};
pub use state::State;

use clap::Parser;
use spartan_diagnostics::enable_tracing_by_env;

pub async fn run_cli() -> miette::Result<()> {
    enable_tracing_by_env();
    CliArgs::parse().run().await
}
