use dialoguer::Confirm;
use pipe_trait::Pipe;
use spartan_healthcheck::{Detection, FixOutcome, Reporter};
use std::io::{self, IsTerminal};

/// How prompts before a fix are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixPolicy {
    /// Ask on the terminal. Declines when stdin is not interactive.
    Ask,
    /// `--yes`
    Always,
    /// `--no-fix`
    Never,
}

impl FixPolicy {
    pub fn from_flags(yes: bool, no_fix: bool) -> Self {
        match (yes, no_fix) {
            (_, true) => FixPolicy::Never,
            (true, false) => FixPolicy::Always,
            (false, false) => FixPolicy::Ask,
        }
    }
}

/// [`Reporter`] that prints to stdout and asks on the terminal.
#[derive(Debug)]
pub struct TerminalReporter {
    policy: FixPolicy,
}

impl TerminalReporter {
    pub fn new(policy: FixPolicy) -> Self {
        TerminalReporter { policy }
    }
}

impl Reporter for TerminalReporter {
    fn detected(&mut self, name: &str, detection: &Detection) {
        println!("{}", render_detection(name, detection));
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match self.policy {
            FixPolicy::Never => false,
            FixPolicy::Always => {
                println!("  {prompt} yes");
                true
            }
            FixPolicy::Ask if io::stdin().is_terminal() => {
                Confirm::new().with_prompt(prompt).default(true).interact().pipe(answer_or_decline)
            }
            FixPolicy::Ask => {
                println!("  {prompt} Rerun with --yes to apply the fix.");
                false
            }
        }
    }

    fn fixed(&mut self, _name: &str, outcome: FixOutcome) {
        if let Some(line) = render_fix(outcome) {
            println!("  {line}");
        }
    }
}

/// A prompt that cannot be answered declines the fix.
fn answer_or_decline(answer: dialoguer::Result<bool>) -> bool {
    match answer {
        Ok(answer) => answer,
        Err(error) => {
            tracing::warn!(target: "spartan::cli", ?error, "Cannot read the answer, decline the fix");
            false
        }
    }
}

fn render_detection(name: &str, detection: &Detection) -> String {
    let mut lines = vec![name.to_string()];
    match detection {
        Detection::Skipped { reason } => lines.push(format!("  skipped: {reason}")),
        Detection::Completed(failures) if failures.is_empty() => lines.push("  ok".to_string()),
        Detection::Completed(failures) => {
            for failure in failures {
                let fixable = if failure.fixable { " (fixable)" } else { "" };
                lines.push(format!("  [{}] {}{fixable}", failure.severity, failure.message));
            }
        }
    }
    lines.join("\n")
}

fn render_fix(outcome: FixOutcome) -> Option<&'static str> {
    match outcome {
        FixOutcome::NotAttempted => None,
        FixOutcome::Declined => Some("fix skipped"),
        FixOutcome::Fixed => Some("fixed"),
        FixOutcome::Failed => Some("fix failed"),
    }
}
