//! Command errors, dispatch, and shell-level reporting.

use strsim::levenshtein;
use thiserror::Error;

use crate::{config::ConfigError, errors::LedgerError, storage::SaveReport};

use super::{io as cli_io, output, shell_context::ShellContext};

pub use super::shell_context::CliMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// User-facing error for failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit expense tracker?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::InvalidCurrencyCode(code)) => {
                output::error(format!("Invalid currency code: `{}`", code));
                output::hint("Use a three-letter ISO 4217 code in capitals, e.g. EUR or JPY.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn report_save(&self, report: &SaveReport) {
        for failure in &report.failures {
            output::warning(failure);
        }
        if report.is_clean() {
            output::success("Expenses and budgets saved.");
        } else {
            output::warning("Changes remain in memory; try `save` again later.");
        }
    }

    /// Writes the final checkpoint before the process exits.
    pub(crate) fn shutdown(&mut self) {
        let report = self.manager.save();
        self.report_save(&report);
        self.running = false;
    }
}
