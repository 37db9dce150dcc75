use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "record",
            "Record an expense",
            "record <amount> <category> [description...]",
            cmd_record,
        ),
        CommandEntry::new(
            "history",
            "Show expenses in the order they were recorded",
            "history",
            cmd_history,
        ),
    ]
}

fn cmd_record(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, category, description) = match args {
        [] if context.can_prompt() => {
            let amount = cli_io::prompt_amount(&context.theme, "Expense amount")?;
            let category = cli_io::prompt_text(&context.theme, "Category", false)?;
            let description = cli_io::prompt_text(&context.theme, "Description", true)?;
            (amount, category, description)
        }
        [amount, category, rest @ ..] => (
            cli_io::parse_amount(amount)?,
            category.to_string(),
            rest.join(" "),
        ),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: record <amount> <category> [description...]".into(),
            ))
        }
    };

    context
        .manager
        .record_expense(amount, category, description);
    output::success("Expense recorded.");
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let history = context.manager.history();
    if history.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    output::section("Expense History");
    for expense in history {
        output::line(expense);
    }
    Ok(())
}
