use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::core::services::BudgetHealth;
use crate::currency::format_currency_value;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show total and per-category spending",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "convert",
            "Show every expense converted into another currency",
            "convert <CURRENCY>",
            cmd_convert,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.manager.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    let summary = context.manager.summarize();
    output::line(format!("Total Spending: {:.2}", summary.total));
    output::section("Category-wise Spending");
    for (category, spent) in &summary.by_category {
        output::line(format!("{}: {:.2}", category, spent));
    }

    let status = context.manager.budget_status();
    if status.is_empty() {
        return Ok(());
    }
    output::section("Budgets");
    for row in status {
        let text = format!(
            "{}: {:.2} of {:.2} spent ({:.2} remaining)",
            row.category, row.spent, row.budget, row.remaining
        );
        match row.health {
            BudgetHealth::UnderBudget => output::line(text),
            BudgetHealth::OnTrack => output::warning(format!("{} - nearing budget", text)),
            BudgetHealth::OverBudget => output::warning(format!("{} - over budget", text)),
        }
    }
    Ok(())
}

fn cmd_convert(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = match args {
        [code] => code.to_string(),
        [] if context.can_prompt() => {
            cli_io::prompt_text(&context.theme, "Target currency (e.g. EUR)", false)?
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: convert <CURRENCY>".into(),
            ))
        }
    };

    let lines = context.manager.convert(&target)?;
    let base = &context.config.base_currency;
    output::section(format!("Expenses in {}", target));
    for line in &lines {
        output::line(format!(
            "{}: {:.2} {} = {:.2} {} ({})",
            line.description,
            line.original_amount,
            base,
            line.converted_amount,
            line.currency,
            format_currency_value(line.converted_amount, &line.currency)
        ));
    }
    Ok(())
}
