use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Set or list per-category budgets",
        "budget [list | set <category> <amount>]",
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => list_budgets(context),
        ["set", category, amount] => set_budget(context, category, cli_io::parse_amount(amount)?),
        ["set"] if context.can_prompt() => {
            let category = cli_io::prompt_text(&context.theme, "Category", false)?;
            if let Some(current) = context.manager.ledger().budget_for(&category) {
                output::info(format!("Current budget for {}: {:.2}", category, current));
            }
            let amount = cli_io::prompt_amount(&context.theme, "Budget amount")?;
            set_budget(context, &category, amount)
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: budget [list | set <category> <amount>]".into(),
        )),
    }
}

fn set_budget(context: &mut ShellContext, category: &str, amount: f64) -> CommandResult {
    let update = context.manager.set_budget(category, amount)?;
    if let Some(previous) = update.previous {
        output::info(format!("Previous budget for {}: {:.2}", category, previous));
    }
    output::success(format!(
        "Budget set successfully for the category: {} ({:.2})",
        category, amount
    ));
    context.report_save(&update.save);
    Ok(())
}

fn list_budgets(context: &mut ShellContext) -> CommandResult {
    let budgets = context.manager.list_budgets();
    if budgets.is_empty() {
        output::info("No budgets set.");
        return Ok(());
    }
    output::section("Budgets");
    for (category, amount) in budgets {
        output::line(format!("{}: {:.2}", category, amount));
    }
    Ok(())
}
