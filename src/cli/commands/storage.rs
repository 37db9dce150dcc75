use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("save", "Write expenses and budgets to disk", "save", cmd_save),
        CommandEntry::new(
            "load",
            "Reload expenses and budgets from disk, discarding unsaved changes",
            "load",
            cmd_load,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.manager.save();
    context.report_save(&report);
    Ok(())
}

fn cmd_load(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.manager.reload();
    context.report_load(&report.warnings);
    output::success(format!(
        "Loaded {} expenses and {} budgets from {}.",
        report.state.expenses.len(),
        report.state.budgets.len(),
        context.data_dir.display()
    ));
    Ok(())
}
