use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{apply_output_preferences, ShellContext};
use crate::currency::{CurrencyCode, FIXED_RATE};

const SET_USAGE: &str = "usage: config set <base_currency|default_rate|color> <value>";
const RATE_USAGE: &str = "usage: config rate <CURRENCY> <rate|clear>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences and conversion rates",
        "config [show | set <key> <value> | rate <CURRENCY> <rate|clear>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value] => set_value(context, key, value),
        ["set", ..] => Err(CommandError::InvalidArguments(SET_USAGE.into())),
        ["rate", code, value] => set_rate(context, code, value),
        ["rate", ..] => Err(CommandError::InvalidArguments(RATE_USAGE.into())),
        [other, ..] => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::line(format!("  base_currency : {}", config.base_currency));
    output::line(format!(
        "  default_rate  : {:.2}",
        config.conversion.default_rate
    ));
    for (code, rate) in &config.conversion.overrides {
        output::line(format!("  rate {}      : {:.4}", code, rate));
    }
    output::line(format!(
        "  color         : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    output::line(format!("  data_dir      : {}", context.data_dir.display()));
    output::line(format!(
        "  config file   : {}",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    match key.to_lowercase().as_str() {
        "base_currency" => {
            let code = CurrencyCode::parse(value)?;
            context.config.base_currency = code.to_string();
        }
        "default_rate" => {
            let rate = if value.eq_ignore_ascii_case("reset") {
                FIXED_RATE
            } else {
                parse_rate(value)?
            };
            context.config.conversion.default_rate = rate;
        }
        "color" => {
            context.config.ui_color_enabled = parse_switch(value)?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`; {}",
                other, SET_USAGE
            )))
        }
    }
    persist(context)?;
    output::success(format!("Updated `{}`.", key));
    Ok(())
}

fn set_rate(context: &mut ShellContext, code: &str, value: &str) -> CommandResult {
    let code = CurrencyCode::parse(code)?;
    if value.eq_ignore_ascii_case("clear") {
        if context.config.conversion.clear_override(&code).is_none() {
            output::info(format!("No rate override for {}.", code));
            return Ok(());
        }
    } else {
        let rate = parse_rate(value)?;
        context.config.conversion.set_override(code.clone(), rate);
    }
    persist(context)?;
    output::success(format!(
        "{} now converts at {:.4}.",
        code,
        context.config.conversion.rate_for(&code)
    ));
    Ok(())
}

fn persist(context: &mut ShellContext) -> CommandResult {
    context.config_manager.save(&context.config)?;
    context
        .manager
        .set_rates(context.config.conversion.clone());
    apply_output_preferences(context.mode, &context.config);
    Ok(())
}

fn parse_rate(raw: &str) -> Result<f64, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not a positive conversion rate",
            raw
        ))),
    }
}

fn parse_switch(raw: &str) -> Result<bool, CommandError> {
    match raw.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not on/off",
            raw
        ))),
    }
}
