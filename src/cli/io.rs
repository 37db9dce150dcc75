use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt the user for free-form text input. Empty answers are allowed when `allow_empty` is set.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    allow_empty: bool,
) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt until the user enters a finite number.
pub fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_amount(input).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text()
        .map_err(CommandError::from)?;
    parse_amount(&raw)
}

pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a valid amount", raw.trim()))
    })?;
    if !value.is_finite() {
        return Err(CommandError::InvalidArguments(format!(
            "`{}` is not a finite amount",
            raw.trim()
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_and_decimal_amounts() {
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(parse_amount(" -3 ").unwrap(), -3.0);
    }

    #[test]
    fn rejects_text_and_non_finite_amounts() {
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }
}
