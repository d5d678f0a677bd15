//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::error::{Result, TdsError};

use super::Prompt;

/// Convert dialoguer errors to TdsError.
fn map_dialoguer_err(e: dialoguer::Error) -> TdsError {
    TdsError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input, blocking until they answer.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    if prompt.secret {
        Password::with_theme(&prompt_theme())
            .with_prompt(&prompt.question)
            .allow_empty_password(true)
            .interact_on(term)
            .map_err(map_dialoguer_err)
    } else {
        Input::<String>::with_theme(&prompt_theme())
            .with_prompt(&prompt.question)
            .interact_on(term)
            .map_err(map_dialoguer_err)
    }
}
