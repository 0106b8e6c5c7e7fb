//! Interactive prompts for values the command line left out.

use std::io::{self, ErrorKind, IsTerminal};
use std::path::Path;

use dialoguer::{Error as DialoguerError, Input, Select};

use crate::domain::{AppError, Param, SiteKind};

/// Prompts are only offered when both ends are attached to a terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

pub fn select_site() -> Result<Option<SiteKind>, AppError> {
    let items: Vec<String> = SiteKind::ALL
        .iter()
        .map(|kind| format!("{}: {}", kind.cli_name(), kind.description()))
        .collect();
    let selection = Select::new()
        .with_prompt("Select site")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::Prompt(format!("Failed to select site: {}", err)))?;

    Ok(selection.map(|index| SiteKind::ALL[index]))
}

pub fn param_value(kind: SiteKind, param: Param) -> Result<Option<String>, AppError> {
    let prompt = format!("Site '{}' requires {}", kind.cli_name(), param.describe());
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|value: &String| check_answer(param, value));
    match input.interact_text() {
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Prompt(format!("Failed to read {}: {}", param.describe(), err))),
    }
}

/// Reject answers that validation would refuse later on.
fn check_answer(param: Param, value: &str) -> Result<(), &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("a value is required");
    }
    if param == Param::RemoteScratch && !Path::new(value).is_absolute() {
        return Err("the remote scratch directory must be an absolute path");
    }
    Ok(())
}
