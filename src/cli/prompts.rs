//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask before replacing an existing file
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    confirm_step(&format!("{} already exists. Overwrite?", path.display()))
}
