//! Operator confirmation before destructive actions.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use tracing::info;

pub trait Confirmer {
    /// Show `prompt` and return whether the operator agreed.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Asks on the terminal; defaults to "no".
pub struct Interactive;

impl Confirmer for Interactive {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .wait_for_newline(true)
            .interact()
            .context("read confirmation (use --yes when no terminal is attached)")
    }
}

/// Agrees without asking, for `--yes`.
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        info!(prompt, "confirmation skipped (--yes)");
        Ok(true)
    }
}
