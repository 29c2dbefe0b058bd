//! The cleanup command: log in, then hand the session to the cleanup flow.

use crate::cli::{CliContext, Password, EXIT_SESSION_FAILED};
use crate::core::cleanup::{self, CleanupPlan};
use crate::core::session::Session;
use crate::util::prompt::{AssumeYes, Confirmer, Interactive};
use anyhow::Result;
use std::io;
use std::process::ExitCode;
use tracing::info;

/// Which controller to connect to, and as whom.
#[derive(Debug)]
pub struct Target {
    pub master: String,
    pub username: String,
    pub password: Password,
}

pub fn run(ctx: &CliContext, target: Target) -> Result<ExitCode> {
    let session = match Session::login(
        &target.master,
        &target.username,
        target.password.expose(),
        &ctx.client,
    ) {
        Ok(session) => session,
        Err(e) => {
            println!("Failed to create XenAPI session on host: {}", e);
            return Ok(ExitCode::from(EXIT_SESSION_FAILED));
        }
    };
    info!(endpoint = %session.endpoint(), "session established");

    let confirmer: Box<dyn Confirmer> = if ctx.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(Interactive)
    };
    let plan = CleanupPlan {
        marker_key: ctx.marker_key.clone(),
        dry_run: ctx.dry_run,
    };

    let mut stdout = io::stdout().lock();
    let outcome = cleanup::run_cleanup(&session, confirmer.as_ref(), &plan, &mut stdout)?;
    info!(?outcome, "cleanup finished");
    // Declining the prompt is not a failure.
    Ok(ExitCode::SUCCESS)
}
