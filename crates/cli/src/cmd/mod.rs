mod channel;
mod deploy;
mod status;
mod up;

pub use channel::cmd_channel;
pub use deploy::{DeployArgs, cmd_deploy};
pub use status::cmd_status;
pub use up::cmd_up;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use fabctl_lib::config::{Config, Role};
use tracing::debug;

use crate::prompts;

/// Load the configuration file named on the command line.
fn load_config(path: &Path) -> Result<Config> {
  debug!(path = %path.display(), "loading configuration");
  Config::load(path).with_context(|| format!("Failed to load configuration {}", path.display()))
}

/// Drive one orchestration to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  Ok(rt.block_on(future))
}

/// Use the name given on the command line, or let the operator pick one.
///
/// A given name is passed through unchecked; membership is verified by the
/// orchestrators before anything runs.
fn resolve_target(config: &Config, role: Role, given: Option<String>, purpose: &str) -> Result<String> {
  if let Some(name) = given {
    return Ok(name);
  }
  let names = config.names(role);
  let title = format!("Select the {} {}:", role, purpose);
  let index = prompts::select(&title, &names)?;
  Ok(names[index].to_string())
}
