//! External command execution.
//!
//! Every interaction with the container runtime and the peer CLI goes through a
//! [`CommandRunner`]. Commands are plain shell lines so that the exact text that
//! runs is the text that gets logged.

mod types;

pub use types::CommandError;

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

/// Runs shell command lines to completion, one at a time.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  /// Run a command and return its stdout (trimmed).
  ///
  /// Used for queries whose output is parsed (`docker ps`, registry listings).
  async fn capture(&self, cmd: &str) -> Result<String, CommandError>;

  /// Run a command with stdout/stderr attached to the terminal.
  ///
  /// Used for actions (install, instantiate, channel create...) whose own
  /// diagnostics should reach the operator unwrapped.
  async fn stream(&self, cmd: &str) -> Result<(), CommandError>;
}

/// Shell every command line is handed to.
const SHELL: &str = "/bin/sh";

/// [`CommandRunner`] that runs each line with `/bin/sh -c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
  fn command(&self, cmd: &str) -> Command {
    let mut command = Command::new(SHELL);
    command.arg("-c").arg(cmd);
    command
  }
}

impl CommandRunner for ShellRunner {
  async fn capture(&self, cmd: &str) -> Result<String, CommandError> {
    info!(cmd = %cmd, "executing command");

    let output = self
      .command(cmd)
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|source| CommandError::Spawn {
        cmd: cmd.to_string(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      if !stdout.is_empty() {
        debug!(stdout = %stdout, "command stdout");
      }
      return Err(CommandError::Failed {
        cmd: cmd.to_string(),
        code: output.status.code(),
        stderr,
      });
    }

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command output");
    }

    Ok(stdout)
  }

  async fn stream(&self, cmd: &str) -> Result<(), CommandError> {
    info!(cmd = %cmd, "executing command");

    let status = self
      .command(cmd)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .status()
      .await
      .map_err(|source| CommandError::Spawn {
        cmd: cmd.to_string(),
        source,
      })?;

    if !status.success() {
      return Err(CommandError::Failed {
        cmd: cmd.to_string(),
        code: status.code(),
        stderr: String::new(),
      });
    }

    Ok(())
  }
}
