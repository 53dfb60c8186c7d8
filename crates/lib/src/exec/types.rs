//! Error type for external command execution.

use thiserror::Error;

/// Errors raised when an external command cannot run or exits unsuccessfully.
#[derive(Debug, Error)]
pub enum CommandError {
  /// The shell could not be spawned at all.
  #[error("failed to spawn command `{cmd}`: {source}")]
  Spawn { cmd: String, source: std::io::Error },

  /// The command ran and exited non-zero (or was killed by a signal).
  #[error("command failed with exit code {}: {cmd}{}", exit_code(.code), stderr_suffix(.stderr))]
  Failed {
    cmd: String,
    code: Option<i32>,
    /// Captured stderr. Empty for streamed commands, whose stderr went to the terminal.
    stderr: String,
  },
}

fn exit_code(code: &Option<i32>) -> String {
  match code {
    Some(code) => code.to_string(),
    None => "none (terminated by signal)".to_string(),
  }
}

fn stderr_suffix(stderr: &str) -> String {
  if stderr.is_empty() {
    String::new()
  } else {
    format!("\n{}", stderr)
  }
}
