//! Container runtime gateway.
//!
//! Thin adapter over `docker ps` and `docker-compose up`. The only decision made
//! here is whether a name is in the running set.

mod compose;

pub use compose::ComposeManifest;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::error::{Error, QueryError};
use crate::exec::{CommandError, CommandRunner};

const PS_COMMAND: &str = "docker ps";

/// Errors raised while bringing containers up.
#[derive(Debug, Error)]
pub enum StartError {
  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("failed to read compose manifest {}: {source}", path.display())]
  ManifestRead { path: PathBuf, source: io::Error },

  #[error("failed to parse compose manifest {}: {source}", path.display())]
  ManifestParse {
    path: PathBuf,
    source: serde_yaml::Error,
  },
}

/// Operator capability asked before a stopped container is started.
pub trait Confirm {
  fn confirm(&self, message: &str) -> io::Result<bool>;
}

/// Outcome of [`ContainerRuntime::ensure_running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
  AlreadyRunning,
  Started,
  /// The container was stopped and the operator chose not to start it.
  Declined,
}

/// Result of an orchestration that may be abandoned at the start prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  Completed(T),
  /// The target was stopped and the operator declined to start it. Nothing ran.
  Declined,
}

impl<T> Outcome<T> {
  pub fn completed(self) -> Option<T> {
    match self {
      Outcome::Completed(value) => Some(value),
      Outcome::Declined => None,
    }
  }
}

pub struct ContainerRuntime<'a, R> {
  runner: &'a R,
  compose_file: &'a Path,
}

impl<'a, R: CommandRunner> ContainerRuntime<'a, R> {
  pub fn new(runner: &'a R, compose_file: &'a Path) -> Self {
    Self { runner, compose_file }
  }

  /// Names of all currently running containers.
  pub async fn running_containers(&self) -> Result<Vec<String>, QueryError> {
    let output = self.runner.capture(PS_COMMAND).await?;
    parse_container_names(&output).ok_or_else(|| QueryError::Malformed {
      cmd: PS_COMMAND.to_string(),
      reason: "missing header line".to_string(),
    })
  }

  pub async fn is_running(&self, name: &str) -> Result<bool, QueryError> {
    let running = self.running_containers().await?;
    Ok(running.iter().any(|c| c == name))
  }

  /// Start exactly one service. `docker-compose up -d` is a no-op for a running service.
  pub async fn start_one(&self, name: &str) -> Result<(), StartError> {
    self.start_many(&[name]).await
  }

  /// Start the named services in one compose call. An empty list starts nothing.
  pub async fn start_many(&self, names: &[&str]) -> Result<(), StartError> {
    if names.is_empty() {
      return Ok(());
    }
    self.runner.stream(&self.up_command(names)).await?;
    Ok(())
  }

  /// Start every service in the compose manifest.
  pub async fn start_all(&self) -> Result<(), StartError> {
    self.runner.stream(&self.up_command(&[])).await?;
    Ok(())
  }

  /// Service names declared in the compose manifest.
  pub fn services(&self) -> Result<Vec<String>, StartError> {
    Ok(ComposeManifest::load(self.compose_file)?.service_names())
  }

  /// Make sure `name` is running, asking before starting it.
  ///
  /// A running container is never started again. A declined prompt is not an
  /// error; callers stop quietly on [`Liveness::Declined`].
  pub async fn ensure_running(&self, name: &str, confirm: &impl Confirm) -> Result<Liveness, Error> {
    if self.is_running(name).await? {
      debug!(container = %name, "container already running");
      return Ok(Liveness::AlreadyRunning);
    }

    let message = format!("Container '{}' is not running. Start it?", name);
    if !confirm.confirm(&message).map_err(Error::Prompt)? {
      info!(container = %name, "start declined");
      return Ok(Liveness::Declined);
    }

    info!(container = %name, "starting container");
    self.start_one(name).await?;
    Ok(Liveness::Started)
  }

  fn up_command(&self, names: &[&str]) -> String {
    let mut cmd = format!("docker-compose -f {} up -d", self.compose_file.display());
    for name in names {
      cmd.push(' ');
      cmd.push_str(name);
    }
    cmd
  }
}

/// Parse `docker ps` output: skip the header, take the last field of each line.
///
/// Returns `None` when there is no header line at all.
pub fn parse_container_names(output: &str) -> Option<Vec<String>> {
  let mut lines = output.lines();
  lines.next()?;
  Some(
    lines
      .filter_map(|line| line.split_whitespace().last())
      .map(str::to_string)
      .collect(),
  )
}
