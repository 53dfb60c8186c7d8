//! Error taxonomy shared by the orchestrators.
//!
//! Each failure class has its own type; [`Error`] is what the orchestrators
//! return. Every variant is fatal to the current invocation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::exec::CommandError;
use crate::runtime::StartError;

/// A query whose output drives a decision failed.
#[derive(Debug, Error)]
pub enum QueryError {
  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("unexpected output from `{cmd}`: {reason}")]
  Malformed { cmd: String, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Start(#[from] StartError),

  #[error(transparent)]
  Query(#[from] QueryError),

  #[error(transparent)]
  Command(#[from] CommandError),

  #[error("failed to read confirmation: {0}")]
  Prompt(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
