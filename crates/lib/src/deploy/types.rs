//! Types for chaincode deployment.

use std::fmt;

use crate::config::Role;
use crate::peer::Activation;
use crate::runtime::Liveness;

/// What to deploy and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployRequest<'a> {
  /// Container the peer CLI runs in.
  pub target: &'a str,
  /// Whether `target` is looked up among clients or peers.
  pub role: Role,
  pub chaincode: &'a str,
}

/// Everything the install and activation commands need for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeDescriptor {
  pub name: String,
  /// Fresh per attempt, shared by install and activation.
  pub version: String,
  pub install_path: String,
  pub init_args: String,
  pub policy: String,
}

/// Progress of one deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
  NotReady,
  Ready,
  Installed,
  Deployed(Activation),
}

impl fmt::Display for DeployState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DeployState::NotReady => f.write_str("not-ready"),
      DeployState::Ready => f.write_str("ready"),
      DeployState::Installed => f.write_str("installed"),
      DeployState::Deployed(Activation::Instantiate) => f.write_str("instantiated"),
      DeployState::Deployed(Activation::Upgrade) => f.write_str("upgraded"),
    }
  }
}

/// Summary of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
  pub target: String,
  pub chaincode: ChaincodeDescriptor,
  pub activation: Activation,
  /// Entries found in the registry before deploying.
  pub instantiated: usize,
  pub liveness: Liveness,
}
