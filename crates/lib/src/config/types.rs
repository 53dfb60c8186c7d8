//! Topology configuration types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_CHAINCODE_PATH_TEMPLATE, DEFAULT_ENDORSEMENT_POLICY, DEFAULT_INIT_ARGS};

/// Errors raised while loading the configuration or looking up targets in it.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("{role} '{name}' is not defined in the configuration")]
  UnknownTarget { role: Role, name: String },

  #[error("invalid chaincode name '{name}': only letters, digits, '_', '-' and '.' are allowed")]
  InvalidChaincodeName { name: String },
}

/// Whole configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  pub docker: DockerConfig,
  pub fabric: FabricConfig,
  #[serde(default)]
  pub chaincode: ChaincodeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
  /// Path to the docker-compose manifest defining every service.
  pub compose: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricConfig {
  /// Channel every peer creates/joins and every chaincode is deployed on.
  pub channel: String,
  pub orderer: Orderer,
  #[serde(default)]
  pub peers: BTreeMap<String, PeerSpec>,
  #[serde(default)]
  pub clients: BTreeMap<String, ClientSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderer {
  pub host: String,
  pub port: u16,
}

impl Orderer {
  /// `host:port` as passed to `peer ... -o`.
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeerSpec {
  /// `KEY=VALUE` assignments passed to `docker exec -e`, in order.
  #[serde(default)]
  pub environment: Vec<String>,
  /// Channel configuration transaction used by `peer channel create -f`.
  pub configtx_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSpec {
  #[serde(default)]
  pub environment: Vec<String>,
}

/// Chaincode deployment defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeSettings {
  /// Install path convention; `{name}` is replaced with the chaincode name.
  pub path_template: String,
  /// Constructor arguments JSON passed with `-c`.
  pub init_args: String,
  /// Endorsement policy expression passed with `-P`.
  pub policy: String,
}

impl Default for ChaincodeSettings {
  fn default() -> Self {
    Self {
      path_template: DEFAULT_CHAINCODE_PATH_TEMPLATE.to_string(),
      init_args: DEFAULT_INIT_ARGS.to_string(),
      policy: DEFAULT_ENDORSEMENT_POLICY.to_string(),
    }
  }
}

impl ChaincodeSettings {
  pub fn install_path(&self, name: &str) -> String {
    self.path_template.replace("{name}", name)
  }
}

/// Role a container plays in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Peer,
  Client,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Peer => "peer",
      Role::Client => "client",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A resolved `(container, role)` pair plus the environment used to exec into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
  pub name: &'a str,
  pub role: Role,
  pub environment: &'a [String],
}
