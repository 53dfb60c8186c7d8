//! Network topology configuration.
//!
//! The configuration is read once per run and passed by reference into each
//! orchestrator. Lookups by name are membership checks: a name that is not in
//! the document is a [`ConfigError::UnknownTarget`] before anything runs.

mod types;

pub use types::{
  ChaincodeSettings, ClientSpec, Config, ConfigError, DockerConfig, FabricConfig, Orderer, PeerSpec, Role, Target,
};

use std::fs;
use std::path::Path;

use tracing::debug;

impl Config {
  /// Load a configuration file from disk.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_yaml(&content)?;
    debug!(
      path = %path.display(),
      peers = config.fabric.peers.len(),
      clients = config.fabric.clients.len(),
      "loaded config"
    );
    Ok(config)
  }

  pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
  }

  pub fn peer(&self, name: &str) -> Result<&PeerSpec, ConfigError> {
    self.fabric.peers.get(name).ok_or_else(|| ConfigError::UnknownTarget {
      role: Role::Peer,
      name: name.to_string(),
    })
  }

  /// Resolve a named container in the given role.
  pub fn target<'a>(&'a self, role: Role, name: &str) -> Result<Target<'a>, ConfigError> {
    let (name, environment) = match role {
      Role::Peer => self
        .fabric
        .peers
        .get_key_value(name)
        .map(|(k, spec)| (k.as_str(), spec.environment.as_slice())),
      Role::Client => self
        .fabric
        .clients
        .get_key_value(name)
        .map(|(k, spec)| (k.as_str(), spec.environment.as_slice())),
    }
    .ok_or_else(|| ConfigError::UnknownTarget {
      role,
      name: name.to_string(),
    })?;

    Ok(Target { name, role, environment })
  }

  /// Names configured for a role, in sorted order.
  pub fn names(&self, role: Role) -> Vec<&str> {
    match role {
      Role::Peer => self.fabric.peers.keys().map(String::as_str).collect(),
      Role::Client => self.fabric.clients.keys().map(String::as_str).collect(),
    }
  }
}

/// Check that a chaincode name can be placed on a shell command line as is.
pub fn validate_chaincode_name(name: &str) -> Result<(), ConfigError> {
  let valid = !name.is_empty()
    && name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
  if valid {
    Ok(())
  } else {
    Err(ConfigError::InvalidChaincodeName { name: name.to_string() })
  }
}
