//! Compose manifest reading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::StartError;

/// The part of a docker-compose file this tool reads: the service names.
#[derive(Debug, Deserialize)]
pub struct ComposeManifest {
  #[serde(default)]
  services: BTreeMap<String, serde_yaml::Value>,
}

impl ComposeManifest {
  pub fn load(path: &Path) -> Result<Self, StartError> {
    let content = fs::read_to_string(path).map_err(|source| StartError::ManifestRead {
      path: path.to_path_buf(),
      source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| StartError::ManifestParse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn service_names(&self) -> Vec<String> {
    self.services.keys().cloned().collect()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.services.contains_key(name)
  }
}
