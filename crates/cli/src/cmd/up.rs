//! Implementation of the `fabctl up` command.

use std::path::Path;

use anyhow::{Context, Result};
use fabctl_lib::exec::ShellRunner;
use fabctl_lib::runtime::{ComposeManifest, ContainerRuntime};

use super::{block_on, load_config};
use crate::output::{print_info, print_step, print_success, print_warning};
use crate::prompts;

/// Start all services, the named ones, or an interactively chosen set.
///
/// Named services missing from the compose manifest are skipped with a warning.
pub fn cmd_up(config_path: &Path, all: bool, targets: &[String]) -> Result<()> {
  let config = load_config(config_path)?;
  let compose = &config.docker.compose;
  let runner = ShellRunner;
  let runtime = ContainerRuntime::new(&runner, compose);

  if all {
    print_step("Starting all containers");
    block_on(runtime.start_all())?.context("Failed to start containers")?;
    print_success("All containers started");
    return Ok(());
  }

  let selected: Vec<String> = if targets.is_empty() {
    let services = runtime.services()?;
    let names: Vec<&str> = services.iter().map(String::as_str).collect();
    prompts::select_many("Select containers to start (space separated):", &names)?
      .into_iter()
      .map(|i| services[i].clone())
      .collect()
  } else {
    let manifest = ComposeManifest::load(compose)?;
    targets
      .iter()
      .filter(|name| {
        let known = manifest.contains(name);
        if !known {
          print_warning(&format!("Container '{}' is not defined in {}", name, compose.display()));
        }
        known
      })
      .cloned()
      .collect()
  };

  if selected.is_empty() {
    print_info("Nothing to start.");
    return Ok(());
  }

  let names: Vec<&str> = selected.iter().map(String::as_str).collect();
  print_step(&format!("Starting {}", names.join(", ")));
  block_on(runtime.start_many(&names))?.context("Failed to start containers")?;
  print_success(&format!("Started {} container(s)", names.len()));

  Ok(())
}
