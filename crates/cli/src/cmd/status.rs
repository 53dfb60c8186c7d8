//! Status command implementation.
//!
//! Lists configured peers and clients with their running state.

use std::path::Path;

use anyhow::{Context, Result};
use fabctl_lib::config::Role;
use fabctl_lib::exec::ShellRunner;
use fabctl_lib::runtime::ContainerRuntime;

use super::{block_on, load_config};
use crate::output::{OutputFormat, container_row, print_json, print_stat};

pub fn cmd_status(config_path: &Path, format: OutputFormat) -> Result<()> {
  let config = load_config(config_path)?;
  let runner = ShellRunner;
  let runtime = ContainerRuntime::new(&runner, &config.docker.compose);
  let running = block_on(runtime.running_containers())?.context("Failed to list containers")?;

  let entries: Vec<(Role, &str, bool)> = [Role::Peer, Role::Client]
    .into_iter()
    .flat_map(|role| config.names(role).into_iter().map(move |name| (role, name)))
    .map(|(role, name)| (role, name, running.iter().any(|c| c == name)))
    .collect();

  if format.is_json() {
    let items: Vec<_> = entries
      .iter()
      .map(|(role, name, up)| serde_json::json!({ "name": name, "role": role, "running": up }))
      .collect();
    let json_output = serde_json::json!({
      "channel": config.fabric.channel,
      "orderer": config.fabric.orderer.address(),
      "containers": items,
    });
    return print_json(&json_output);
  }

  print_stat("Channel", &config.fabric.channel);
  print_stat("Orderer", &config.fabric.orderer.address());
  println!();
  for (role, name, up) in &entries {
    println!("{}", container_row(*role, name, *up));
  }

  Ok(())
}
