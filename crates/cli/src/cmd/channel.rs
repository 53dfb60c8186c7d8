//! Implementation of the `fabctl channel` command.

use std::path::Path;

use anyhow::{Context, Result};
use fabctl_lib::channel::ChannelSetup;
use fabctl_lib::config::Role;
use fabctl_lib::exec::ShellRunner;
use fabctl_lib::runtime::Outcome;

use super::{block_on, load_config, resolve_target};
use crate::output::{print_info, print_stat, print_step, print_success};
use crate::prompts::StdinConfirm;

/// Create the configured channel on a peer and join the peer to it.
pub fn cmd_channel(config_path: &Path, peer: Option<String>, yes: bool) -> Result<()> {
  let config = load_config(config_path)?;
  let peer = resolve_target(&config, Role::Peer, peer, "to set up the channel on")?;

  let runner = ShellRunner;
  let setup = ChannelSetup::new(&config, &runner);
  let confirm = StdinConfirm { force: yes };

  print_step(&format!("Setting up channel {} on {}", config.fabric.channel, peer));
  let outcome = block_on(setup.setup(&peer, &confirm))?.context("Channel setup failed")?;

  match outcome {
    Outcome::Completed(report) => {
      print_success(&format!("{} joined channel {}", report.peer, report.channel));
      print_stat("Block", &report.block_file);
    }
    Outcome::Declined => print_info(&format!("'{}' is not running; channel not set up.", peer)),
  }

  Ok(())
}
