//! Implementation of the `fabctl deploy` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use fabctl_lib::config::{ChaincodeSettings, Role};
use fabctl_lib::deploy::{ChaincodeDeployer, DeployRequest};
use fabctl_lib::exec::ShellRunner;
use fabctl_lib::runtime::{Liveness, Outcome};

use super::{block_on, load_config, resolve_target};
use crate::output::{format_duration, print_info, print_stat, print_step, print_success};
use crate::prompts::{self, StdinConfirm};

pub struct DeployArgs {
  pub target: Option<String>,
  pub chaincode: Option<String>,
  pub role: Role,
  pub policy: Option<String>,
  pub init_args: Option<String>,
  pub path_template: Option<String>,
  pub yes: bool,
}

/// Execute the deploy command.
///
/// Resolves the target and chaincode (prompting for whatever was not given),
/// then installs the chaincode and instantiates or upgrades it depending on
/// whether it is already instantiated on the channel.
pub fn cmd_deploy(config_path: &Path, args: DeployArgs) -> Result<()> {
  let config = load_config(config_path)?;
  let target = resolve_target(&config, args.role, args.target, "to deploy from")?;
  let chaincode = match args.chaincode {
    Some(name) => name,
    None => prompts::input("Enter the name of the chaincode to deploy.")?,
  };

  let settings = ChaincodeSettings {
    path_template: args.path_template.unwrap_or_else(|| config.chaincode.path_template.clone()),
    init_args: args.init_args.unwrap_or_else(|| config.chaincode.init_args.clone()),
    policy: args.policy.unwrap_or_else(|| config.chaincode.policy.clone()),
  };

  let runner = ShellRunner;
  let deployer = ChaincodeDeployer::new(&config, &runner).settings(settings);
  let request = DeployRequest {
    target: &target,
    role: args.role,
    chaincode: &chaincode,
  };
  let confirm = StdinConfirm { force: args.yes };

  print_step(&format!(
    "Deploying chaincode '{}' via {} on channel {}",
    chaincode, target, config.fabric.channel
  ));
  let started = Instant::now();
  let outcome = block_on(deployer.deploy(&request, &confirm))?.context("Deploy failed")?;

  let report = match outcome {
    Outcome::Completed(report) => report,
    Outcome::Declined => {
      print_info(&format!("'{}' is not running; nothing deployed.", target));
      return Ok(());
    }
  };

  print_success(&format!(
    "Chaincode {} {}d as {}",
    report.chaincode.name, report.activation, report.chaincode.version
  ));
  if report.liveness == Liveness::Started {
    print_stat("Started", &report.target);
  }
  print_stat("Previously instantiated", &report.instantiated.to_string());
  print_stat("Path", &report.chaincode.install_path);
  print_stat("Policy", &report.chaincode.policy);
  print_stat("Took", &format_duration(started.elapsed()));

  Ok(())
}
