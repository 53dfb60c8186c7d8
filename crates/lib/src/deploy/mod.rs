//! Chaincode deployment orchestration.
//!
//! A run walks `NotReady → Ready → Installed → Deployed`:
//!
//! 1. make sure the target container is running (asking before starting it)
//! 2. count the chaincode's instantiated entries on the channel
//! 3. install under a freshly allocated version
//! 4. instantiate when the count is zero, upgrade otherwise
//!
//! The chaincode name is checked before any command runs. A failing step stops
//! the run and is logged with the last state reached. Nothing is rolled back: a
//! failed activation leaves the installed package on the peer.

mod types;

pub use types::{ChaincodeDescriptor, DeployReport, DeployRequest, DeployState};

use tracing::{debug, error, info};

use crate::config::{ChaincodeSettings, Config, validate_chaincode_name};
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::peer::{ActivateArgs, Activation, PeerCli};
use crate::registry::count_instantiated;
use crate::runtime::{Confirm, ContainerRuntime, Liveness, Outcome};
use crate::version::{Clock, SystemClock, allocate_version};

pub struct ChaincodeDeployer<'a, R, C = SystemClock> {
  config: &'a Config,
  runner: &'a R,
  clock: C,
  settings: ChaincodeSettings,
}

impl<'a, R: CommandRunner> ChaincodeDeployer<'a, R, SystemClock> {
  pub fn new(config: &'a Config, runner: &'a R) -> Self {
    Self::with_clock(config, runner, SystemClock)
  }
}

impl<'a, R: CommandRunner, C: Clock> ChaincodeDeployer<'a, R, C> {
  pub fn with_clock(config: &'a Config, runner: &'a R, clock: C) -> Self {
    Self {
      config,
      runner,
      clock,
      settings: config.chaincode.clone(),
    }
  }

  /// Replace the configured chaincode settings for this deployer.
  pub fn settings(mut self, settings: ChaincodeSettings) -> Self {
    self.settings = settings;
    self
  }

  /// Deploy a chaincode to the requested target.
  ///
  /// Returns [`Outcome::Declined`] without issuing any peer command when the
  /// target is stopped and the operator declines to start it.
  pub async fn deploy(&self, request: &DeployRequest<'_>, confirm: &impl Confirm) -> Result<Outcome<DeployReport>> {
    let mut state = DeployState::NotReady;
    let result = self.run(request, confirm, &mut state).await;
    if let Err(e) = &result {
      error!(chaincode = %request.chaincode, container = %request.target, at = %state, "deployment failed: {}", e);
    }
    result
  }

  async fn run(
    &self,
    request: &DeployRequest<'_>,
    confirm: &impl Confirm,
    state: &mut DeployState,
  ) -> Result<Outcome<DeployReport>> {
    validate_chaincode_name(request.chaincode)?;
    let target = self.config.target(request.role, request.target)?;

    let runtime = ContainerRuntime::new(self.runner, &self.config.docker.compose);
    let liveness = runtime.ensure_running(target.name, confirm).await?;
    if liveness == Liveness::Declined {
      return Ok(Outcome::Declined);
    }
    advance(state, DeployState::Ready);

    let peer = PeerCli::new(target);
    let channel = self.config.fabric.channel.as_str();

    let instantiated = count_instantiated(self.runner, &peer, channel, request.chaincode).await?;
    let activation = Activation::for_count(instantiated);
    let chaincode = self.descriptor(request.chaincode);
    info!(
      chaincode = %chaincode.name,
      version = %chaincode.version,
      activation = %activation,
      "deploying chaincode"
    );

    self
      .runner
      .stream(&peer.install(&chaincode.name, &chaincode.version, &chaincode.install_path))
      .await?;
    advance(state, DeployState::Installed);

    let orderer = self.config.fabric.orderer.address();
    let args = ActivateArgs {
      orderer: &orderer,
      channel,
      name: &chaincode.name,
      version: &chaincode.version,
      init_args: &chaincode.init_args,
      policy: &chaincode.policy,
    };
    self.runner.stream(&peer.activate(activation, &args)).await?;
    advance(state, DeployState::Deployed(activation));

    Ok(Outcome::Completed(DeployReport {
      target: target.name.to_string(),
      chaincode,
      activation,
      instantiated,
      liveness,
    }))
  }

  /// Descriptor for one attempt, with a newly allocated version.
  pub fn descriptor(&self, name: &str) -> ChaincodeDescriptor {
    ChaincodeDescriptor {
      name: name.to_string(),
      version: allocate_version(self.clock.now()),
      install_path: self.settings.install_path(name),
      init_args: self.settings.init_args.clone(),
      policy: self.settings.policy.clone(),
    }
  }
}

fn advance(state: &mut DeployState, next: DeployState) {
  debug!(from = %state, to = %next, "deploy state");
  *state = next;
}
