//! Channel setup orchestration.
//!
//! `NotReady → Ready → Created → Joined`: ensure the peer is running, create the
//! configured channel from the peer's configuration transaction, then join the
//! peer using the `<channel>.block` file that `create` leaves behind.
//!
//! There is no check for an already existing channel; creating it a second
//! time fails at the create step. A failed join leaves the channel created.

use std::fmt;

use tracing::{debug, error, info};

use crate::config::{Config, Role, Target};
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::peer::{PeerCli, block_file_name};
use crate::runtime::{Confirm, ContainerRuntime, Liveness, Outcome};

/// Progress of one channel setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
  NotReady,
  Ready,
  Created,
  Joined,
}

impl fmt::Display for ChannelState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ChannelState::NotReady => "not-ready",
      ChannelState::Ready => "ready",
      ChannelState::Created => "created",
      ChannelState::Joined => "joined",
    };
    f.write_str(s)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
  pub peer: String,
  pub channel: String,
  pub block_file: String,
  pub liveness: Liveness,
}

pub struct ChannelSetup<'a, R> {
  config: &'a Config,
  runner: &'a R,
}

impl<'a, R: CommandRunner> ChannelSetup<'a, R> {
  pub fn new(config: &'a Config, runner: &'a R) -> Self {
    Self { config, runner }
  }

  /// Create the configured channel on `peer` and join it.
  pub async fn setup(&self, peer: &str, confirm: &impl Confirm) -> Result<Outcome<ChannelReport>> {
    let mut state = ChannelState::NotReady;
    let result = self.run(peer, confirm, &mut state).await;
    if let Err(e) = &result {
      error!(peer = %peer, at = %state, "channel setup failed: {}", e);
    }
    result
  }

  async fn run(&self, peer: &str, confirm: &impl Confirm, state: &mut ChannelState) -> Result<Outcome<ChannelReport>> {
    let spec = self.config.peer(peer)?;
    let target = Target {
      name: peer,
      role: Role::Peer,
      environment: &spec.environment,
    };

    let runtime = ContainerRuntime::new(self.runner, &self.config.docker.compose);
    let liveness = runtime.ensure_running(target.name, confirm).await?;
    if liveness == Liveness::Declined {
      return Ok(Outcome::Declined);
    }
    advance(state, ChannelState::Ready);

    let cli = PeerCli::new(target);
    let channel = self.config.fabric.channel.as_str();
    let orderer = self.config.fabric.orderer.address();
    info!(peer = %target.name, channel = %channel, "creating channel");

    self
      .runner
      .stream(&cli.channel_create(&orderer, channel, &spec.configtx_file))
      .await?;
    advance(state, ChannelState::Created);

    let block_file = block_file_name(channel);
    self.runner.stream(&cli.channel_join(&block_file)).await?;
    advance(state, ChannelState::Joined);

    Ok(Outcome::Completed(ChannelReport {
      peer: target.name.to_string(),
      channel: channel.to_string(),
      block_file,
      liveness,
    }))
  }
}

fn advance(state: &mut ChannelState, next: ChannelState) {
  debug!(from = %state, to = %next, "channel state");
  *state = next;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ConfigError;
  use crate::error::Error;
  use crate::util::testutil::{FakeRunner, FixedConfirm, SAMPLE_CONFIG, docker_ps};
  use tracing_test::traced_test;

  const ENV: &str = r#"-e "CORE_PEER_LOCALMSPID=Org1MSP" -e "CORE_PEER_ADDRESS=peer0.org1.example.com:7051""#;

  fn config() -> Config {
    Config::from_yaml(SAMPLE_CONFIG).unwrap()
  }

  #[tokio::test]
  async fn creates_then_joins_with_channel_block() {
    let config = config();
    let runner = FakeRunner::new().respond("docker ps", docker_ps(&["peer0"]));

    let report = ChannelSetup::new(&config, &runner)
      .setup("peer0", &FixedConfirm::no())
      .await
      .unwrap()
      .completed()
      .unwrap();

    assert_eq!(report.block_file, "mychannel.block");
    assert_eq!(report.channel, "mychannel");
    assert_eq!(
      runner.calls(),
      vec![
        "docker ps".to_string(),
        format!(
          "docker exec {} peer0 peer channel create -o orderer.example.com:7050 -c mychannel -f /etc/hyperledger/configtx/channel.tx",
          ENV
        ),
        format!("docker exec {} peer0 peer channel join -b mychannel.block", ENV),
      ]
    );
  }

  #[tokio::test]
  async fn block_file_follows_channel_name() {
    let mut config = config();
    config.fabric.channel = "supplychannel".to_string();
    let runner = FakeRunner::new().respond("docker ps", docker_ps(&["peer0"]));

    ChannelSetup::new(&config, &runner)
      .setup("peer0", &FixedConfirm::no())
      .await
      .unwrap();

    assert_eq!(runner.calls_matching("-c supplychannel -f").len(), 1);
    assert!(runner.calls().last().unwrap().ends_with("peer channel join -b supplychannel.block"));
  }

  #[tokio::test]
  async fn create_failure_skips_join() {
    let config = config();
    let runner = FakeRunner::new()
      .respond("docker ps", docker_ps(&["peer0"]))
      .fail("channel create", 1);

    let err = ChannelSetup::new(&config, &runner)
      .setup("peer0", &FixedConfirm::no())
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Command(_)));
    assert!(runner.calls_matching("channel join").is_empty());
  }

  #[tokio::test]
  async fn join_failure_is_reported() {
    let config = config();
    let runner = FakeRunner::new()
      .respond("docker ps", docker_ps(&["peer0"]))
      .fail("channel join", 1);

    let err = ChannelSetup::new(&config, &runner)
      .setup("peer0", &FixedConfirm::no())
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Command(_)));
    assert_eq!(runner.calls_matching("channel create").len(), 1);
  }

  #[tokio::test]
  #[traced_test]
  async fn join_failure_is_logged_with_last_state() {
    let config = config();
    let runner = FakeRunner::new()
      .respond("docker ps", docker_ps(&["peer0"]))
      .fail("channel join", 1);

    let _ = ChannelSetup::new(&config, &runner).setup("peer0", &FixedConfirm::no()).await;

    assert!(logs_contain("channel setup failed"));
    assert!(logs_contain("at=created"));
  }

  #[tokio::test]
  async fn declined_start_issues_no_channel_command() {
    let config = config();
    let runner = FakeRunner::new().respond("docker ps", docker_ps(&["cli"]));

    let outcome = ChannelSetup::new(&config, &runner)
      .setup("peer0", &FixedConfirm::no())
      .await
      .unwrap();

    assert_eq!(outcome, Outcome::Declined);
    assert!(runner.calls_matching("peer channel").is_empty());
    assert!(runner.calls_matching("up -d").is_empty());
  }

  #[tokio::test]
  async fn stopped_peer_is_started_then_creates_and_joins() {
    let config = config();
    let runner = FakeRunner::new().respond("docker ps", docker_ps(&[]));
    let confirm = FixedConfirm::yes();

    let report = ChannelSetup::new(&config, &runner)
      .setup("peer0", &confirm)
      .await
      .unwrap()
      .completed()
      .unwrap();

    assert_eq!(report.liveness, Liveness::Started);
    assert_eq!(confirm.asked(), 1);
    assert_eq!(
      runner.calls(),
      vec![
        "docker ps".to_string(),
        "docker-compose -f docker-compose.yml up -d peer0".to_string(),
        format!(
          "docker exec {} peer0 peer channel create -o orderer.example.com:7050 -c mychannel -f /etc/hyperledger/configtx/channel.tx",
          ENV
        ),
        format!("docker exec {} peer0 peer channel join -b mychannel.block", ENV),
      ]
    );
  }

  #[tokio::test]
  async fn client_name_is_not_a_peer() {
    let config = config();
    let runner = FakeRunner::new();

    let err = ChannelSetup::new(&config, &runner)
      .setup("cli", &FixedConfirm::yes())
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::UnknownTarget { role: Role::Peer, .. })));
    assert!(runner.calls().is_empty());
  }
}
