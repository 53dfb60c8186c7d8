//! Test utilities for fabctl-lib.
//!
//! Provides a sample topology and a [`FakeRunner`] that records every command
//! line and answers from scripted responses instead of touching docker.

use std::cell::Cell;
use std::io;
use std::sync::Mutex;

use chrono::NaiveDateTime;

use crate::exec::{CommandError, CommandRunner};
use crate::runtime::Confirm;
use crate::version::Clock;

pub const SAMPLE_CONFIG: &str = r#"docker:
  compose: docker-compose.yml
fabric:
  channel: mychannel
  orderer:
    host: orderer.example.com
    port: 7050
  peers:
    peer0:
      environment:
        - CORE_PEER_LOCALMSPID=Org1MSP
        - CORE_PEER_ADDRESS=peer0.org1.example.com:7051
      configtx_file: /etc/hyperledger/configtx/channel.tx
  clients:
    cli:
      environment: []
"#;

/// `docker ps` output with the given container names running.
pub fn docker_ps(names: &[&str]) -> String {
  let mut out = String::from("CONTAINER ID        IMAGE               COMMAND             CREATED             STATUS              PORTS               NAMES");
  for (i, name) in names.iter().enumerate() {
    out.push_str(&format!(
      "\n{:012x}        hyperledger/fabric-peer   \"peer node start\"   2 minutes ago   Up 2 minutes   0.0.0.0:7051->7051/tcp   {}",
      i + 1,
      name
    ));
  }
  out
}

/// `peer chaincode list --instantiated` output listing the given chaincode names.
pub fn instantiated_listing(names: &[&str]) -> String {
  let mut out = String::from("Get instantiated chaincodes on channel mychannel:");
  for name in names {
    out.push_str(&format!(
      "\nName: {}, Version: v20180101000000, Path: github.com/{}/go, Escc: escc, Vscc: vscc",
      name, name
    ));
  }
  out
}

type Responder = Box<dyn Fn(&str) -> Option<Result<String, CommandError>> + Send>;

/// Records every command line; answers from responders in registration order.
///
/// Commands no responder claims succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
  calls: Mutex<Vec<String>>,
  responders: Vec<Responder>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reply with `stdout` to any command containing `pattern`.
  pub fn respond(mut self, pattern: &str, stdout: impl Into<String>) -> Self {
    let pattern = pattern.to_string();
    let stdout = stdout.into();
    self
      .responders
      .push(Box::new(move |cmd: &str| {
        cmd.contains(&pattern).then(|| Ok::<_, CommandError>(stdout.clone()))
      }));
    self
  }

  /// Fail any command containing `pattern` with the given exit code.
  pub fn fail(mut self, pattern: &str, code: i32) -> Self {
    let pattern = pattern.to_string();
    self.responders.push(Box::new(move |cmd: &str| {
      cmd.contains(&pattern).then(|| {
        Err::<String, _>(CommandError::Failed {
          cmd: cmd.to_string(),
          code: Some(code),
          stderr: format!("simulated failure of {}", pattern),
        })
      })
    }));
    self
  }

  /// Every command line issued so far.
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  /// Issued command lines containing `pattern`.
  pub fn calls_matching(&self, pattern: &str) -> Vec<String> {
    self.calls().into_iter().filter(|c| c.contains(pattern)).collect()
  }

  fn answer(&self, cmd: &str) -> Result<String, CommandError> {
    self.calls.lock().unwrap().push(cmd.to_string());
    self
      .responders
      .iter()
      .find_map(|responder| responder(cmd))
      .unwrap_or_else(|| Ok(String::new()))
  }
}

impl CommandRunner for FakeRunner {
  async fn capture(&self, cmd: &str) -> Result<String, CommandError> {
    self.answer(cmd)
  }

  async fn stream(&self, cmd: &str) -> Result<(), CommandError> {
    self.answer(cmd).map(|_| ())
  }
}

/// Fixed answer to the start prompt, counting how often it was asked.
pub struct FixedConfirm {
  answer: bool,
  asked: Cell<usize>,
}

impl FixedConfirm {
  pub fn yes() -> Self {
    Self { answer: true, asked: Cell::new(0) }
  }

  pub fn no() -> Self {
    Self { answer: false, asked: Cell::new(0) }
  }

  pub fn asked(&self) -> usize {
    self.asked.get()
  }
}

impl Confirm for FixedConfirm {
  fn confirm(&self, _message: &str) -> io::Result<bool> {
    self.asked.set(self.asked.get() + 1);
    Ok(self.answer)
  }
}

/// Clock frozen at a given instant.
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
  pub fn at(s: &str) -> Self {
    Self(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
  }
}

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime {
    self.0
  }
}
