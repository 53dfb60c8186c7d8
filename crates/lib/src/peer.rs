//! Peer CLI command lines.
//!
//! Every `peer` invocation runs inside a target container through
//! `docker exec`, with the target's environment passed as `-e` flags. Values
//! wrapped in double quotes on the command line are escaped so `/bin/sh` reads
//! them literally.

use std::fmt;

use crate::config::Target;
use crate::consts::BLOCK_FILE_EXTENSION;

/// Which chaincode activation command to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
  Instantiate,
  Upgrade,
}

impl Activation {
  /// Pick the command family from the number of instantiated entries.
  ///
  /// Zero means the chaincode was never activated on the channel; any other
  /// count (including duplicates) means it was.
  pub fn for_count(instantiated: usize) -> Self {
    if instantiated == 0 {
      Activation::Instantiate
    } else {
      Activation::Upgrade
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Activation::Instantiate => "instantiate",
      Activation::Upgrade => "upgrade",
    }
  }
}

impl fmt::Display for Activation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Parameters shared by `peer chaincode instantiate` and `upgrade`.
#[derive(Debug, Clone, Copy)]
pub struct ActivateArgs<'a> {
  pub orderer: &'a str,
  pub channel: &'a str,
  pub name: &'a str,
  pub version: &'a str,
  pub init_args: &'a str,
  pub policy: &'a str,
}

/// Builds `docker exec ... peer ...` lines for one target container.
#[derive(Debug, Clone, Copy)]
pub struct PeerCli<'a> {
  target: Target<'a>,
}

impl<'a> PeerCli<'a> {
  pub fn new(target: Target<'a>) -> Self {
    Self { target }
  }

  pub fn list_instantiated(&self, channel: &str) -> String {
    self.exec(&format!("chaincode list --instantiated -C {}", channel))
  }

  pub fn install(&self, name: &str, version: &str, path: &str) -> String {
    self.exec(&format!("chaincode install -n {} -v {} -p {}", name, version, path))
  }

  pub fn activate(&self, activation: Activation, args: &ActivateArgs<'_>) -> String {
    self.exec(&format!(
      "chaincode {} -o {} -C {} -n {} -v {} -c \"{}\" -P \"{}\"",
      activation,
      args.orderer,
      args.channel,
      args.name,
      args.version,
      escape_double_quoted(args.init_args),
      escape_double_quoted(args.policy),
    ))
  }

  pub fn channel_create(&self, orderer: &str, channel: &str, configtx_file: &str) -> String {
    self.exec(&format!("channel create -o {} -c {} -f {}", orderer, channel, configtx_file))
  }

  pub fn channel_join(&self, block_file: &str) -> String {
    self.exec(&format!("channel join -b {}", block_file))
  }

  fn exec(&self, peer_args: &str) -> String {
    let mut parts = vec!["docker exec".to_string()];
    parts.extend(self.target.environment.iter().map(|e| format!("-e \"{}\"", escape_double_quoted(e))));
    parts.push(self.target.name.to_string());
    parts.push(format!("peer {}", peer_args));
    parts.join(" ")
  }
}

/// Genesis block file produced by `peer channel create` for a channel.
pub fn block_file_name(channel: &str) -> String {
  format!("{}.{}", channel, BLOCK_FILE_EXTENSION)
}

/// Escape a value for use inside a double-quoted POSIX shell word.
///
/// Inside `"..."` only `\`, `"`, `$` and `` ` `` are special; each is prefixed
/// with a backslash.
pub fn escape_double_quoted(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    if matches!(c, '\\' | '"' | '$' | '`') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Role;
  use crate::exec::{CommandRunner, ShellRunner};

  fn env() -> Vec<String> {
    vec!["CORE_PEER_LOCALMSPID=Org1MSP".to_string(), "CORE_PEER_ADDRESS=peer0:7051".to_string()]
  }

  #[test]
  fn activation_from_count() {
    assert_eq!(Activation::for_count(0), Activation::Instantiate);
    assert_eq!(Activation::for_count(1), Activation::Upgrade);
    assert_eq!(Activation::for_count(2), Activation::Upgrade);
    assert_eq!(Activation::for_count(usize::MAX), Activation::Upgrade);
  }

  #[test]
  fn exec_prefix_with_environment() {
    let env = env();
    let cli = PeerCli::new(Target { name: "peer0", role: Role::Peer, environment: &env });

    assert_eq!(
      cli.list_instantiated("mychannel"),
      "docker exec -e \"CORE_PEER_LOCALMSPID=Org1MSP\" -e \"CORE_PEER_ADDRESS=peer0:7051\" peer0 \
       peer chaincode list --instantiated -C mychannel"
    );
  }

  #[test]
  fn exec_prefix_without_environment() {
    let cli = PeerCli::new(Target { name: "cli", role: Role::Client, environment: &[] });

    assert_eq!(
      cli.install("mycc", "v20240102030405", "github.com/mycc/go"),
      "docker exec cli peer chaincode install -n mycc -v v20240102030405 -p github.com/mycc/go"
    );
  }

  #[test]
  fn activate_escapes_args_and_policy() {
    let cli = PeerCli::new(Target { name: "cli", role: Role::Client, environment: &[] });
    let args = ActivateArgs {
      orderer: "orderer.example.com:7050",
      channel: "mychannel",
      name: "mycc",
      version: "v20240102030405",
      init_args: r#"{"Args":[]}"#,
      policy: r#"OR ("Org1MSP.member")"#,
    };

    assert_eq!(
      cli.activate(Activation::Instantiate, &args),
      r#"docker exec cli peer chaincode instantiate -o orderer.example.com:7050 -C mychannel -n mycc -v v20240102030405 -c "{\"Args\":[]}" -P "OR (\"Org1MSP.member\")""#
    );
    assert!(
      cli
        .activate(Activation::Upgrade, &args)
        .starts_with("docker exec cli peer chaincode upgrade -o orderer.example.com:7050 -C mychannel")
    );
  }

  #[test]
  fn channel_commands() {
    let cli = PeerCli::new(Target { name: "peer0", role: Role::Peer, environment: &[] });

    assert_eq!(
      cli.channel_create("orderer.example.com:7050", "mychannel", "/etc/hyperledger/configtx/channel.tx"),
      "docker exec peer0 peer channel create -o orderer.example.com:7050 -c mychannel -f /etc/hyperledger/configtx/channel.tx"
    );
    assert_eq!(
      cli.channel_join(&block_file_name("mychannel")),
      "docker exec peer0 peer channel join -b mychannel.block"
    );
  }

  #[test]
  fn escape_double_quoted_specials() {
    assert_eq!(escape_double_quoted("plain"), "plain");
    assert_eq!(escape_double_quoted(r#"AND('a','b')"#), r#"AND('a','b')"#);
    assert_eq!(escape_double_quoted(r#""x""#), r#"\"x\""#);
    assert_eq!(escape_double_quoted(r#"a\"b"#), r#"a\\\"b"#);
    assert_eq!(escape_double_quoted("$HOME `id`"), r#"\$HOME \`id\`"#);
  }

  #[tokio::test]
  async fn escaped_values_reach_the_command_verbatim() {
    let values = [
      r#"{"Args":["a\"b"]}"#,
      r#"{"Args":["$HOME"]}"#,
      r#"{"Args":["`id -u`"]}"#,
      r#"OR ("Org1MSP.member") \n $(true) \\"#,
    ];

    for value in values {
      let cmd = format!("printf '%s' \"{}\"", escape_double_quoted(value));
      let out = ShellRunner.capture(&cmd).await.unwrap();
      assert_eq!(out, value, "shell altered {}", value);
    }
  }
}
