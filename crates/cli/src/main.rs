mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fabctl_lib::config::Role;
use fabctl_lib::consts::DEFAULT_CONFIG_FILE;
use tracing_subscriber::EnvFilter;

use cmd::{DeployArgs, cmd_channel, cmd_deploy, cmd_status, cmd_up};
use output::{OutputFormat, print_error};

/// fabctl - bring up a Fabric network, set up channels and deploy chaincode
#[derive(Parser)]
#[command(name = "fabctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the network configuration file
  #[arg(short, long, global = true, env = "FABCTL_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Start stopped containers without asking
  #[arg(short, long, global = true)]
  yes: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Start containers from the compose manifest
  Up {
    /// Start every service in the compose manifest
    #[arg(long, conflicts_with = "targets")]
    all: bool,

    /// Services to start (interactive selection when omitted)
    targets: Vec<String>,
  },

  /// Install a chaincode, then instantiate or upgrade it
  Deploy {
    /// Container to run the peer CLI in (interactive selection when omitted)
    target: Option<String>,

    /// Chaincode name (prompted when omitted)
    chaincode: Option<String>,

    /// Whether the target is a configured client or peer
    #[arg(long, value_enum, default_value_t = RoleArg::Client)]
    role: RoleArg,

    /// Endorsement policy expression (overrides config)
    #[arg(long)]
    policy: Option<String>,

    /// Constructor arguments JSON (overrides config)
    #[arg(long)]
    init_args: Option<String>,

    /// Install path template, `{name}` is replaced by the chaincode name (overrides config)
    #[arg(long)]
    path_template: Option<String>,
  },

  /// Create the configured channel on a peer and join it
  Channel {
    /// Peer to set up (interactive selection when omitted)
    peer: Option<String>,
  },

  /// Show configured peers and clients and whether they are running
  Status {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
  Client,
  Peer,
}

impl From<RoleArg> for Role {
  fn from(role: RoleArg) -> Self {
    match role {
      RoleArg::Client => Role::Client,
      RoleArg::Peer => Role::Peer,
    }
  }
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Up { all, targets } => cmd_up(&cli.config, all, &targets),
    Commands::Deploy {
      target,
      chaincode,
      role,
      policy,
      init_args,
      path_template,
    } => cmd_deploy(
      &cli.config,
      DeployArgs {
        target,
        chaincode,
        role: role.into(),
        policy,
        init_args,
        path_template,
        yes: cli.yes,
      },
    ),
    Commands::Channel { peer } => cmd_channel(&cli.config, peer, cli.yes),
    Commands::Status { output } => cmd_status(&cli.config, output),
  }
}
