//! fabctl-lib: lifecycle orchestration for a containerised Fabric network.
//!
//! - `config`: the topology document (peers, clients, orderer, channel)
//! - `runtime`: which containers run, and starting them via docker-compose
//! - `registry`: counting instantiated chaincodes on a channel
//! - `deploy`: install then instantiate-or-upgrade a chaincode
//! - `channel`: create and join the configured channel

pub mod channel;
pub mod config;
pub mod consts;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod peer;
pub mod registry;
pub mod runtime;
#[cfg(test)]
mod util;
pub mod version;

pub use error::{Error, QueryError, Result};
