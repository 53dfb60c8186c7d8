//! Chaincode registry inspection.
//!
//! Counts how many times a chaincode appears in a peer's instantiated listing
//! for a channel. The count is queried fresh for every deployment and is the
//! only input to the instantiate/upgrade decision.

use tracing::{debug, info};

use crate::error::QueryError;
use crate::exec::CommandRunner;
use crate::peer::PeerCli;

/// Count `chaincode` entries instantiated on `channel`, as seen from `peer`.
pub async fn count_instantiated<R: CommandRunner>(
  runner: &R,
  peer: &PeerCli<'_>,
  channel: &str,
  chaincode: &str,
) -> Result<usize, QueryError> {
  let output = runner.capture(&peer.list_instantiated(channel)).await?;
  let count = count_entries(&output, chaincode);
  debug!(listing = %output, "instantiated chaincodes");
  info!(chaincode = %chaincode, channel = %channel, count, "instantiated entries found");
  Ok(count)
}

/// Count listing lines recording exactly `chaincode`.
///
/// The first line is the listing header. Entries are matched on the
/// delimiter-qualified `Name: <chaincode>,` record so that `mycc` does not
/// match `mycc2`.
pub fn count_entries(listing: &str, chaincode: &str) -> usize {
  let needle = format!("Name: {},", chaincode);
  listing.lines().skip(1).filter(|line| line.contains(&needle)).count()
}
