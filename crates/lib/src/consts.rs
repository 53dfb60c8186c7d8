//! Well-known names and defaults.

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "fabric-config.yml";

/// Go chaincode source layout inside the peer's GOPATH.
pub const DEFAULT_CHAINCODE_PATH_TEMPLATE: &str = "github.com/{name}/go";

/// Empty constructor arguments.
pub const DEFAULT_INIT_ARGS: &str = r#"{"Args":[]}"#;

/// Single-organization endorsement.
pub const DEFAULT_ENDORSEMENT_POLICY: &str = r#"OR ("Org1MSP.member")"#;

/// Extension of the channel genesis block written by `peer channel create`.
pub const BLOCK_FILE_EXTENSION: &str = "block";
