//! Constants used in the presale scripts

use alloy::primitives::{address, Address};

/// Default RPC endpoint, a local hardhat or anvil node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Name of the local, ephemeral development network
pub const LOCAL_NETWORK_NAME: &str = "hardhat";

/// Name used for chains missing from the known networks table
pub const UNKNOWN_NETWORK_NAME: &str = "unknown";

/// Public price API, free tier
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Currency every quote is expressed in
pub const QUOTE_CURRENCY: &str = "usd";

/// Token sold by the presale, passed as the single constructor argument
pub const DEFAULT_TOKEN_ADDRESS: Address = address!("2748C9980A3A3b8fE44B23a813E06e3149eFb9a6");

/// Name of the presale contract
pub const PRESALE_CONTRACT_NAME: &str = "BFMTokenPresale";

/// Hardhat artifact of the presale contract
pub const DEFAULT_ARTIFACT_PATH: &str =
    "artifacts/contracts/BFMTokenPresale.sol/BFMTokenPresale.json";

/// Where deployed addresses are recorded
pub const DEFAULT_DEPLOYMENT_RECORD: &str = "deployed.json";

/// Delay between two explorer verification status checks
pub const VERIFY_POLL_INTERVAL_SECS: u64 = 5;

/// Maximum number of explorer verification status checks
pub const VERIFY_MAX_STATUS_CHECKS: u32 = 12;
