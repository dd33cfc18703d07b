//! Network identity and the table of networks the scripts know about

use std::fmt::{self, Display, Formatter};

use crate::constants::{LOCAL_NETWORK_NAME, UNKNOWN_NETWORK_NAME};

/// A network the scripts know by chain id
struct KnownNetwork {
    /// The chain id
    chain_id: u64,
    /// Human readable name, as used by `--network`
    name: &'static str,
    /// Etherscan compatible API of the network explorer, if any
    explorer_api_url: Option<&'static str>,
}

/// Chain ids we can name
const KNOWN_NETWORKS: &[KnownNetwork] = &[
    KnownNetwork {
        chain_id: 1,
        name: "mainnet",
        explorer_api_url: Some("https://api.etherscan.io/api"),
    },
    KnownNetwork {
        chain_id: 11155111,
        name: "sepolia",
        explorer_api_url: Some("https://api-sepolia.etherscan.io/api"),
    },
    KnownNetwork {
        chain_id: 56,
        name: "bsc",
        explorer_api_url: Some("https://api.bscscan.com/api"),
    },
    KnownNetwork {
        chain_id: 97,
        name: "bscTestnet",
        explorer_api_url: Some("https://api-testnet.bscscan.com/api"),
    },
    KnownNetwork {
        chain_id: 31337,
        name: LOCAL_NETWORK_NAME,
        explorer_api_url: None,
    },
    KnownNetwork {
        chain_id: 1337,
        name: LOCAL_NETWORK_NAME,
        explorer_api_url: None,
    },
];

/// Resolve the name of a network from its chain id
pub fn network_name(chain_id: u64) -> &'static str {
    KNOWN_NETWORKS
        .iter()
        .find(|n| n.chain_id == chain_id)
        .map_or(UNKNOWN_NETWORK_NAME, |n| n.name)
}

/// Name of the network, an explicit name taking precedence over the chain id
pub fn resolve_network_name(name_override: Option<&str>, chain_id: u64) -> String {
    name_override
        .map(str::to_string)
        .unwrap_or_else(|| network_name(chain_id).to_string())
}

/// Default explorer API for a chain id
pub fn explorer_api_url(chain_id: u64) -> Option<&'static str> {
    KNOWN_NETWORKS
        .iter()
        .find(|n| n.chain_id == chain_id)
        .and_then(|n| n.explorer_api_url)
}

/// Snapshot of the network we are deploying on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Network name
    pub name: String,
    /// Chain id
    pub chain_id: u64,
    /// Latest block number
    pub block_number: u64,
    /// Latest block timestamp, in seconds since epoch
    pub timestamp: u64,
}

impl NetworkInfo {
    /// Whether this is the local ephemeral network, which has no explorer
    pub fn is_local(&self) -> bool {
        self.name == LOCAL_NETWORK_NAME
    }
}

impl Display for NetworkInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = [
            ("name", self.name.clone()),
            ("chainId", self.chain_id.to_string()),
            ("blockNumber", self.block_number.to_string()),
            ("timestamp", self.timestamp.to_string()),
        ];
        let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

        let border = format!("+-------------+-{}-+", "-".repeat(value_width));
        writeln!(f, "{border}")?;
        for (key, value) in rows {
            writeln!(f, "| {key:<11} | {value:<value_width$} |")?;
        }
        write!(f, "{border}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str) -> NetworkInfo {
        NetworkInfo {
            name: name.to_string(),
            chain_id: 97,
            block_number: 42,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_network_name_lookup() {
        assert_eq!(network_name(1), "mainnet");
        assert_eq!(network_name(97), "bscTestnet");
        assert_eq!(network_name(31337), LOCAL_NETWORK_NAME);
        assert_eq!(network_name(424242), UNKNOWN_NETWORK_NAME);
    }

    #[test]
    fn test_resolve_network_name() {
        assert_eq!(resolve_network_name(None, 56), "bsc");
        assert_eq!(resolve_network_name(Some("localhost"), 31337), "localhost");
    }

    #[test]
    fn test_explorer_api_url_lookup() {
        assert_eq!(explorer_api_url(56), Some("https://api.bscscan.com/api"));
        assert_eq!(explorer_api_url(31337), None);
        assert_eq!(explorer_api_url(424242), None);
    }

    #[test]
    fn test_is_local() {
        assert!(info("hardhat").is_local());
        assert!(!info("bscTestnet").is_local());
        assert!(!info("unknown").is_local());
    }

    #[test]
    fn test_table_rendering() {
        let table = info("bscTestnet").to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], lines[5]);
        assert!(lines[1].contains("name") && lines[1].contains("bscTestnet"));
        assert!(lines[4].contains("1700000000"));
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
