use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{
        fillers::{FillProvider, JoinFill, RecommendedFillers, WalletFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};
use reqwest::Url;
use tracing::info;

use crate::errors::ScriptError;

/// Re-export from alloy recommend filter
type RecommendFiller = JoinFill<Identity, <Ethereum as RecommendedFillers>::RecommendedFillers>;

/// An alloy provider that uses a `PrivateKeySigner` to sign transactions
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// Builds the signing provider for the given RPC endpoint and hex private key,
/// without contacting the node
pub fn build_rpc_provider(rpc_url: &str, private_key: &str) -> Result<RpcProvider, ScriptError> {
    // Create our signer, the key may or may not be 0x prefixed
    let signer = private_key
        .parse::<PrivateKeySigner>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = EthereumWallet::from(signer);

    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    // Create our provider with the rpc client + signer
    Ok(ProviderBuilder::default()
        .with_recommended_fillers()
        .wallet(wallet)
        .connect_http(url))
}

/// Sets up the signing provider and fetches the chain id it is connected to
pub async fn create_rpc_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<(RpcProvider, u64), ScriptError> {
    let provider = build_rpc_provider(rpc_url, private_key)?;

    // Fetch chain id, failing early on an unreachable node
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok((provider, chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First hardhat dev account
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_build_rpc_provider() {
        assert!(build_rpc_provider("http://127.0.0.1:8545", DEV_KEY).is_ok());
        assert!(build_rpc_provider("http://127.0.0.1:8545", &format!("0x{DEV_KEY}")).is_ok());
    }

    #[test]
    fn test_build_rpc_provider_rejects_bad_input() {
        assert!(matches!(
            build_rpc_provider("http://127.0.0.1:8545", "0x1234"),
            Err(ScriptError::ClientInitialization(_))
        ));
        assert!(matches!(
            build_rpc_provider("not a url", DEV_KEY),
            Err(ScriptError::ClientInitialization(_))
        ));
    }
}
