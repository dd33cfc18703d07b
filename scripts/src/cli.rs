//! Definitions of CLI arguments and commands for the presale scripts

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    artifact::ContractArtifact,
    commands::{deploy_presale, verify_presale, DeployRequest},
    constants::{
        DEFAULT_ARTIFACT_PATH, DEFAULT_DEPLOYMENT_RECORD, DEFAULT_PRICE_API_URL, DEFAULT_RPC,
        DEFAULT_TOKEN_ADDRESS,
    },
    errors::ScriptError,
    fees::format_usd,
    network::{explorer_api_url, resolve_network_name},
    output_writer::read_deployed_address,
    price::CoinGeckoClient,
    tx::{client::create_rpc_provider, RpcChainClient},
    verify::etherscan::EtherscanVerifier,
};

/// Scripts for deploying & verifying the BFM token presale contract
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Network name, derived from the chain id when absent
    #[arg(short, long, env = "NETWORK_NAME")]
    pub network: Option<String>,

    /// Base URL of the price API
    #[arg(long, env = "PRICE_API_URL", default_value = DEFAULT_PRICE_API_URL)]
    pub price_api_url: String,

    /// Etherscan compatible explorer API, defaults to the one of the chain
    #[arg(long, env = "ETHERSCAN_API_URL")]
    pub explorer_api_url: Option<String>,

    /// Explorer API key
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub explorer_api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connect to the network and run the command
    pub async fn run(self) -> Result<(), ScriptError> {
        // Build our RPC client with signer
        let (client, chain_id) = create_rpc_provider(&self.rpc_url, &self.priv_key).await?;
        let chain = RpcChainClient::new(client, chain_id);

        let settings = Settings {
            network: self.network,
            price_api_url: self.price_api_url,
            explorer_api_url: self
                .explorer_api_url
                .or_else(|| explorer_api_url(chain_id).map(str::to_string)),
            explorer_api_key: self.explorer_api_key,
            chain_id,
        };

        self.command.run(&chain, settings).await
    }
}

/// Settings shared by every command
pub struct Settings {
    /// Network name override
    pub network: Option<String>,
    /// Base URL of the price API
    pub price_api_url: String,
    /// Explorer API, if known
    pub explorer_api_url: Option<String>,
    /// Explorer API key
    pub explorer_api_key: Option<String>,
    /// Chain id of the connected network
    pub chain_id: u64,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the presale, print its cost and verify it
    Deploy(DeployArgs),
    /// Verify an already deployed presale
    Verify(VerifyArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, chain: &RpcChainClient, settings: Settings) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                info!("Deploying presale...");
                let artifact = ContractArtifact::load(&args.artifact)?;
                let prices = CoinGeckoClient::new(&settings.price_api_url);
                let verifier = EtherscanVerifier::new(
                    settings.explorer_api_url,
                    settings.explorer_api_key,
                    artifact.clone(),
                );

                let request = DeployRequest {
                    contract_name: artifact.contract_name,
                    bytecode: artifact.bytecode,
                    token: args.token,
                    network_override: settings.network,
                    record_path: Some(args.output),
                };
                let result = deploy_presale(chain, &prices, &verifier, request).await?;

                info!(
                    "Deployed {} on {} for {} USD",
                    result.contract_address,
                    result.network.name,
                    format_usd(result.fee_usd_eth)
                );
                Ok(())
            }
            Command::Verify(args) => {
                info!("Verifying presale...");
                let artifact = ContractArtifact::load(&args.artifact)?;
                let address = match args.address {
                    Some(address) => address,
                    None => read_deployed_address(
                        &args.output,
                        &resolve_network_name(settings.network.as_deref(), settings.chain_id),
                        &artifact.contract_name,
                    )?,
                };
                let verifier = EtherscanVerifier::new(
                    settings.explorer_api_url,
                    settings.explorer_api_key,
                    artifact,
                );

                verify_presale(
                    chain,
                    &verifier,
                    settings.network.as_deref(),
                    address,
                    args.token,
                )
                .await?;
                Ok(())
            }
        }
    }
}

/// Deploy the presale
#[derive(Args)]
pub struct DeployArgs {
    /// Address of the token sold by the presale
    #[arg(short, long, default_value_t = DEFAULT_TOKEN_ADDRESS)]
    pub token: Address,
    /// Path of the compiled contract artifact
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,
    /// Deployment record to update
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENT_RECORD)]
    pub output: PathBuf,
}

/// Verify a deployed presale
#[derive(Args)]
pub struct VerifyArgs {
    /// Address of the presale, read from the deployment record when absent
    #[arg(long)]
    pub address: Option<Address>,
    /// Address of the token the presale was deployed with
    #[arg(short, long, default_value_t = DEFAULT_TOKEN_ADDRESS)]
    pub token: Address,
    /// Path of the compiled contract artifact
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,
    /// Deployment record to read the address from
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENT_RECORD)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_deploy_defaults() {
        let cli = Cli::try_parse_from(["presale-scripts", "--priv-key", "0x01", "deploy"]).unwrap();

        assert_eq!(cli.rpc_url, DEFAULT_RPC);
        match cli.command {
            Command::Deploy(args) => {
                assert_eq!(args.token, DEFAULT_TOKEN_ADDRESS);
                assert_eq!(args.artifact, PathBuf::from(DEFAULT_ARTIFACT_PATH));
            }
            Command::Verify(_) => panic!("expected deploy"),
        }
    }

    #[test]
    fn test_verify_with_address() {
        let cli = Cli::try_parse_from([
            "presale-scripts",
            "--priv-key",
            "0x01",
            "--network",
            "bsc",
            "verify",
            "--address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ])
        .unwrap();

        assert_eq!(cli.network.as_deref(), Some("bsc"));
        match cli.command {
            Command::Verify(args) => assert!(args.address.is_some()),
            Command::Deploy(_) => panic!("expected verify"),
        }
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let result = Cli::try_parse_from([
            "presale-scripts",
            "--priv-key",
            "0x01",
            "deploy",
            "--token",
            "not-an-address",
        ]);

        assert!(result.is_err());
    }
}
