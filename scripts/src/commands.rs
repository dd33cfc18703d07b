//! The deploy and verify flows of the presale contract

use std::path::{Path, PathBuf};

use alloy::primitives::{Address, Bytes, TxHash};
use tracing::{error, info};

use crate::{
    constants::LOCAL_NETWORK_NAME,
    errors::ScriptError,
    fees::{format_usd, TransactionFee},
    network::{resolve_network_name, NetworkInfo},
    output_writer::{write_output_file, OutputKeys},
    price::{fetch_usd_quote, Currency, PriceSource},
    tx::{abi::ConstructorArgs, ChainClient},
    verify::Verifier,
};

/// Everything needed to deploy the presale
#[derive(Debug, Clone)]
pub struct DeployRequest {
    /// Name of the contract, used as key in the deployment record
    pub contract_name: String,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
    /// Address of the token sold by the presale
    pub token: Address,
    /// Explicit network name, otherwise derived from the chain id
    pub network_override: Option<String>,
    /// Where to record the deployment, if anywhere
    pub record_path: Option<PathBuf>,
}

/// Outcome of a successful deployment
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    /// The network deployed on
    pub network: NetworkInfo,
    /// Address of the deployed presale
    pub contract_address: Address,
    /// Hash of the deployment transaction
    pub transaction_hash: TxHash,
    /// Fee paid for the deployment
    pub fee: TransactionFee,
    /// Fee in USD at the ETH rate
    pub fee_usd_eth: f64,
    /// Fee in USD at the BNB rate
    pub fee_usd_bnb: f64,
    /// Whether the source was verified on an explorer
    pub verified: bool,
}

/// Fetch a USD rate, turning an absent quote into an error
async fn required_usd_rate<P: PriceSource + ?Sized>(
    prices: &P,
    currency: Currency,
) -> Result<f64, ScriptError> {
    let rate = fetch_usd_quote(prices, currency).await.ok_or_else(|| {
        error!("Could not fetch {} to USD rate. Exiting.", currency);
        ScriptError::RateUnavailable(currency.to_string())
    })?;
    info!("Current {} to USD rate: {}", currency, rate);

    Ok(rate)
}

/// Resolve the network, chain id and latest block
async fn network_info<C: ChainClient + ?Sized>(
    chain: &C,
    network_override: Option<&str>,
) -> Result<NetworkInfo, ScriptError> {
    let chain_id = chain.chain_id().await?;
    let block = chain.latest_block().await?;

    Ok(NetworkInfo {
        name: resolve_network_name(network_override, chain_id),
        chain_id,
        block_number: block.number,
        timestamp: block.timestamp,
    })
}

/// Deploy the presale, price its deployment and verify it on non local networks
pub async fn deploy_presale<C, P, V>(
    chain: &C,
    prices: &P,
    verifier: &V,
    request: DeployRequest,
) -> Result<DeploymentResult, ScriptError>
where
    C: ChainClient + ?Sized,
    P: PriceSource + ?Sized,
    V: Verifier + ?Sized,
{
    info!(
        "Deploying contracts with the account: {}",
        chain.deployer_address()
    );

    // Both rates are needed before spending anything
    let eth_to_usd = required_usd_rate(prices, Currency::Ether).await?;
    let bnb_to_usd = required_usd_rate(prices, Currency::BinanceCoin).await?;

    let network = network_info(chain, request.network_override.as_deref()).await?;
    println!("Blockchain Info:\n{}", network);

    // Deploy with the token as single constructor argument
    let constructor_args = ConstructorArgs::presale(request.token);
    let receipt = chain
        .deploy(constructor_args.deploy_code(&request.bytecode))
        .await?;
    info!("Contract deployed with address: {}", receipt.contract_address);
    info!("Gas used for deployment: {}", receipt.gas_used);

    let fee = TransactionFee::new(receipt.gas_used, receipt.effective_gas_price);
    let fee_usd_eth = fee.usd(eth_to_usd);
    let fee_usd_bnb = fee.usd(bnb_to_usd);
    info!("Transaction fee (Gas Fee ETH): {} ETH", fee.native());
    info!("Transaction fee (Gas Fee USD): {} USD", format_usd(fee_usd_eth));
    info!(
        "Transaction fee (Gas Fee BNB-USD): {} USD",
        format_usd(fee_usd_bnb)
    );

    // The record is a convenience, losing it must not stop verification
    if let Some(record_path) = &request.record_path {
        if let Err(e) = record_deployment(
            record_path,
            &network.name,
            &request.contract_name,
            receipt.contract_address,
            receipt.transaction_hash,
        ) {
            error!("Failed to record deployment: {}", e);
        }
    }

    let verified = if network.is_local() {
        false
    } else {
        verify_contract(verifier, receipt.contract_address, constructor_args).await?;
        true
    };

    Ok(DeploymentResult {
        network,
        contract_address: receipt.contract_address,
        transaction_hash: receipt.transaction_hash,
        fee,
        fee_usd_eth,
        fee_usd_bnb,
        verified,
    })
}

/// Store the address and creation tx of a deployment
fn record_deployment(
    record_path: &Path,
    network: &str,
    contract_name: &str,
    address: Address,
    transaction_hash: TxHash,
) -> Result<(), ScriptError> {
    write_output_file(
        record_path,
        network,
        contract_name,
        OutputKeys::Address,
        address,
    )?;
    write_output_file(
        record_path,
        network,
        contract_name,
        OutputKeys::DeploymentTx,
        transaction_hash,
    )?;
    info!("Deployment recorded in {}", record_path.display());

    Ok(())
}

/// Verify an already deployed presale, unless on the local network
///
/// Returns whether a verification was performed.
pub async fn verify_presale<C, V>(
    chain: &C,
    verifier: &V,
    network_override: Option<&str>,
    address: Address,
    token: Address,
) -> Result<bool, ScriptError>
where
    C: ChainClient + ?Sized,
    V: Verifier + ?Sized,
{
    let chain_id = chain.chain_id().await?;
    let name = resolve_network_name(network_override, chain_id);
    if name == LOCAL_NETWORK_NAME {
        info!("Nothing to verify on the {} network", name);
        return Ok(false);
    }

    verify_contract(verifier, address, ConstructorArgs::presale(token)).await?;
    Ok(true)
}

/// Run the verifier, logging the outcome
async fn verify_contract<V: Verifier + ?Sized>(
    verifier: &V,
    address: Address,
    constructor_args: ConstructorArgs,
) -> Result<(), ScriptError> {
    info!("Verifying contract on the network...");
    verifier
        .verify(address, constructor_args)
        .await
        .map_err(|e| {
            error!("Failed to verify contract on the network: {}", e);
            e
        })?;
    info!("Contract verified on the network!");

    Ok(())
}
