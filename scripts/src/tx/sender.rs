use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use tracing::info;

use crate::{
    errors::ScriptError,
    tx::{client::RpcProvider, DeploymentReceipt},
};

/// Send a contract creation transaction and wait for it to be mined
pub async fn send_deployment(
    client: &RpcProvider,
    from: Address,
    deploy_code: Bytes,
) -> Result<DeploymentReceipt, ScriptError> {
    // Build the tx
    let tx_request = TransactionRequest::default()
        .with_from(from)
        .with_deploy_code(deploy_code);

    // Send it
    let pending_tx = client
        .send_transaction(tx_request)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    info!("Pending deployment transaction... {}", pending_tx.tx_hash());

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractDeployment(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }

    let contract_address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in receipt of {}",
            receipt.transaction_hash
        ))
    })?;
    info!(
        "Deployment tx done on block: {}",
        receipt.block_number.unwrap_or_default()
    );

    Ok(DeploymentReceipt {
        contract_address,
        transaction_hash: receipt.transaction_hash,
        gas_used: u128::from(receipt.gas_used),
        effective_gas_price: receipt.effective_gas_price,
    })
}
