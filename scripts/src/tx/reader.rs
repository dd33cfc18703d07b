use alloy::{
    primitives::Address,
    providers::{Provider, WalletProvider},
    rpc::types::eth::BlockNumberOrTag,
};

use crate::{
    errors::ScriptError,
    tx::{client::RpcProvider, BlockSummary},
};

/// Address of the account signing our transactions
pub fn get_signer_address(client: &RpcProvider) -> Address {
    client.default_signer_address()
}

/// Get the number and timestamp of the latest block
pub async fn get_latest_block(client: &RpcProvider) -> Result<BlockSummary, ScriptError> {
    let block_number = client
        .get_block_number()
        .await
        .map_err(|e| ScriptError::NetworkQuery(e.to_string()))?;

    let block = client
        .get_block_by_number(BlockNumberOrTag::Number(block_number))
        .await
        .map_err(|e| ScriptError::NetworkQuery(e.to_string()))?
        .ok_or_else(|| ScriptError::NetworkQuery(format!("block {} not found", block_number)))?;

    Ok(BlockSummary {
        number: block.header.number,
        timestamp: block.header.timestamp,
    })
}
