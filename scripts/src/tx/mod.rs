//! Interactions with the network: metadata reads and the deployment transaction

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;

use crate::errors::ScriptError;

use self::client::RpcProvider;

pub mod abi;
pub mod client;
pub mod reader;
pub mod sender;

/// Number and timestamp of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSummary {
    /// Block number
    pub number: u64,
    /// Block timestamp, in seconds since epoch
    pub timestamp: u64,
}

/// What we keep from the receipt of a contract creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
    /// Address of the created contract
    pub contract_address: Address,
    /// Hash of the creation transaction
    pub transaction_hash: TxHash,
    /// Gas consumed by the creation
    pub gas_used: u128,
    /// Price paid per gas unit, in wei
    pub effective_gas_price: u128,
}

/// The network operations a deployment needs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Chain id of the connected network
    async fn chain_id(&self) -> Result<u64, ScriptError>;

    /// Address the deployment is sent from
    fn deployer_address(&self) -> Address;

    /// Latest block of the network
    async fn latest_block(&self) -> Result<BlockSummary, ScriptError>;

    /// Send a contract creation with the given code and wait for its receipt
    async fn deploy(&self, deploy_code: Bytes) -> Result<DeploymentReceipt, ScriptError>;
}

/// [`ChainClient`] backed by our signing RPC provider
pub struct RpcChainClient {
    /// The underlying provider
    client: RpcProvider,
    /// Chain id, fetched once when the provider was created
    chain_id: u64,
}

impl RpcChainClient {
    /// Wrap a provider connected to `chain_id`
    pub fn new(client: RpcProvider, chain_id: u64) -> Self {
        Self { client, chain_id }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn chain_id(&self) -> Result<u64, ScriptError> {
        Ok(self.chain_id)
    }

    fn deployer_address(&self) -> Address {
        reader::get_signer_address(&self.client)
    }

    async fn latest_block(&self) -> Result<BlockSummary, ScriptError> {
        reader::get_latest_block(&self.client).await
    }

    async fn deploy(&self, deploy_code: Bytes) -> Result<DeploymentReceipt, ScriptError> {
        sender::send_deployment(&self.client, self.deployer_address(), deploy_code).await
    }
}
