//! Source verification of deployed contracts on block explorers

use alloy::primitives::Address;
use async_trait::async_trait;

use crate::{errors::ScriptError, tx::abi::ConstructorArgs};

pub mod etherscan;

/// A service able to match deployed bytecode against its source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verify the contract at `address`, deployed with `constructor_args`
    async fn verify(
        &self,
        address: Address,
        constructor_args: ConstructorArgs,
    ) -> Result<(), ScriptError>;
}
