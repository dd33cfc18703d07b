//! Definitions of errors that can occur during the execution of the presale scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the presale scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error when reading or writing the deployment record
    JsonOutputError(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error querying network metadata or blocks from the provider
    NetworkQuery(String),
    /// Error fetching or parsing a price quote
    PriceFetching(String),
    /// A required USD rate could not be obtained
    RateUnavailable(String),
    /// Error loading a compiled contract artifact
    ArtifactLoading(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error verifying a contract on a block explorer
    ContractVerification(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error writing json output: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::NetworkQuery(s) => write!(f, "error querying network: {}", s),
            ScriptError::PriceFetching(s) => write!(f, "error fetching price quote: {}", s),
            ScriptError::RateUnavailable(s) => {
                write!(f, "could not fetch {} to USD rate", s)
            }
            ScriptError::ArtifactLoading(s) => write!(f, "error loading contract artifact: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractVerification(s) => {
                write!(f, "failed to verify contract on the network: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
