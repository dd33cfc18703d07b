//! Deployment record, keeping track of deployed addresses per network

use std::{fmt::LowerHex, fs, path::Path};

use alloy::primitives::Address;
use json::JsonValue;

use crate::{errors::ScriptError, utils::get_json_from_file};

/// Fields stored for each deployed contract
pub enum OutputKeys {
    /// Address of the deployed contract
    Address,
    /// Hash of the deployment transaction
    DeploymentTx,
}

impl OutputKeys {
    /// Json key of the field
    fn key(&self) -> &'static str {
        match self {
            OutputKeys::Address => "address",
            OutputKeys::DeploymentTx => "deploymentTx",
        }
    }
}

/// Read the address of `contract` deployed on `network`
pub fn read_deployed_address(
    file_path: &Path,
    network: &str,
    contract: &str,
) -> Result<Address, ScriptError> {
    if !file_path.exists() {
        return Err(ScriptError::JsonOutputError(format!(
            "deployment record {} not found",
            file_path.display()
        )));
    }

    let parsed_json = get_json_from_file(file_path).map_err(ScriptError::JsonOutputError)?;
    let value = parsed_json[network][contract][OutputKeys::Address.key()]
        .as_str()
        .ok_or_else(|| {
            ScriptError::JsonOutputError(format!("no {} deployment on {}", contract, network))
        })?;

    value
        .parse::<Address>()
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}

/// Writes one field of the deployment record of `contract` on `network`
pub fn write_output_file<T: LowerHex>(
    file_path: &Path,
    network: &str,
    contract: &str,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !file_path.exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    // Parse it's json content into objects
    let mut parsed_json = get_json_from_file(file_path).map_err(ScriptError::JsonOutputError)?;

    // Update the right key
    parsed_json[network][contract][key.key()] = JsonValue::String(format!("{value:#x}"));

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}
