//! Loading of compiled contract artifacts and their compiler build info
//!
//! Artifacts follow the hardhat layout: `<Name>.json` holds the bytecode, its
//! sibling `<Name>.dbg.json` points at the build-info file that carries the
//! compiler version and the standard json input used for verification.

use std::path::{Path, PathBuf};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;

use crate::{errors::ScriptError, utils::get_json_from_file};

/// A compiled contract, ready to be deployed
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Name of the contract
    pub contract_name: String,
    /// Path of the contract source, relative to the project root
    pub source_name: String,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
    /// Location of the artifact on disk
    path: PathBuf,
}

/// The compiler input and version that produced an artifact
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Full solc version, e.g. `0.8.20+commit.a1b79de6`
    pub solc_long_version: String,
    /// Standard json input, serialized
    pub input: String,
}

impl ContractArtifact {
    /// Load the artifact at the given path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let parsed = get_json_from_file(path).map_err(ScriptError::ArtifactLoading)?;

        let contract_name = required_str(&parsed, "contractName", path)?;
        let source_name = required_str(&parsed, "sourceName", path)?;
        let bytecode = hex::decode(required_str(&parsed, "bytecode", path)?)
            .map_err(|e| ScriptError::ArtifactLoading(format!("invalid bytecode: {}", e)))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactLoading(format!(
                "{} has no bytecode, is it abstract?",
                contract_name
            )));
        }

        Ok(Self {
            contract_name,
            source_name,
            bytecode: bytecode.into(),
            path: path.to_path_buf(),
        })
    }

    /// Fully qualified name, as expected by explorers
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Load the build info of this artifact, following its debug file
    pub fn build_info(&self) -> Result<BuildInfo, ScriptError> {
        let dbg_path = self.path.with_extension("dbg.json");
        let dbg = get_json_from_file(&dbg_path).map_err(ScriptError::ArtifactLoading)?;
        let build_info_ref = required_str(&dbg, "buildInfo", &dbg_path)?;

        // The reference is relative to the debug file
        let build_info_path = dbg_path
            .parent()
            .map_or_else(|| PathBuf::from(&build_info_ref), |dir| dir.join(&build_info_ref));
        let build_info =
            get_json_from_file(&build_info_path).map_err(ScriptError::ArtifactLoading)?;

        let solc_long_version = required_str(&build_info, "solcLongVersion", &build_info_path)?;
        if !build_info["input"].is_object() {
            return Err(ScriptError::ArtifactLoading(format!(
                "missing compiler input in {}",
                build_info_path.display()
            )));
        }

        Ok(BuildInfo {
            solc_long_version,
            input: json::stringify(build_info["input"].clone()),
        })
    }
}

/// Read a mandatory string field of a json object
fn required_str(value: &JsonValue, key: &str, path: &Path) -> Result<String, ScriptError> {
    value[key].as_str().map(str::to_string).ok_or_else(|| {
        ScriptError::ArtifactLoading(format!("missing `{}` in {}", key, path.display()))
    })
}
