//! Verification through an Etherscan compatible explorer API

use std::time::Duration;

use alloy::{hex, primitives::Address};
use async_trait::async_trait;
use json::JsonValue;
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    artifact::ContractArtifact,
    constants::{VERIFY_MAX_STATUS_CHECKS, VERIFY_POLL_INTERVAL_SECS},
    errors::ScriptError,
    tx::abi::ConstructorArgs,
    verify::Verifier,
};

/// Outcome of a source submission
#[derive(Debug, Clone, PartialEq, Eq)]
enum Submission {
    /// Accepted, to be followed with the given guid
    Queued(String),
    /// The explorer already knows this source
    AlreadyVerified,
}

/// Outcome of a status check
#[derive(Debug, Clone, PartialEq, Eq)]
enum VerificationStatus {
    /// Still in the explorer queue
    Pending,
    /// Source matched
    Verified,
    /// Source rejected, with the explorer message
    Failed(String),
}

/// Verifier submitting standard json input to an Etherscan like API
pub struct EtherscanVerifier {
    /// HTTP client
    client: Client,
    /// Explorer API endpoint, unknown for some chains
    api_url: Option<String>,
    /// Explorer API key
    api_key: Option<String>,
    /// The artifact of the contract to verify
    artifact: ContractArtifact,
    /// Delay between two status checks
    poll_interval: Duration,
}

impl EtherscanVerifier {
    /// Build a verifier for `artifact` against the given explorer API
    pub fn new(
        api_url: Option<String>,
        api_key: Option<String>,
        artifact: ContractArtifact,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            artifact,
            poll_interval: Duration::from_secs(VERIFY_POLL_INTERVAL_SECS),
        }
    }

    /// Override the delay between two status checks
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Submit the contract source, returning the explorer answer
    async fn submit(
        &self,
        api_url: &str,
        api_key: &str,
        address: Address,
        constructor_args: &ConstructorArgs,
    ) -> Result<Submission, ScriptError> {
        let build_info = self.artifact.build_info()?;
        let contract_address = address.to_string();
        let contract_name = self.artifact.fully_qualified_name();
        let compiler_version = format!("v{}", build_info.solc_long_version);
        let encoded_args = hex::encode(constructor_args.abi_encode());

        debug!(
            "Submitting {} ({}) to {}",
            contract_name, compiler_version, api_url
        );

        // The misspelled `constructorArguements` is the explorer's field name
        let form = [
            ("apikey", api_key),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", contract_address.as_str()),
            ("sourceCode", build_info.input.as_str()),
            ("codeformat", "solidity-standard-json-input"),
            ("contractname", contract_name.as_str()),
            ("compilerversion", compiler_version.as_str()),
            ("constructorArguements", encoded_args.as_str()),
        ];

        let body = self
            .client
            .post(api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ScriptError::ContractVerification(e.to_string()))?
            .text()
            .await
            .map_err(|e| ScriptError::ContractVerification(e.to_string()))?;

        parse_submission(&body)
    }

    /// Ask the explorer where the submission `guid` stands
    async fn check_status(
        &self,
        api_url: &str,
        api_key: &str,
        guid: &str,
    ) -> Result<VerificationStatus, ScriptError> {
        let query = [
            ("apikey", api_key),
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ];

        let body = self
            .client
            .get(api_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ScriptError::ContractVerification(e.to_string()))?
            .text()
            .await
            .map_err(|e| ScriptError::ContractVerification(e.to_string()))?;

        parse_status(&body)
    }
}

#[async_trait]
impl Verifier for EtherscanVerifier {
    async fn verify(
        &self,
        address: Address,
        constructor_args: ConstructorArgs,
    ) -> Result<(), ScriptError> {
        let api_url = self.api_url.as_deref().ok_or_else(|| {
            ScriptError::ContractVerification("no explorer API known for this network".to_string())
        })?;
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ScriptError::ContractVerification("missing explorer API key".to_string())
        })?;

        let guid = match self.submit(api_url, api_key, address, &constructor_args).await? {
            Submission::AlreadyVerified => {
                info!("Contract {} is already verified", address);
                return Ok(());
            }
            Submission::Queued(guid) => guid,
        };
        info!("Verification submitted, guid: {}", guid);

        for _ in 0..VERIFY_MAX_STATUS_CHECKS {
            tokio::time::sleep(self.poll_interval).await;

            match self.check_status(api_url, api_key, &guid).await? {
                VerificationStatus::Pending => debug!("Verification {} pending", guid),
                VerificationStatus::Verified => return Ok(()),
                VerificationStatus::Failed(reason) => {
                    return Err(ScriptError::ContractVerification(reason))
                }
            }
        }

        Err(ScriptError::ContractVerification(format!(
            "still pending after {} status checks, guid {}",
            VERIFY_MAX_STATUS_CHECKS, guid
        )))
    }
}

/// Parse an explorer response into its `status` flag and `result` text
fn parse_response(body: &str) -> Result<(bool, String), ScriptError> {
    let parsed: JsonValue =
        json::parse(body).map_err(|e| ScriptError::ContractVerification(e.to_string()))?;

    let result = parsed["result"].as_str().ok_or_else(|| {
        ScriptError::ContractVerification(format!("unexpected explorer response: {}", body))
    })?;

    Ok((parsed["status"] == "1", result.to_string()))
}

/// Whether an explorer message means the source is already published
fn is_already_verified(result: &str) -> bool {
    result.to_lowercase().contains("already verified")
}

/// Interpret the answer to a source submission
fn parse_submission(body: &str) -> Result<Submission, ScriptError> {
    let (ok, result) = parse_response(body)?;

    if ok {
        Ok(Submission::Queued(result))
    } else if is_already_verified(&result) {
        Ok(Submission::AlreadyVerified)
    } else {
        Err(ScriptError::ContractVerification(result))
    }
}

/// Interpret the answer to a status check
fn parse_status(body: &str) -> Result<VerificationStatus, ScriptError> {
    let (ok, result) = parse_response(body)?;

    if result.starts_with("Pending") {
        Ok(VerificationStatus::Pending)
    } else if (ok && result.starts_with("Pass")) || is_already_verified(&result) {
        Ok(VerificationStatus::Verified)
    } else {
        Ok(VerificationStatus::Failed(result))
    }
}
