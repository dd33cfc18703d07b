//! Scripts for deploying, pricing and verifying the BFM token presale contract.

#![deny(clippy::missing_docs_in_private_items)]

pub mod artifact;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod network;
pub mod price;
pub mod utils;

/// Our network interaction utils
pub mod tx;

/// Our explorer verification utils
pub mod verify;

// Our output utils
mod output_writer;

#[cfg(test)]
mod test_utils;
