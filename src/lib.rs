// cargo watch -x 'fmt' -x 'test'

//! IPv4/IPv6 address, network and range algebra.
//!
//! - [`models`] - value types: [`Address`], [`Network`], [`Range`]
//! - [`processing`] - exclusion, subnetting and range summarization
//! - [`output`] - text, CSV and JSON rendering
//! - [`config`] - environment configuration for the binary
//! - [`cli`] - command dispatch for the binary

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

// Re-export the main types for convenience
pub use error::{IpError, Result};
pub use models::{
    mask_to_prefix, prefix_to_mask, Address, AddressBounds, AddressIter, IpVersion, Network, Range,
};
pub use processing::Subnets;
