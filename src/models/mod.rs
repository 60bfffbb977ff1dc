//! Address-space value types.
//!
//! This module contains the immutable values the algebra works on:
//! - [`Address`] - IPv4/IPv6 address with ordering and arithmetic
//! - [`Network`] - aligned CIDR block (address + contiguous mask)
//! - [`Range`] - arbitrary inclusive address interval
//! - mask helpers converting between prefix lengths and netmasks

mod address;
mod bounds;
mod mask;
mod network;
mod range;

// Re-export public types
pub use address::{
    Address, AddressIter, IpVersion, IPV4_MAX_PREFIX_LENGTH, IPV4_OCTETS, IPV6_MAX_PREFIX_LENGTH,
    IPV6_OCTETS,
};
pub use bounds::AddressBounds;
pub use mask::{mask_to_prefix, parse_prefix_length, prefix_to_mask};
pub use network::Network;
pub use range::Range;
