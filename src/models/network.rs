//! CIDR network: an address plus a contiguous netmask.

use super::address::{Address, AddressIter, IpVersion, IPV4_MAX_PREFIX_LENGTH};
use super::bounds::{covers, AddressBounds};
use super::mask::{mask_to_prefix, mask_value, parse_prefix_length, prefix_to_mask};
use super::range::Range;
use crate::error::{IpError, Result};
use crate::processing::{exclude, move_to, Subnets};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref CIDR_RE: Regex = Regex::new(r"^(.+?)/([0-9]+)$").expect("Invalid Regex?");
}

/// Aligned CIDR block.
///
/// Keeps the address it was built from; [`Network::network`] is that address
/// with the host bits cleared. Changing the address or prefix length yields a
/// new value.
///
/// Equality and hashing compare the kept address too, so `10.0.0.1/8` and
/// `10.0.0.0/8` are unequal values describing the same block; compare
/// [`Network::cidr`] or [`Network::network`] for block identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network {
    address: Address,
    mask: Address,
}

impl Network {
    /// Create a network from an address and a netmask of the same version.
    pub fn new(address: Address, mask: Address) -> Result<Network> {
        if address.version() != mask.version() {
            return Err(IpError::VersionMismatch(address.version(), mask.version()));
        }
        mask_to_prefix(&mask)?;
        Ok(Network { address, mask })
    }

    /// Create a network from an address and a prefix length.
    pub fn from_prefix(address: Address, prefix_length: u8) -> Result<Network> {
        let mask = prefix_to_mask(prefix_length, address.version())?;
        Ok(Network { address, mask })
    }

    /// Caller guarantees `prefix_length <= address.max_prefix_length()`.
    pub(crate) fn from_prefix_unchecked(address: Address, prefix_length: u8) -> Network {
        let version = address.version();
        Network {
            address,
            mask: Address::from_value(version, mask_value(prefix_length, version)),
        }
    }

    /// Parse `addr/len`, `addr mask` or a bare address (host network).
    ///
    /// # Examples
    /// ```
    /// use ip_range_tools::models::Network;
    /// let net = Network::parse("192.168.0.54/24").unwrap();
    /// assert_eq!(net.to_string(), "192.168.0.0/24");
    /// ```
    pub fn parse(text: &str) -> Result<Network> {
        let text = text.trim();
        if let Some(caps) = CIDR_RE.captures(text) {
            let address = Address::parse(&caps[1])?;
            let prefix_length = parse_prefix_length(&caps[2])?;
            return Network::from_prefix(address, prefix_length);
        }
        if let Some((address, mask)) = text.split_once(' ') {
            return Network::new(Address::parse(address)?, Address::parse(mask)?);
        }
        Ok(Network::from(Address::parse(text)?))
    }

    /// The address the network was built from (host bits kept).
    pub const fn address(&self) -> Address {
        self.address
    }

    pub const fn mask(&self) -> Address {
        self.mask
    }

    pub const fn version(&self) -> IpVersion {
        self.address.version()
    }

    pub fn prefix_length(&self) -> u8 {
        let host_bits = !self.mask.value() & self.version().max_value();
        self.version().max_prefix_length() - host_bits.count_ones() as u8
    }

    /// Network address, `address & mask`.
    pub fn network(&self) -> Address {
        Address::from_value(self.version(), self.address.value() & self.mask.value())
    }

    /// Broadcast address, `network | !mask`.
    pub fn broadcast(&self) -> Address {
        Address::from_value(self.version(), self.network().value() | !self.mask.value())
    }

    /// Wildcard (inverse) mask, `!mask`.
    pub fn wildcard(&self) -> Address {
        Address::from_value(self.version(), !self.mask.value())
    }

    pub fn first(&self) -> Address {
        self.network()
    }

    pub fn last(&self) -> Address {
        self.broadcast()
    }

    /// `network/prefix` text.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.network(), self.prefix_length())
    }

    /// Number of addresses in the block, `2^(max - prefix)`.
    pub fn block_size(&self) -> BigUint {
        let host_len = self.version().max_prefix_length() - self.prefix_length();
        BigUint::from(1u8) << usize::from(host_len)
    }

    /// Usable host range.
    ///
    /// IPv4 blocks larger than two addresses drop the network and broadcast
    /// addresses. /31, /32 and every IPv6 block return the full span.
    pub fn hosts(&self) -> Range {
        let (first, last) = (self.network(), self.broadcast());
        if self.version() == IpVersion::V4 && self.prefix_length() < IPV4_MAX_PREFIX_LENGTH - 1 {
            Range::new_unchecked(
                Address::from_value(IpVersion::V4, first.value() + 1),
                Address::from_value(IpVersion::V4, last.value() - 1),
            )
        } else {
            Range::new_unchecked(first, last)
        }
    }

    /// Same mask, different address.
    pub fn with_address(&self, address: Address) -> Result<Network> {
        Network::new(address, self.mask)
    }

    /// Same address, different prefix length.
    pub fn with_prefix_length(&self, prefix_length: u8) -> Result<Network> {
        Network::from_prefix(self.address, prefix_length)
    }

    /// True when `other` lies entirely inside this block.
    pub fn contains<B: AddressBounds + ?Sized>(&self, other: &B) -> bool {
        covers(self, other)
    }

    /// Minimal CIDR blocks covering this block minus `exclude`, ascending.
    ///
    /// `exclude` must lie inside this block.
    pub fn exclude<N: Into<Network>>(&self, exclude_net: N) -> Result<Vec<Network>> {
        exclude(self, &exclude_net.into())
    }

    /// Lazily enumerate the sub-blocks of `prefix_length` tiling this block.
    pub fn move_to(&self, prefix_length: u8) -> Result<Subnets> {
        move_to(self, prefix_length)
    }

    /// Every address of the block, ascending. Restartable by calling again.
    pub fn iter(&self) -> AddressIter {
        AddressIter::new(self.network(), self.broadcast())
    }

    pub fn to_range(&self) -> Range {
        Range::from(*self)
    }
}

impl From<Address> for Network {
    /// Host network of maximal prefix length.
    fn from(address: Address) -> Network {
        Network::from_prefix_unchecked(address, address.max_prefix_length())
    }
}

impl AddressBounds for Network {
    fn first_address(&self) -> Address {
        self.network()
    }

    fn last_address(&self) -> Address {
        self.broadcast()
    }
}

impl<'a> IntoIterator for &'a Network {
    type Item = Address;
    type IntoIter = AddressIter;

    fn into_iter(self) -> AddressIter {
        self.iter()
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Network {
    /// Ascending network address, then shorter prefix first.
    fn cmp(&self, other: &Network) -> Ordering {
        self.network()
            .cmp(&other.network())
            .then_with(|| self.prefix_length().cmp(&other.prefix_length()))
            .then_with(|| self.address.cmp(&other.address))
    }
}

impl FromStr for Network {
    type Err = IpError;

    fn from_str(s: &str) -> Result<Network> {
        Network::parse(s)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_length())
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Network({}/{})", self.address, self.prefix_length())
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.address, self.prefix_length());
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::parse(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
