//! IPv4/IPv6 address value with ordering and arithmetic.
//!
//! Provides [`Address`], a single immutable type covering both IP versions,
//! along with the text, hex, binary and integer parsers and the lazy
//! [`AddressIter`] used to walk networks and ranges.

use crate::error::{IpError, Result};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::FusedIterator;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length of an IPv4 network (32 bits).
pub const IPV4_MAX_PREFIX_LENGTH: u8 = 32;
/// Maximum prefix length of an IPv6 network (128 bits).
pub const IPV6_MAX_PREFIX_LENGTH: u8 = 128;
/// Number of octets in an IPv4 address.
pub const IPV4_OCTETS: usize = 4;
/// Number of octets in an IPv6 address.
pub const IPV6_OCTETS: usize = 16;

lazy_static! {
    static ref HEX_RE: Regex =
        Regex::new(r"^([0-9a-fA-F]{8}|[0-9a-fA-F]{32})$").expect("Invalid Regex?");
    static ref BIN_RE: Regex = Regex::new(r"^([01]{32}|[01]{128})$").expect("Invalid Regex?");
    static ref DEC_RE: Regex = Regex::new(r"^[0-9]+$").expect("Invalid Regex?");
}

/// IP protocol version of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

impl IpVersion {
    /// 32 for IPv4, 128 for IPv6.
    pub const fn max_prefix_length(self) -> u8 {
        match self {
            IpVersion::V4 => IPV4_MAX_PREFIX_LENGTH,
            IpVersion::V6 => IPV6_MAX_PREFIX_LENGTH,
        }
    }

    /// 4 for IPv4, 16 for IPv6.
    pub const fn octet_count(self) -> usize {
        match self {
            IpVersion::V4 => IPV4_OCTETS,
            IpVersion::V6 => IPV6_OCTETS,
        }
    }

    /// Highest address value of this version (all bits set).
    pub(crate) const fn max_value(self) -> u128 {
        match self {
            IpVersion::V4 => u32::MAX as u128,
            IpVersion::V6 => u128::MAX,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

/// Immutable IPv4 or IPv6 address.
///
/// The address is held as an unsigned big-endian integer of the version's
/// width, so ordering is numeric ordering. Addresses of different versions
/// order all IPv4 before all IPv6.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    version: IpVersion,
    value: u128,
}

impl Address {
    /// Parse an address literal.
    ///
    /// Accepts `0x`-prefixed hex, `0b`-prefixed binary, a decimal integer
    /// (IPv4 when it fits in 32 bits, IPv6 otherwise) or canonical text.
    ///
    /// # Examples
    /// ```
    /// use ip_range_tools::models::Address;
    /// let a = Address::parse("0xc0000201").unwrap();
    /// assert_eq!(a.to_string(), "192.0.2.1");
    /// ```
    pub fn parse(text: &str) -> Result<Address> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix("0x") {
            return Address::from_hex(hex);
        }
        if let Some(bits) = text.strip_prefix("0b") {
            return Address::from_bits(bits);
        }
        if DEC_RE.is_match(text) {
            return Address::from_decimal(text);
        }
        Address::from_text(text)
    }

    /// Parse dotted-quad IPv4 or colon-hex IPv6 text.
    pub fn from_text(text: &str) -> Result<Address> {
        IpAddr::from_str(text)
            .map(Address::from)
            .map_err(|_| IpError::InvalidFormat(text.to_string()))
    }

    /// Parse exactly 8 (IPv4) or 32 (IPv6) hex digits, without prefix.
    pub fn from_hex(hex: &str) -> Result<Address> {
        if !HEX_RE.is_match(hex) {
            return Err(IpError::InvalidFormat(format!("0x{hex}")));
        }
        let version = if hex.len() == 8 {
            IpVersion::V4
        } else {
            IpVersion::V6
        };
        let value = u128::from_str_radix(hex, 16)
            .map_err(|_| IpError::InvalidFormat(format!("0x{hex}")))?;
        Ok(Address { version, value })
    }

    /// Parse exactly 32 (IPv4) or 128 (IPv6) bit characters, without prefix.
    pub fn from_bits(bits: &str) -> Result<Address> {
        if !BIN_RE.is_match(bits) {
            return Err(IpError::InvalidFormat(format!("0b{bits}")));
        }
        let version = if bits.len() == 32 {
            IpVersion::V4
        } else {
            IpVersion::V6
        };
        let value = u128::from_str_radix(bits, 2)
            .map_err(|_| IpError::InvalidFormat(format!("0b{bits}")))?;
        Ok(Address { version, value })
    }

    /// Build an address of `version` from its integer value.
    pub fn from_integer(value: &BigUint, version: IpVersion) -> Result<Address> {
        match value.to_u128() {
            Some(value) if value <= version.max_value() => Ok(Address { version, value }),
            _ => Err(IpError::InvalidArgument(format!(
                "{value} does not fit in an {version} address"
            ))),
        }
    }

    fn from_decimal(text: &str) -> Result<Address> {
        let value =
            BigUint::from_str(text).map_err(|_| IpError::InvalidFormat(text.to_string()))?;
        let version = if value <= BigUint::from(u32::MAX) {
            IpVersion::V4
        } else {
            IpVersion::V6
        };
        Address::from_integer(&value, version).map_err(|_| IpError::InvalidFormat(text.to_string()))
    }

    /// Build an address from packed network-order bytes (4 or 16 of them).
    pub fn from_octets(octets: &[u8]) -> Result<Address> {
        let version = match octets.len() {
            IPV4_OCTETS => IpVersion::V4,
            IPV6_OCTETS => IpVersion::V6,
            n => return Err(IpError::InvalidFormat(format!("{n} raw address bytes"))),
        };
        let value = octets
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));
        Ok(Address { version, value })
    }

    /// Build an address from a raw value, dropping bits above the version width.
    pub(crate) const fn from_value(version: IpVersion, value: u128) -> Address {
        Address {
            version,
            value: value & version.max_value(),
        }
    }

    pub(crate) const fn value(&self) -> u128 {
        self.value
    }

    pub const fn version(&self) -> IpVersion {
        self.version
    }

    pub const fn max_prefix_length(&self) -> u8 {
        self.version.max_prefix_length()
    }

    pub const fn octet_count(&self) -> usize {
        self.version.octet_count()
    }

    /// Packed network-order bytes, 4 or 16 long.
    pub fn octets(&self) -> Vec<u8> {
        let bytes = self.value.to_be_bytes();
        bytes[IPV6_OCTETS - self.octet_count()..].to_vec()
    }

    /// Exact integer value of the address.
    pub fn to_integer(&self) -> BigUint {
        BigUint::from(self.value)
    }

    /// Fixed-width bit string, 32 or 128 characters.
    pub fn to_bits(&self) -> String {
        format!(
            "{:0width$b}",
            self.value,
            width = self.max_prefix_length() as usize
        )
    }

    /// Fixed-width lowercase hex string, 8 or 32 characters.
    pub fn to_hex(&self) -> String {
        format!("{:0width$x}", self.value, width = self.octet_count() * 2)
    }

    /// DNS reverse-lookup name (`in-addr.arpa` / `ip6.arpa`).
    pub fn reverse_pointer(&self) -> String {
        match self.version {
            IpVersion::V4 => {
                let octets: Vec<String> =
                    self.octets().iter().rev().map(|o| o.to_string()).collect();
                format!("{}.in-addr.arpa", octets.join("."))
            }
            IpVersion::V6 => {
                let nibbles: Vec<String> =
                    self.to_hex().chars().rev().map(|c| c.to_string()).collect();
                format!("{}.ip6.arpa", nibbles.join("."))
            }
        }
    }

    /// The address `step` positions higher.
    ///
    /// Fails with [`IpError::Overflow`] when the result would pass the
    /// highest address of the version.
    pub fn next(&self, step: u128) -> Result<Address> {
        self.value
            .checked_add(step)
            .filter(|value| *value <= self.version.max_value())
            .map(|value| Address {
                version: self.version,
                value,
            })
            .ok_or_else(|| IpError::Overflow {
                address: self.to_string(),
                step,
            })
    }

    /// The address `step` positions lower.
    ///
    /// Fails with [`IpError::Underflow`] below the all-zero address.
    pub fn prev(&self, step: u128) -> Result<Address> {
        self.value
            .checked_sub(step)
            .map(|value| Address {
                version: self.version,
                value,
            })
            .ok_or_else(|| IpError::Underflow {
                address: self.to_string(),
                step,
            })
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self.version {
            IpVersion::V4 => IpAddr::V4(Ipv4Addr::from(self.value as u32)),
            IpVersion::V6 => IpAddr::V6(Ipv6Addr::from(self.value)),
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Address {
        Address {
            version: IpVersion::V4,
            value: u128::from(u32::from(addr)),
        }
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Address {
        Address {
            version: IpVersion::V6,
            value: u128::from(addr),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Address {
        match addr {
            IpAddr::V4(addr) => Address::from(addr),
            IpAddr::V6(addr) => Address::from(addr),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> IpAddr {
        addr.to_ip_addr()
    }
}

impl FromStr for Address {
    type Err = IpError;

    fn from_str(s: &str) -> Result<Address> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_ip_addr(), f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}

/// Lazy ascending walk over an inclusive address interval.
///
/// Produced by [`Network::iter`](super::Network::iter) and
/// [`Range::iter`](super::Range::iter); calling those again restarts the walk.
#[derive(Debug, Clone)]
pub struct AddressIter {
    next: Option<Address>,
    last: Address,
}

impl AddressIter {
    pub(crate) fn new(first: Address, last: Address) -> AddressIter {
        AddressIter {
            next: (first <= last).then_some(first),
            last,
        }
    }
}

impl Iterator for AddressIter {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        let current = self.next?;
        self.next = if current >= self.last {
            None
        } else {
            Some(Address::from_value(current.version, current.value + 1))
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            None => (0, Some(0)),
            Some(current) => {
                match usize::try_from(self.last.value - current.value)
                    .ok()
                    .and_then(|n| n.checked_add(1))
                {
                    Some(n) => (n, Some(n)),
                    None => (usize::MAX, None),
                }
            }
        }
    }
}

impl FusedIterator for AddressIter {}
