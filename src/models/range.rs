//! Arbitrary inclusive address range, not necessarily CIDR aligned.

use super::address::{Address, AddressIter, IpVersion};
use super::bounds::{covers, AddressBounds};
use super::network::Network;
use crate::error::{IpError, Result};
use crate::processing::{span_network, summarize};
use num_bigint::BigUint;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive `[first, last]` interval of one IP version, `first <= last`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    first: Address,
    last: Address,
}

impl Range {
    /// Create a range, checking versions and order.
    pub fn new(first: Address, last: Address) -> Result<Range> {
        if first.version() != last.version() {
            return Err(IpError::VersionMismatch(first.version(), last.version()));
        }
        if first > last {
            return Err(IpError::RangeOrderViolation {
                first: first.to_string(),
                last: last.to_string(),
            });
        }
        Ok(Range { first, last })
    }

    /// Caller guarantees same version and `first <= last`.
    pub(crate) const fn new_unchecked(first: Address, last: Address) -> Range {
        Range { first, last }
    }

    /// Parse range text.
    ///
    /// Recognised, in this order: CIDR (`addr/len`), `addr mask`, dash range
    /// (`addr-addr`), IPv4 wildcard (`10.1.*.*`) and a bare address.
    ///
    /// # Examples
    /// ```
    /// use ip_range_tools::models::Range;
    /// let range = Range::parse("127.*.0.0").unwrap();
    /// assert_eq!(range.to_string(), "127.0.0.0-127.255.0.0");
    /// ```
    pub fn parse(text: &str) -> Result<Range> {
        let text = text.trim();
        if text.contains('/') || text.contains(' ') {
            return Ok(Range::from(Network::parse(text)?));
        }
        if let Some((first, last)) = text.split_once('-') {
            return Range::new(Address::parse(first)?, Address::parse(last)?);
        }
        if text.contains('*') {
            let first = Address::parse(&text.replace('*', "0"))?;
            let last = Address::parse(&text.replace('*', "255"))?;
            if first.version() != IpVersion::V4 || last.version() != IpVersion::V4 {
                return Err(IpError::InvalidFormat(text.to_string()));
            }
            return Range::new(first, last);
        }
        Ok(Range::from(Address::parse(text)?))
    }

    pub const fn first(&self) -> Address {
        self.first
    }

    pub const fn last(&self) -> Address {
        self.last
    }

    pub const fn version(&self) -> IpVersion {
        self.first.version()
    }

    /// True when `other` lies entirely inside `[first, last]`.
    pub fn contains<B: AddressBounds + ?Sized>(&self, other: &B) -> bool {
        covers(self, other)
    }

    /// Smallest CIDR block holding both ends of the range.
    pub fn span_network(&self) -> Network {
        span_network(self)
    }

    /// Minimal ascending list of CIDR blocks exactly covering the range.
    pub fn networks(&self) -> Result<Vec<Network>> {
        summarize(self)
    }

    /// Every address of the range, ascending. Restartable by calling again.
    pub fn iter(&self) -> AddressIter {
        AddressIter::new(self.first, self.last)
    }

    /// Exact number of addresses, `last - first + 1`.
    pub fn count(&self) -> BigUint {
        BigUint::from(self.last.value() - self.first.value()) + 1u8
    }
}

impl From<Network> for Range {
    fn from(network: Network) -> Range {
        Range::new_unchecked(network.network(), network.broadcast())
    }
}

impl From<Address> for Range {
    fn from(address: Address) -> Range {
        Range::new_unchecked(address, address)
    }
}

impl AddressBounds for Range {
    fn first_address(&self) -> Address {
        self.first
    }

    fn last_address(&self) -> Address {
        self.last
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = Address;
    type IntoIter = AddressIter;

    fn into_iter(self) -> AddressIter {
        self.iter()
    }
}

impl FromStr for Range {
    type Err = IpError;

    fn from_str(s: &str) -> Result<Range> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Range({self})")
    }
}

impl Serialize for Range {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Range, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Range::parse(&s).map_err(|e| de::Error::custom(format!("invalid range {s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(text: &str) -> Address {
        Address::parse(text).unwrap()
    }

    #[test]
    fn test_parse() {
        let cases = [
            ("127.0.0.1-127.255.255.255", "127.0.0.1", "127.255.255.255"),
            ("127.0.0.1/24", "127.0.0.0", "127.0.0.255"),
            ("127.*.0.0", "127.0.0.0", "127.255.0.0"),
            ("127.255.255.0", "127.255.255.0", "127.255.255.0"),
            ("10.0.0.1 255.255.0.0", "10.0.0.0", "10.0.255.255"),
            (
                "2a02:8108::/31",
                "2a02:8108::",
                "2a02:8109:ffff:ffff:ffff:ffff:ffff:ffff",
            ),
            (
                "2001:db8::3e81:d8ff:feee:0/127",
                "2001:0DB8:0000:0000:3E81:D8FF:FEEE:0000",
                "2001:0DB8:0000:0000:3E81:D8FF:FEEE:0001",
            ),
        ];
        for (text, first, last) in cases {
            let range = Range::parse(text).unwrap();
            assert_eq!(range.first(), ip(first), "first of {text}");
            assert_eq!(range.last(), ip(last), "last of {text}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Range::parse("10.0.0.9-10.0.0.1"),
            Err(IpError::RangeOrderViolation { .. })
        ));
        assert_eq!(
            Range::parse("10.0.0.1-::1"),
            Err(IpError::VersionMismatch(IpVersion::V4, IpVersion::V6))
        );
        assert!(matches!(
            Range::parse("2001:db8::*"),
            Err(IpError::InvalidFormat(_))
        ));
        assert!(Range::parse("10.0.0.x").is_err());
        assert!(Range::parse("10.0.0.0/33").is_err());
    }

    #[test]
    fn test_new_equals_parse() {
        let parsed = Range::parse("222.168.0.0-222.169.255.255").unwrap();
        let built = Range::new(ip("222.168.0.0"), ip("222.169.255.255")).unwrap();
        assert_eq!(parsed, built);
        assert!(parsed.contains(&ip("222.168.1.0")));
        assert!(!parsed.contains(&ip("222.170.1.0")));
    }

    #[test]
    fn test_contains() {
        let cases = [
            ("192.168.*.*", "192.168.245.15", true),
            ("192.168.*.*", "192.169.255.255", false),
            ("10.10.45.48/28", "10.10.45.58", true),
            ("2001:db8::/64", "2001:db8::ffff", true),
            ("2001:db8::/64", "2001:db8:ffff::", false),
        ];
        for (range, find, expected) in cases {
            assert_eq!(
                Range::parse(range).unwrap().contains(&ip(find)),
                expected,
                "{range} contains {find}"
            );
        }
    }

    #[test]
    fn test_contains_boundaries() {
        let range = Range::parse("10.0.0.5-10.0.0.9").unwrap();
        assert!(range.contains(&ip("10.0.0.5")));
        assert!(range.contains(&ip("10.0.0.9")));
        assert!(!range.contains(&ip("10.0.0.4")));
        assert!(!range.contains(&ip("10.0.0.10")));
        assert!(range.contains(&Range::parse("10.0.0.6-10.0.0.9").unwrap()));
        assert!(!range.contains(&Range::parse("10.0.0.6-10.0.0.10").unwrap()));
        assert!(range.contains(&Network::parse("10.0.0.8/31").unwrap()));
        assert!(!range.contains(&Network::parse("10.0.0.8/30").unwrap()));
        assert!(!range.contains(&ip("::a00:5")));
    }

    #[test]
    fn test_iteration() {
        let range = Range::parse("192.168.2.0-192.168.2.7").unwrap();
        let result: Vec<String> = range.iter().map(|a| a.to_string()).collect();
        assert_eq!(
            result,
            vec![
                "192.168.2.0",
                "192.168.2.1",
                "192.168.2.2",
                "192.168.2.3",
                "192.168.2.4",
                "192.168.2.5",
                "192.168.2.6",
                "192.168.2.7"
            ]
        );
        let mut seen = 0;
        for _ in &range {
            seen += 1;
        }
        assert_eq!(seen, 8);
    }

    #[test]
    fn test_count() {
        let cases: [(&str, u64); 8] = [
            ("127.0.0.0/31", 2),
            ("2001:db8::/120", 256),
            ("2a02:8108:4:3:2:1::", 1),
            ("2a02:8108:4:3:2::/127", 2),
            ("2a02:8108:4:3:2::/126", 4),
            ("2a02:8108:4:3:2::/125", 8),
            ("2a02:8108:4:3:2::/124", 16),
            ("0.0.0.0/0", 4294967296),
        ];
        for (text, expected) in cases {
            assert_eq!(Range::parse(text).unwrap().count(), BigUint::from(expected), "{text}");
        }

        let big = Range::parse("2a02:8108::/31").unwrap().count();
        assert_eq!(big, BigUint::from(1u8) << 97usize);
        assert_eq!(big.to_string(), "158456325028528675187087900672");

        let all = Range::parse("::/0").unwrap().count();
        assert_eq!(all, BigUint::from(u128::MAX) + 1u8);
    }

    #[test]
    fn test_serde() {
        let range = Range::parse("10.0.0.1-10.0.0.9").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"10.0.0.1-10.0.0.9\"");
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }
}
