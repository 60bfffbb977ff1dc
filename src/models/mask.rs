//! Netmask and prefix length conversions.

use super::address::{Address, IpVersion};
use crate::error::{IpError, Result};

/// Convert a CIDR prefix length to a netmask address.
///
/// # Examples
/// ```
/// use ip_range_tools::models::{prefix_to_mask, IpVersion};
/// assert_eq!(prefix_to_mask(24, IpVersion::V4).unwrap().to_string(), "255.255.255.0");
/// ```
pub fn prefix_to_mask(prefix_length: u8, version: IpVersion) -> Result<Address> {
    if prefix_length > version.max_prefix_length() {
        return Err(IpError::InvalidArgument(format!(
            "prefix length {prefix_length} outside 0..={} for {version}",
            version.max_prefix_length()
        )));
    }
    Ok(Address::from_value(
        version,
        mask_value(prefix_length, version),
    ))
}

/// Count the leading one bits of a netmask.
///
/// The mask must be a contiguous run of ones followed by zeros.
pub fn mask_to_prefix(mask: &Address) -> Result<u8> {
    let host_bits = !mask.value() & mask.version().max_value();
    // host part must be 2^k - 1
    if host_bits & host_bits.wrapping_add(1) != 0 {
        return Err(IpError::InvalidMask(mask.to_string()));
    }
    Ok(mask.max_prefix_length() - host_bits.count_ones() as u8)
}

/// Parse the decimal prefix length of CIDR text.
///
/// Only checks that the text is a number; the upper bound depends on the
/// address version and is enforced by [`prefix_to_mask`].
pub fn parse_prefix_length(text: &str) -> Result<u8> {
    text.trim()
        .parse::<u8>()
        .map_err(|_| IpError::InvalidArgument(format!("invalid prefix length '{text}'")))
}

/// Raw mask bits for a prefix length already known to be in range.
pub(crate) fn mask_value(prefix_length: u8, version: IpVersion) -> u128 {
    let all_bits = version.max_value();
    let host_bits = all_bits
        .checked_shr(u32::from(prefix_length))
        .unwrap_or(0);
    all_bits ^ host_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_to_mask() {
        let cases = [
            (0, IpVersion::V4, "0.0.0.0"),
            (8, IpVersion::V4, "255.0.0.0"),
            (24, IpVersion::V4, "255.255.255.0"),
            (32, IpVersion::V4, "255.255.255.255"),
            (0, IpVersion::V6, "::"),
            (64, IpVersion::V6, "ffff:ffff:ffff:ffff::"),
            (128, IpVersion::V6, "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
        ];
        for (prefix, version, expected) in cases {
            assert_eq!(
                prefix_to_mask(prefix, version).unwrap(),
                Address::parse(expected).unwrap()
            );
        }
    }

    #[test]
    fn test_prefix_to_mask_invalid() {
        assert!(matches!(
            prefix_to_mask(33, IpVersion::V4),
            Err(IpError::InvalidArgument(_))
        ));
        assert!(matches!(
            prefix_to_mask(129, IpVersion::V6),
            Err(IpError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_prefix_length() {
        assert_eq!(parse_prefix_length("24").unwrap(), 24);
        assert_eq!(parse_prefix_length(" 0 ").unwrap(), 0);
        assert!(matches!(
            parse_prefix_length("-1"),
            Err(IpError::InvalidArgument(_))
        ));
        assert!(parse_prefix_length("prefix").is_err());
        assert!(parse_prefix_length("256").is_err());
    }

    #[test]
    fn test_mask_round_trip() {
        for version in [IpVersion::V4, IpVersion::V6] {
            for prefix in 0..=version.max_prefix_length() {
                let mask = prefix_to_mask(prefix, version).unwrap();
                assert_eq!(mask_to_prefix(&mask).unwrap(), prefix);
            }
        }
    }

    #[test]
    fn test_mask_to_prefix_non_contiguous() {
        let mask = Address::parse("255.0.255.0").unwrap();
        assert_eq!(
            mask_to_prefix(&mask),
            Err(IpError::InvalidMask("255.0.255.0".to_string()))
        );
        let mask = Address::parse("0.0.0.255").unwrap();
        assert!(mask_to_prefix(&mask).is_err());
        let mask = Address::parse("ffff::ffff").unwrap();
        assert!(mask_to_prefix(&mask).is_err());
    }
}
