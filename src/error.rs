//! Error type shared by every address, network and range operation.

use crate::models::IpVersion;
use thiserror::Error;

/// Failures of the address algebra.
///
/// Every public operation either succeeds or returns one of these; nothing is
/// clamped, truncated or wrapped silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IpError {
    #[error("Invalid IP address format => '{0}'")]
    InvalidFormat(String),
    #[error("Invalid argument => {0}")]
    InvalidArgument(String),
    #[error("IP version mismatch => {0} and {1}")]
    VersionMismatch(IpVersion, IpVersion),
    #[error("Invalid netmask => '{0}'")]
    InvalidMask(String),
    #[error("First address {first} is greater than last address {last}")]
    RangeOrderViolation { first: String, last: String },
    #[error("Exclude subnet {exclude} not within target network {network}")]
    NotContained { network: String, exclude: String },
    #[error("Address overflow => {address} + {step}")]
    Overflow { address: String, step: u128 },
    #[error("Address underflow => {address} - {step}")]
    Underflow { address: String, step: u128 },
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, IpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            IpError::InvalidFormat("abc".to_string()).to_string(),
            "Invalid IP address format => 'abc'"
        );
        assert_eq!(
            IpError::VersionMismatch(IpVersion::V4, IpVersion::V6).to_string(),
            "IP version mismatch => IPv4 and IPv6"
        );
        assert_eq!(
            IpError::NotContained {
                network: "192.0.2.0/28".to_string(),
                exclude: "192.0.3.0/24".to_string(),
            }
            .to_string(),
            "Exclude subnet 192.0.3.0/24 not within target network 192.0.2.0/28"
        );
    }
}
