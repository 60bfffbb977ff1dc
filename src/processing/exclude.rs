//! Address-space punching.
//!
//! Removes one block from a larger block by repeated halving, emitting the
//! half that does not hold the excluded block at every step.

use crate::error::{IpError, Result};
use crate::models::Network;

/// Minimal CIDR blocks covering `network` minus `excluded`, ascending.
///
/// # Arguments
/// * `network` - The block to punch a hole into
/// * `excluded` - The block to remove; must lie inside `network`
///
/// # Returns
/// * `Ok(Vec<Network>)` - `excluded.prefix - network.prefix` blocks
/// * `Err` - [`IpError::VersionMismatch`] or [`IpError::NotContained`]
pub fn exclude(network: &Network, excluded: &Network) -> Result<Vec<Network>> {
    if network.version() != excluded.version() {
        return Err(IpError::VersionMismatch(
            network.version(),
            excluded.version(),
        ));
    }
    if !network.contains(excluded) {
        return Err(IpError::NotContained {
            network: network.to_string(),
            exclude: excluded.to_string(),
        });
    }

    let max_prefix = network.version().max_prefix_length();
    let excluded_prefix = excluded.prefix_length();
    let mut networks = Vec::new();

    let mut new_prefix = network.prefix_length() + 1;
    if new_prefix > max_prefix {
        return Ok(networks);
    }

    // halves are always taken from the aligned network address
    let mut lower = Network::from_prefix_unchecked(network.network(), new_prefix);
    let mut upper = Network::from_prefix_unchecked(lower.last().next(1)?, new_prefix);

    while new_prefix <= excluded_prefix {
        let (matched, unmatched) = if lower.contains(excluded) {
            (lower, upper)
        } else {
            (upper, lower)
        };
        log::trace!("exclude {excluded} from {network}: keep {unmatched}, split {matched}");
        networks.push(unmatched);

        new_prefix += 1;
        if new_prefix > max_prefix {
            break;
        }
        lower = Network::from_prefix_unchecked(matched.network(), new_prefix);
        upper = Network::from_prefix_unchecked(lower.last().next(1)?, new_prefix);
    }

    networks.sort();
    log::debug!(
        "exclude {excluded} from {network} => {} block(s)",
        networks.len()
    );
    Ok(networks)
}
