//! Subnetting: tile a block with smaller blocks of one prefix length.

use crate::error::{IpError, Result};
use crate::models::{Address, Network};
use num_traits::ToPrimitive;
use std::iter::FusedIterator;

/// Lazy ascending sequence of equal-sized sub-blocks of a network.
///
/// Each block starts at the address after the previous block's last address.
#[derive(Debug, Clone)]
pub struct Subnets {
    next: Option<Network>,
    last: Address,
    prefix_length: u8,
}

/// Sub-blocks of `prefix_length` tiling `network`.
///
/// `prefix_length` must be longer than the network's own prefix and no longer
/// than the version's maximum, otherwise [`IpError::InvalidArgument`].
pub fn move_to(network: &Network, prefix_length: u8) -> Result<Subnets> {
    let max_prefix = network.version().max_prefix_length();
    if prefix_length <= network.prefix_length() || prefix_length > max_prefix {
        return Err(IpError::InvalidArgument(format!(
            "cannot move {network} to /{prefix_length}"
        )));
    }
    log::debug!("move_to({network}, /{prefix_length})");
    Ok(Subnets {
        next: Some(Network::from_prefix_unchecked(
            network.network(),
            prefix_length,
        )),
        last: network.broadcast(),
        prefix_length,
    })
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        let current = self.next.take()?;
        if current.last() < self.last {
            self.next = current
                .last()
                .next(1)
                .ok()
                .map(|address| Network::from_prefix_unchecked(address, self.prefix_length));
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(current) = self.next else {
            return (0, Some(0));
        };
        let host_len = self.last.max_prefix_length() - self.prefix_length;
        let span = self.last.to_integer() - current.first().to_integer();
        let remaining = (span >> usize::from(host_len)) + 1u8;
        match remaining.to_usize() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Subnets {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn cidrs(network: &str, prefix_length: u8) -> Vec<String> {
        Network::parse(network)
            .unwrap()
            .move_to(prefix_length)
            .unwrap()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_move_to() {
        assert_eq!(
            cidrs("192.168.0.0/22", 24),
            vec![
                "192.168.0.0/24",
                "192.168.1.0/24",
                "192.168.2.0/24",
                "192.168.3.0/24"
            ]
        );
        assert_eq!(
            cidrs("192.168.2.0/24", 25),
            vec!["192.168.2.0/25", "192.168.2.128/25"]
        );
        assert_eq!(
            cidrs("192.168.2.0/30", 32),
            vec![
                "192.168.2.0/32",
                "192.168.2.1/32",
                "192.168.2.2/32",
                "192.168.2.3/32"
            ]
        );
    }

    #[test]
    fn test_move_to_invalid() {
        let network = Network::parse("192.168.0.0/22").unwrap();
        for prefix_length in [22, 21, 0, 33] {
            assert!(matches!(
                network.move_to(prefix_length),
                Err(IpError::InvalidArgument(_))
            ));
        }
        let network = Network::parse("2001:db8::/128").unwrap();
        assert!(network.move_to(128).is_err());
    }

    #[test]
    fn test_move_to_top_of_address_space() {
        assert_eq!(
            cidrs("255.255.255.252/30", 31),
            vec!["255.255.255.252/31", "255.255.255.254/31"]
        );
        let all = Network::parse("::/0").unwrap();
        let mut halves = all.move_to(1).unwrap();
        assert_eq!(halves.size_hint(), (2, Some(2)));
        assert_eq!(halves.next().unwrap().to_string(), "::/1");
        assert_eq!(halves.next().unwrap().to_string(), "8000::/1");
        assert_eq!(halves.next(), None);
    }

    #[test]
    fn test_move_to_lazy() {
        let network = Network::parse("2001:db8::/32").unwrap();
        let mut subnets = network.move_to(128).unwrap();
        assert_eq!(subnets.size_hint(), (usize::MAX, None));
        let firsts: Vec<String> = subnets.by_ref().take(2).map(|n| n.to_string()).collect();
        assert_eq!(firsts, vec!["2001:db8::/128", "2001:db8::1/128"]);
    }

    #[test]
    fn test_move_to_tiling() {
        let network = Network::parse("10.20.0.0/20").unwrap();
        for prefix_length in 21..=28u8 {
            let blocks: Vec<Network> = network.move_to(prefix_length).unwrap().collect();
            assert_eq!(blocks.len(), 1 << (prefix_length - 20));
            assert_eq!(blocks[0].first(), network.first());
            assert_eq!(blocks[blocks.len() - 1].last(), network.last());
            for block in &blocks {
                assert_eq!(block.prefix_length(), prefix_length);
            }
            for (a, b) in blocks.iter().tuple_windows() {
                assert_eq!(a.last().next(1).unwrap(), b.first());
            }
        }
    }
}
