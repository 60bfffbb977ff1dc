//! Range summarization into minimal CIDR blocks.

use crate::error::Result;
use crate::models::{Network, Range};

/// Smallest CIDR block containing both ends of `range`.
///
/// The prefix length is the number of leading bits `first` and `last` share.
pub fn span_network(range: &Range) -> Network {
    let (first, last) = (range.first(), range.last());
    let differing = first.value() ^ last.value();
    let differing_len = (u128::BITS - differing.leading_zeros()) as u8;
    let prefix_length = first.max_prefix_length() - differing_len;
    let span = Network::from_prefix_unchecked(first, prefix_length);
    Network::from_prefix_unchecked(span.network(), prefix_length)
}

/// Minimal ascending list of disjoint CIDR blocks exactly covering `range`.
///
/// Starts from the span network and trims the excess below `first` and above
/// `last` with [`exclude`](super::exclude).
pub fn summarize(range: &Range) -> Result<Vec<Network>> {
    let (first, last) = (range.first(), range.last());
    let span = span_network(range);
    if span.first() == first && span.last() == last {
        return Ok(vec![span]);
    }

    let mut networks = Vec::new();

    if span.first() != first {
        let below = first.prev(1)?;
        networks.extend(
            span.exclude(below)?
                .into_iter()
                .filter(|network| network.first() >= first),
        );
        log::trace!("summarize {range}: trimmed below {first} => {networks:?}");
    }

    if span.last() != last {
        let above = last.next(1)?;
        let remainder = networks.pop().unwrap_or(span);
        for network in remainder.exclude(above)? {
            networks.push(network);
            if network.last() == last {
                break;
            }
        }
        log::trace!("summarize {range}: trimmed above {last} => {networks:?}");
    }

    log::debug!("summarize {range} => {} block(s)", networks.len());
    Ok(networks)
}
