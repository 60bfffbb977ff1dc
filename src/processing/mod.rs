//! Address-space algorithms.
//!
//! This module contains the algorithms working on the value types:
//! - [`exclude`] - Removing a block from a larger block
//! - [`subnets`] - Tiling a block with smaller blocks
//! - [`summarize`] - Span network and range-to-CIDR summarization

mod exclude;
mod subnets;
mod summarize;

// Re-export public functions
pub use exclude::exclude;
pub use subnets::{move_to, Subnets};
pub use summarize::{span_network, summarize};
