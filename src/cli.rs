//! Command dispatch for the `ip-range-tools` binary.
//!
//! `main.rs` does as little as possible; every command is handled here so it
//! can be tested without spawning a process.

use crate::config::Config;
use crate::models::{parse_prefix_length, Address, Network, Range};
use crate::output::{render_networks, render_pairs, render_values, OutputFormat};
use crate::IpError;
use colored::Colorize;
use num_bigint::BigUint;
use std::error::Error;

pub const USAGE: &str = "\
Usage: ip-range-tools [--format text|csv|json] <command> <args>

Commands:
  info <network>                      network properties
  convert <address>                   address in every notation
  next <address> [n]                  address n steps above (default 1)
  prev <address> [n]                  address n steps below (default 1)
  exclude <network> <exclude>         blocks left after removing <exclude>
  move-to <network> <prefix>          sub-blocks of the given prefix length
  summarize <range>                   minimal CIDR blocks covering a range
  span <range>                        smallest block holding a range
  count <range>                       number of addresses in a range
  contains <range> <other>            whether <other> lies inside <range>
  list <range>                        addresses of a range";

/// Run one command line (without the program name) and return the text to print.
pub fn run(args: &[String], config: &Config) -> Result<String, Box<dyn Error>> {
    let (format, args) = split_format_flag(args, config.output_format)?;
    let Some((command, params)) = args.split_first() else {
        return Err(USAGE.into());
    };
    log::debug!(
        "run({command}, {params:?}) format={format}",
        command = command.on_blue()
    );

    match command.as_str() {
        "info" => {
            let [network] = expect_args::<1>(command, params)?;
            info(&Network::parse(network)?, format)
        }
        "convert" => {
            let [address] = expect_args::<1>(command, params)?;
            convert(&Address::parse(address)?, format)
        }
        "next" | "prev" => {
            let (address, step) = match params {
                [address] => (address, 1),
                [address, step] => (address, parse_step(step)?),
                _ => return Err(arg_count_error(command, "<address> [n]")),
            };
            let address = Address::parse(address)?;
            let result = if command == "next" {
                address.next(step)?
            } else {
                address.prev(step)?
            };
            render_values(&[result.to_string()], format)
        }
        "exclude" => {
            let [network, excluded] = expect_args::<2>(command, params)?;
            let network = Network::parse(network)?;
            let networks = network.exclude(Network::parse(excluded)?)?;
            render_networks(&networks, format)
        }
        "move-to" => {
            let [network, prefix] = expect_args::<2>(command, params)?;
            let network = Network::parse(network)?;
            let prefix_length = parse_prefix_length(prefix.trim_start_matches('/'))?;
            subnets(&network, prefix_length, config.list_limit, format)
        }
        "summarize" => {
            let [range] = expect_args::<1>(command, params)?;
            render_networks(&Range::parse(range)?.networks()?, format)
        }
        "span" => {
            let [range] = expect_args::<1>(command, params)?;
            render_networks(&[Range::parse(range)?.span_network()], format)
        }
        "count" => {
            let [range] = expect_args::<1>(command, params)?;
            render_values(&[Range::parse(range)?.count().to_string()], format)
        }
        "contains" => {
            let [range, other] = expect_args::<2>(command, params)?;
            let contained = Range::parse(range)?.contains(&Range::parse(other)?);
            render_values(&[contained.to_string()], format)
        }
        "list" => {
            let [range] = expect_args::<1>(command, params)?;
            list(&Range::parse(range)?, config.list_limit, format)
        }
        other => Err(format!("Unknown command '{other}'\n\n{USAGE}").into()),
    }
}

/// Pull `--format <f>` / `--format=<f>` out of the arguments.
fn split_format_flag(
    args: &[String],
    default: OutputFormat,
) -> Result<(OutputFormat, Vec<String>), Box<dyn Error>> {
    let mut format = default;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--format" {
            let value = iter.next().ok_or("--format needs a value")?;
            format = value.parse::<OutputFormat>()?;
        } else if let Some(value) = arg.strip_prefix("--format=") {
            format = value.parse::<OutputFormat>()?;
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((format, rest))
}

fn expect_args<'a, const N: usize>(
    command: &str,
    params: &'a [String],
) -> Result<[&'a str; N], Box<dyn Error>> {
    if params.len() != N {
        return Err(arg_count_error(command, &format!("{N} argument(s)")));
    }
    let mut out = [""; N];
    for (slot, param) in out.iter_mut().zip(params) {
        *slot = param.as_str();
    }
    Ok(out)
}

fn arg_count_error(command: &str, expected: &str) -> Box<dyn Error> {
    format!("'{command}' expects {expected}\n\n{USAGE}").into()
}

/// Step count for `next`/`prev`; negative or non-numeric is rejected.
fn parse_step(text: &str) -> Result<u128, IpError> {
    let text = text.trim();
    if text.starts_with('-') {
        return Err(IpError::InvalidArgument(format!(
            "step must not be negative => '{text}'"
        )));
    }
    text.parse::<u128>()
        .map_err(|_| IpError::InvalidArgument(format!("step is not a number => '{text}'")))
}

fn info(network: &Network, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let pairs = [
        ("address", network.address().to_string()),
        ("version", network.version().to_string()),
        ("netmask", network.mask().to_string()),
        ("wildcard", network.wildcard().to_string()),
        ("prefix", network.prefix_length().to_string()),
        ("network", network.network().to_string()),
        ("broadcast", network.broadcast().to_string()),
        ("hosts", network.hosts().to_string()),
        ("size", network.block_size().to_string()),
        ("reverse pointer", network.address().reverse_pointer()),
    ];
    render_pairs(&pairs, format)
}

fn convert(address: &Address, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let pairs = [
        ("version", address.version().to_string()),
        ("address", address.to_string()),
        ("hex", address.to_hex()),
        ("binary", address.to_bits()),
        ("integer", address.to_integer().to_string()),
        ("reverse pointer", address.reverse_pointer()),
    ];
    render_pairs(&pairs, format)
}

fn subnets(
    network: &Network,
    prefix_length: u8,
    limit: usize,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    let blocks: Vec<Network> = network.move_to(prefix_length)?.take(limit).collect();
    let host_shift = usize::from(prefix_length - network.prefix_length());
    let count = BigUint::from(1u8) << host_shift;
    let text = render_networks(&blocks, format)?;
    if count > BigUint::from(limit) {
        log::warn!("move-to {network} /{prefix_length}: showing {limit} of {count} blocks");
        if format == OutputFormat::Text {
            return Ok(format!("{text}\n... {limit} of {count} blocks"));
        }
    }
    Ok(text)
}

fn list(range: &Range, limit: usize, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let values: Vec<String> = range.iter().take(limit).map(|a| a.to_string()).collect();
    let count = range.count();
    if count > BigUint::from(limit) {
        log::warn!("list {range}: showing {limit} of {count} addresses");
        if format == OutputFormat::Text {
            let mut text = render_values(&values, format)?;
            text.push_str(&format!("\n... {limit} of {count} addresses"));
            return Ok(text);
        }
    }
    render_values(&values, format)
}
