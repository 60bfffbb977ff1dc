//! Output formatting for address-space results.
//!
//! This module handles rendering results for the command-line tool:
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON output via serde
//! - [`terminal`] - Aligned text output

mod csv;
mod json;
mod terminal;

use crate::models::Network;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

pub use csv::{networks_csv, pairs_csv};
pub use json::{pairs_json, to_json};
pub use terminal::{format_field, key_values, text_table};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<OutputFormat, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One network as printed in a list.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkRow {
    pub cidr: String,
    pub first: String,
    pub last: String,
    pub prefix_length: u8,
    /// Block size as decimal text; IPv6 sizes exceed every machine integer.
    pub size: String,
}

impl From<&Network> for NetworkRow {
    fn from(network: &Network) -> NetworkRow {
        NetworkRow {
            cidr: network.cidr(),
            first: network.first().to_string(),
            last: network.last().to_string(),
            prefix_length: network.prefix_length(),
            size: network.block_size().to_string(),
        }
    }
}

/// Render a list of networks.
pub fn render_networks(networks: &[Network], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let rows: Vec<NetworkRow> = networks.iter().map(NetworkRow::from).collect();
    match format {
        OutputFormat::Text => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.cidr.clone(),
                        r.first.clone(),
                        r.last.clone(),
                        r.prefix_length.to_string(),
                        r.size.clone(),
                    ]
                })
                .collect();
            Ok(text_table(&["cidr", "first", "last", "prefix", "size"], &cells))
        }
        OutputFormat::Csv => Ok(networks_csv(&rows)),
        OutputFormat::Json => to_json(&rows),
    }
}

/// Render named values, e.g. the properties of one network.
pub fn render_pairs(pairs: &[(&str, String)], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(key_values(pairs)),
        OutputFormat::Csv => Ok(pairs_csv(pairs)),
        OutputFormat::Json => pairs_json(pairs),
    }
}

/// Render a plain list of values, one per line (a JSON array for JSON).
pub fn render_values(values: &[String], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(values.join("\n")),
        OutputFormat::Csv => Ok(values
            .iter()
            .map(|v| format_field(v, 0))
            .collect::<Vec<String>>()
            .join("\n")),
        OutputFormat::Json => to_json(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "text");
    }

    #[test]
    fn test_network_row() {
        let row = NetworkRow::from(&Network::parse("2001:db8::/32").unwrap());
        assert_eq!(row.cidr, "2001:db8::/32");
        assert_eq!(row.last, "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(row.size, "79228162514264337593543950336");
    }

    #[test]
    fn test_render_networks_text() {
        let networks = vec![Network::parse("10.0.0.0/31").unwrap()];
        let text = render_networks(&networks, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("cidr"));
        assert_eq!(lines[1], "10.0.0.0/31  10.0.0.0  10.0.0.1  31      2");
    }

    #[test]
    fn test_render_values() {
        let values = vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()];
        assert_eq!(
            render_values(&values, OutputFormat::Text).unwrap(),
            "10.0.0.1\n10.0.0.2"
        );
        assert_eq!(
            render_values(&values, OutputFormat::Csv).unwrap(),
            "\"10.0.0.1\"\n\"10.0.0.2\""
        );
        let json = render_values(&values, OutputFormat::Json).unwrap();
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
