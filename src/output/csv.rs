//! CSV output formatting for network lists.

use super::terminal::format_field;
use super::NetworkRow;
use itertools::Itertools;

const HEADER: [(&str, usize); 5] = [
    ("cidr", 22),
    ("first", 18),
    ("last", 18),
    ("prefix", 8),
    ("size", 12),
];

/// Render network rows as quoted CSV with a header line.
pub fn networks_csv(rows: &[NetworkRow]) -> String {
    let header = HEADER
        .iter()
        .map(|(name, width)| format_field(name, *width))
        .join(",");
    let lines = rows.iter().map(csv_row);
    std::iter::once(header).chain(lines).join("\n")
}

/// Render `key,value` pairs as two-column CSV.
pub fn pairs_csv(pairs: &[(&str, String)]) -> String {
    std::iter::once(format!("{},{}", format_field("key", 18), format_field("value", 20)))
        .chain(
            pairs
                .iter()
                .map(|(key, value)| format!("{},{}", format_field(key, 18), format_field(value, 20))),
        )
        .join("\n")
}

fn csv_row(row: &NetworkRow) -> String {
    format!(
        "{cidr},{first},{last},{prefix},{size}",
        cidr = format_field(escape(&row.cidr), HEADER[0].1),
        first = format_field(escape(&row.first), HEADER[1].1),
        last = format_field(escape(&row.last), HEADER[2].1),
        prefix = format_field(row.prefix_length, HEADER[3].1),
        size = format_field(escape(&row.size), HEADER[4].1),
    )
}

/// Double any embedded quotes so the field survives quoting.
fn escape(input: &str) -> String {
    input.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    #[test]
    fn test_networks_csv() {
        let rows: Vec<NetworkRow> = ["192.168.1.208/28", "192.168.1.224/27"]
            .iter()
            .map(|s| NetworkRow::from(&Network::parse(s).unwrap()))
            .collect();
        let csv = networks_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(',').count(), 5);
        assert!(lines[0].trim_start().starts_with("\"cidr\""));
        assert_eq!(
            lines[1],
            r#"    "192.168.1.208/28",   "192.168.1.208",   "192.168.1.223",    "28",        "16""#
        );
        assert!(lines[2].contains("\"192.168.1.255\""));
    }

    #[test]
    fn test_pairs_csv() {
        let csv = pairs_csv(&[("prefix", "24".to_string())]);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with("\"24\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b"), "a\"\"b");
    }
}
