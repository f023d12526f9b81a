//! Parsers for the network manager's tabular text output.
//!
//! The CLI prints one header line followed by data rows, columns
//! aligned with runs of two or more spaces. Single spaces occur
//! *inside* fields (network names like "Cafe Corner"), so splitting on
//! every space would shred them. Parsing is deliberately soft: a
//! malformed row is dropped, not an error, and fully malformed output
//! yields an empty vec.

use crate::model::{ConnectionRecord, WifiNetwork};

/// Split a row on runs of two or more whitespace characters, keeping
/// single interior spaces as part of a field.
fn split_columns(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0usize;

    for ch in line.trim().chars() {
        if ch.is_whitespace() {
            whitespace_run += 1;
            continue;
        }
        if whitespace_run >= 2 && !current.is_empty() {
            fields.push(std::mem::take(&mut current));
        } else if whitespace_run == 1 && !current.is_empty() {
            current.push(' ');
        }
        whitespace_run = 0;
        current.push(ch);
    }
    if !current.is_empty() {
        fields.push(current);
    }
    fields
}

/// Non-blank lines of `raw`, or empty when there is no header plus at
/// least one data row.
fn data_lines(raw: &str) -> Vec<&str> {
    let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }
    lines[1..].to_vec()
}

/// Parse `connection show` output into connection records.
///
/// Rows with fewer than 4 columns are dropped. The fifth (STATE) column
/// is optional and defaults to empty. No case or whitespace
/// normalization happens here; callers normalize when comparing.
pub fn parse_connections(raw: &str) -> Vec<ConnectionRecord> {
    data_lines(raw)
        .into_iter()
        .filter_map(|line| {
            let mut fields = split_columns(line);
            if fields.len() < 4 {
                return None;
            }
            let state = if fields.len() > 4 {
                fields.remove(4)
            } else {
                String::new()
            };
            let mut it = fields.into_iter();
            Some(ConnectionRecord {
                name: it.next()?,
                uuid: it.next()?,
                connection_type: it.next()?,
                device: it.next()?,
                state,
            })
        })
        .collect()
}

/// Parse `device wifi list` output into scan rows.
///
/// The IN-USE column renders as `*` on the active row and collapses to
/// nothing elsewhere, so it is detected rather than counted. Rows
/// without at least BSSID, SSID, and MODE columns are dropped.
pub fn parse_wifi_list(raw: &str) -> Vec<WifiNetwork> {
    data_lines(raw)
        .into_iter()
        .filter_map(|line| {
            let mut fields = split_columns(line);
            let in_use = fields.first().is_some_and(|f| f == "*");
            if in_use {
                fields.remove(0);
            }
            if fields.len() < 3 {
                return None;
            }
            Some(WifiNetwork {
                in_use,
                bssid: fields[0].clone(),
                ssid: fields[1].clone(),
                signal: fields.get(5).cloned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONNECTIONS: &str = "\
NAME                UUID                                  TYPE      DEVICE   STATE
Home                3f2a9b1c-7c44-4e1a-9d2f-8b61c0a1d9e0  wifi      wlan0    activated
Cafe Corner         9d8e7f6a-5b4c-3d2e-1f0a-b9c8d7e6f5a4  wifi      --
lo                  11111111-2222-3333-4444-555555555555  loopback  lo       activated
";

    #[test]
    fn parses_rows_and_keeps_interior_spaces() {
        let records = parse_connections(CONNECTIONS);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, "Home");
        assert_eq!(records[0].uuid, "3f2a9b1c-7c44-4e1a-9d2f-8b61c0a1d9e0");
        assert_eq!(records[0].connection_type, "wifi");
        assert_eq!(records[0].device, "wlan0");
        assert_eq!(records[0].state, "activated");
        assert!(records[0].is_activated());

        // Single space inside the name survives; missing STATE defaults
        // to empty.
        assert_eq!(records[1].name, "Cafe Corner");
        assert_eq!(records[1].state, "");
        assert!(!records[1].is_activated());
    }

    #[test]
    fn empty_and_header_only_input_yield_nothing() {
        assert!(parse_connections("").is_empty());
        assert!(parse_connections("NAME  UUID  TYPE  DEVICE  STATE").is_empty());
        assert!(parse_connections("\n\n  \n").is_empty());
    }

    #[test]
    fn malformed_rows_are_dropped_not_fatal() {
        let raw = "NAME UUID TYPE DEVICE STATE\nHome  abc-1  wifi  wlan0  activated\nBadRow\n";
        let records = parse_connections(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Home");
        assert_eq!(records[0].uuid, "abc-1");
    }

    #[test]
    fn every_record_has_nonempty_identifiers() {
        let records = parse_connections(CONNECTIONS);
        assert!(records.len() <= CONNECTIONS.lines().count() - 1);
        for record in &records {
            assert!(!record.name.is_empty());
            assert!(!record.uuid.is_empty());
        }
    }

    #[test]
    fn blank_lines_do_not_count_as_rows() {
        let raw = "NAME  UUID  TYPE  DEVICE\n\nHome  abc-1  wifi  wlan0\n\n";
        let records = parse_connections(raw);
        assert_eq!(records.len(), 1);
    }

    const WIFI_SCAN: &str = "\
IN-USE  BSSID              SSID          MODE   CHAN  RATE        SIGNAL  BARS  SECURITY
*       AA:BB:CC:DD:EE:FF  Home          Infra  6     270 Mbit/s  89      ____  WPA2
        11:22:33:44:55:66  Cafe Corner   Infra  11    130 Mbit/s  54      __    WPA2
        77:88:99:AA:BB:CC  --            Infra  1     270 Mbit/s  30      _     WPA1 WPA2
";

    #[test]
    fn wifi_scan_marks_the_in_use_row() {
        let networks = parse_wifi_list(WIFI_SCAN);
        assert_eq!(networks.len(), 3);

        assert!(networks[0].in_use);
        assert_eq!(networks[0].ssid, "Home");
        assert_eq!(networks[0].signal.as_deref(), Some("89"));

        assert!(!networks[1].in_use);
        assert_eq!(networks[1].ssid, "Cafe Corner");
        assert_eq!(networks[1].bssid, "11:22:33:44:55:66");
    }

    #[test]
    fn wifi_scan_tolerates_garbage() {
        assert!(parse_wifi_list("").is_empty());
        let raw = "IN-USE  BSSID  SSID  MODE\nnoise\n";
        assert!(parse_wifi_list(raw).is_empty());
    }
}
