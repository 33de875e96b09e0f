//! `efibootmgr -v` output parser
//!
//! Parsing is a small line classifier: every line is offered to each rule
//! in [`LineRules`], and every rule that matches writes its field. Missing
//! lines leave the field empty; only undecodable input fails.
//!
//! ```text
//! BootCurrent: 0001
//! Timeout: 0 seconds
//! BootOrder: 0001,0003,0000
//! Boot0000* EFI USB Device	PciRoot(0x0)/Pci(0x8,0x1)/USB(...)
//! Boot0001* Windows Boot Manager	HD(1,GPT,...)/File(\EFI\Microsoft\Boot\bootmgfw.efi)
//! Boot0003  SteamOS	HD(2,GPT,...)/File(\EFI\steamos\steamcl.efi)
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

use super::label::normalize_label;
use super::{BootEntry, BootSnapshot};

/// Errors that prevent producing a snapshot
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("boot report is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

type Apply = fn(&Captures<'_>, &mut BootSnapshot);

/// One classifier rule: a pattern plus the field it sets
struct LineRule {
    name: &'static str,
    pattern: Regex,
    apply: Apply,
}

impl LineRule {
    fn new(name: &'static str, pattern: &str, apply: Apply) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("line rule pattern must compile"),
            apply,
        }
    }
}

/// Ordered rule table applied to each line of the report
struct LineRules {
    rules: Vec<LineRule>,
}

// `[0-9]` rather than `\d`, which also matches non-ASCII digits
static RULES: LazyLock<LineRules> = LazyLock::new(|| LineRules {
    rules: vec![
        LineRule::new("BootCurrent", r"BootCurrent:\s*([0-9]{4})", set_current),
        LineRule::new("BootNext", r"BootNext:\s*([0-9]{4})", set_next),
        LineRule::new("BootOrder", r"BootOrder:\s*([0-9,]+)", set_order),
        LineRule::new("BootEntry", r"Boot([0-9]{4})(\*?)\s+(.+)", push_entry),
    ],
});

impl LineRules {
    fn apply(&self, line: &str, snapshot: &mut BootSnapshot) {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(line) {
                debug!(rule = rule.name, "matched line");
                (rule.apply)(&caps, snapshot);
            }
        }
    }
}

fn set_current(caps: &Captures<'_>, snapshot: &mut BootSnapshot) {
    snapshot.current_boot = Some(caps[1].to_string());
}

fn set_next(caps: &Captures<'_>, snapshot: &mut BootSnapshot) {
    snapshot.next_boot = Some(caps[1].to_string());
}

fn set_order(caps: &Captures<'_>, snapshot: &mut BootSnapshot) {
    snapshot.boot_order = caps[1].split(',').map(|s| s.trim().to_string()).collect();
}

fn push_entry(caps: &Captures<'_>, snapshot: &mut BootSnapshot) {
    let raw_label = caps[3].trim();
    snapshot.entries.push(BootEntry {
        number: caps[1].to_string(),
        label: normalize_label(raw_label),
        active: &caps[2] == "*",
    });
}

/// Parse an `efibootmgr -v` text report
///
/// Never fails: lines no rule matches are skipped.
pub fn parse_boot_output(output: &str) -> BootSnapshot {
    let mut snapshot = BootSnapshot::default();

    for line in output.split('\n') {
        RULES.apply(line, &mut snapshot);
    }

    debug!(
        entries = snapshot.entries.len(),
        order = snapshot.boot_order.len(),
        "parsed boot report"
    );

    snapshot
}

/// Parse raw command output bytes
pub fn parse_boot_bytes(output: &[u8]) -> Result<BootSnapshot, ParseError> {
    let text = std::str::from_utf8(output)?;
    Ok(parse_boot_output(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEAM_DECK_REPORT: &str = "BootCurrent: 0001\n\
Timeout: 0 seconds\n\
BootOrder: 0001,0003\n\
Boot0001* Windows Boot Manager\tHD(1,GPT,GUID)\n\
Boot0003 SteamOS\tHD(2,GPT,GUID)\n";

    #[test]
    fn test_parse_dual_boot_report() {
        let snapshot = parse_boot_output(STEAM_DECK_REPORT);

        assert_eq!(snapshot.current_boot.as_deref(), Some("0001"));
        assert_eq!(snapshot.next_boot, None);
        assert_eq!(snapshot.boot_order, vec!["0001", "0003"]);
        assert_eq!(
            snapshot.entries,
            vec![
                BootEntry::new("0001", "Windows", true),
                BootEntry::new("0003", "SteamOS", false),
            ]
        );
    }

    #[test]
    fn test_boot_next() {
        let snapshot = parse_boot_output("BootNext: 0004\nBootCurrent:0002");
        assert_eq!(snapshot.next_boot.as_deref(), Some("0004"));
        assert_eq!(snapshot.current_boot.as_deref(), Some("0002"));
    }

    #[test]
    fn test_boot_order_count_and_sequence() {
        let snapshot = parse_boot_output("BootOrder: 0002,0000,0001,0005,0003");
        assert_eq!(snapshot.boot_order, vec!["0002", "0000", "0001", "0005", "0003"]);
    }

    #[test]
    fn test_later_boot_order_line_wins() {
        let snapshot = parse_boot_output("BootOrder: 0001\nBootOrder: 0003,0001");
        assert_eq!(snapshot.boot_order, vec!["0003", "0001"]);
    }

    #[test]
    fn test_active_entry_with_device_path() {
        let snapshot = parse_boot_output("Boot0003* SomeOS\tHD(1,GPT,abc)/File(\\EFI\\x.efi)");
        assert_eq!(snapshot.entries, vec![BootEntry::new("0003", "SomeOS", true)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let snapshot = parse_boot_output("BootCurrent: 0000\r\nBoot0000* SteamOS\r\n");
        assert_eq!(snapshot.current_boot.as_deref(), Some("0000"));
        assert_eq!(snapshot.entries[0].label, "SteamOS");
    }

    #[test]
    fn test_header_lines_are_not_entries() {
        let snapshot = parse_boot_output("BootCurrent: 0001\nBootOrder: 0001\nBootNext: 0001");
        assert!(snapshot.entries.is_empty());
    }

    #[test]
    fn test_unrecognized_text_is_empty_snapshot() {
        let snapshot = parse_boot_output("EFI variables are not supported on this system.\n");
        assert_eq!(snapshot, BootSnapshot::default());

        let snapshot = parse_boot_output("");
        assert!(snapshot.entries.is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        let snapshot = parse_boot_output("BootCurrent: \u{0660}\u{0660}\u{0660}\u{0661}\nBoot\u{0660}\u{0660}\u{0660}\u{0661}* SteamOS\n");
        assert_eq!(snapshot, BootSnapshot::default());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = parse_boot_bytes(&[0x42, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
    }

    #[test]
    fn test_bytes_parse_matches_text_parse() {
        let from_bytes = parse_boot_bytes(STEAM_DECK_REPORT.as_bytes()).unwrap();
        assert_eq!(from_bytes, parse_boot_output(STEAM_DECK_REPORT));
    }
}
