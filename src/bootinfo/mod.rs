//! EFI boot configuration model
//!
//! A [`BootSnapshot`] is built from one `efibootmgr -v` report and is
//! replaced wholesale on every fetch. The [`WorkingOrder`] is the list the
//! panel shows and edits.

pub mod label;
pub mod order;
pub mod parser;

use serde::Serialize;

pub use label::normalize_label;
pub use order::{is_recognized, WorkingOrder};
pub use parser::{parse_boot_output, parse_boot_bytes, ParseError};

/// One firmware boot option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootEntry {
    /// Four digit boot number, e.g. `0003`
    pub number: String,
    /// Normalized display label
    pub label: String,
    /// Whether firmware marks the option active (`*`)
    pub active: bool,
}

impl BootEntry {
    pub fn new(number: impl Into<String>, label: impl Into<String>, active: bool) -> Self {
        Self {
            number: number.into(),
            label: label.into(),
            active,
        }
    }

    /// Boot number, doubles as the entry id
    pub fn id(&self) -> &str {
        &self.number
    }
}

/// Parsed state of the firmware boot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootSnapshot {
    pub current_boot: Option<String>,
    pub next_boot: Option<String>,
    pub boot_order: Vec<String>,
    pub entries: Vec<BootEntry>,
}

impl BootSnapshot {
    /// Look up an entry by boot number
    pub fn entry(&self, number: &str) -> Option<&BootEntry> {
        self.entries.iter().find(|e| e.number == number)
    }

    pub fn current_entry(&self) -> Option<&BootEntry> {
        self.current_boot.as_deref().and_then(|n| self.entry(n))
    }

    pub fn next_entry(&self) -> Option<&BootEntry> {
        self.next_boot.as_deref().and_then(|n| self.entry(n))
    }

    /// Derive the panel's working order from this snapshot
    pub fn working_order(&self) -> WorkingOrder {
        WorkingOrder::from_snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lookup() {
        let snapshot = BootSnapshot {
            current_boot: Some("0001".to_string()),
            next_boot: Some("0007".to_string()),
            boot_order: vec!["0001".to_string()],
            entries: vec![BootEntry::new("0001", "Windows", true)],
        };

        assert_eq!(snapshot.current_entry().map(|e| e.label.as_str()), Some("Windows"));
        assert!(snapshot.next_entry().is_none());
        assert_eq!(snapshot.entry("0001").map(BootEntry::id), Some("0001"));
    }
}
