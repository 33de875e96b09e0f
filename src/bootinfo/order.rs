//! Working boot order shown by the panel
//!
//! Only SteamOS and Windows entries are surfaced. The list follows the
//! firmware BootOrder, with recognized entries missing from it appended.

use serde::Serialize;

use super::{BootEntry, BootSnapshot};

/// Label keywords (lowercase) of the operating systems the panel manages
pub const RECOGNIZED_OS: [&str; 2] = ["steamos", "windows"];

/// Whether an entry belongs to a managed operating system
pub fn is_recognized(entry: &BootEntry) -> bool {
    let label = entry.label.to_lowercase();
    RECOGNIZED_OS.iter().any(|os| label.contains(os))
}

/// Ordered, filtered list of boot entries the user can rearrange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkingOrder {
    entries: Vec<BootEntry>,
}

impl WorkingOrder {
    pub fn new(entries: Vec<BootEntry>) -> Self {
        Self { entries }
    }

    /// Filter and order a snapshot's entries
    ///
    /// Duplicate ids in BootOrder produce duplicate rows; the firmware
    /// data is taken as given.
    pub fn from_snapshot(snapshot: &BootSnapshot) -> Self {
        let recognized: Vec<&BootEntry> =
            snapshot.entries.iter().filter(|e| is_recognized(e)).collect();

        let ordered = snapshot
            .boot_order
            .iter()
            .filter_map(|num| recognized.iter().find(|e| &e.number == num));

        let remaining = recognized
            .iter()
            .filter(|e| !snapshot.boot_order.contains(&e.number));

        let entries = ordered.chain(remaining).map(|e| (*e).clone()).collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[BootEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BootEntry> {
        self.entries.get(index)
    }

    /// Boot numbers in display order, as submitted to `efibootmgr -o`
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.number.clone()).collect()
    }

    /// Swap the entry at `index` with the one above it
    ///
    /// Returns false when nothing moved (first row or out of range).
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with the one below it
    ///
    /// Returns false when nothing moved (last row or out of range).
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(num: &str, label: &str) -> BootEntry {
        BootEntry::new(num, label, true)
    }

    fn snapshot(order: &[&str], entries: Vec<BootEntry>) -> BootSnapshot {
        BootSnapshot {
            current_boot: None,
            next_boot: None,
            boot_order: order.iter().map(|s| s.to_string()).collect(),
            entries,
        }
    }

    fn labels(order: &WorkingOrder) -> Vec<&str> {
        order.entries().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_recognition_is_case_insensitive_substring() {
        assert!(is_recognized(&entry("0001", "Windows")));
        assert!(is_recognized(&entry("0002", "windows10")));
        assert!(is_recognized(&entry("0003", "STEAMOS recovery")));
        assert!(!is_recognized(&entry("0004", "EFI USB Device")));
        assert!(!is_recognized(&entry("0005", "Steam Deck OS")));
    }

    #[test]
    fn test_follows_boot_order() {
        let snap = snapshot(
            &["0003", "0000", "0001"],
            vec![
                entry("0000", "EFI PXE"),
                entry("0001", "Windows"),
                entry("0003", "SteamOS"),
            ],
        );
        let order = snap.working_order();
        assert_eq!(labels(&order), vec!["SteamOS", "Windows"]);
        assert_eq!(order.ids(), vec!["0003", "0001"]);
    }

    #[test]
    fn test_unlisted_recognized_entries_appended() {
        let snap = snapshot(
            &["0001", "0009"],
            vec![
                entry("0004", "SteamOS"),
                entry("0001", "Windows"),
                entry("0005", "windows recovery"),
            ],
        );
        assert_eq!(
            labels(&snap.working_order()),
            vec!["Windows", "SteamOS", "windows recovery"]
        );
    }

    #[test]
    fn test_duplicate_order_ids_are_kept() {
        let snap = snapshot(
            &["0001", "0001", "0002"],
            vec![entry("0001", "Windows"), entry("0002", "SteamOS")],
        );
        let order = snap.working_order();
        assert_eq!(order.ids(), vec!["0001", "0001", "0002"]);
        // bounded by recognized entries plus duplicated ids
        assert!(order.len() <= 2 + 1);
    }

    #[test]
    fn test_never_contains_unrecognized() {
        let snap = snapshot(
            &["0000", "0001", "0002"],
            vec![entry("0000", "UEFI Shell"), entry("0001", "Linux"), entry("0002", "Windows")],
        );
        let order = snap.working_order();
        assert!(order.entries().iter().all(is_recognized));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(BootSnapshot::default().working_order().is_empty());
    }

    #[test]
    fn test_move_boundaries_are_noops() {
        let mut order = WorkingOrder::new(vec![entry("0001", "A"), entry("0002", "B")]);
        let before = order.clone();

        assert!(!order.move_up(0));
        assert!(!order.move_down(1));
        assert!(!order.move_up(5));
        assert!(!order.move_down(5));
        assert_eq!(order, before);

        let mut empty = WorkingOrder::default();
        assert!(!empty.move_down(0));
        assert!(!empty.move_up(0));
    }

    #[test]
    fn test_move_round_trip() {
        let mut order = WorkingOrder::new(vec![entry("A", "A"), entry("B", "B"), entry("C", "C")]);
        let before = order.clone();

        assert!(order.move_down(0));
        assert_eq!(labels(&order), vec!["B", "A", "C"]);
        assert!(order.move_up(1));
        assert_eq!(order, before);
    }
}
