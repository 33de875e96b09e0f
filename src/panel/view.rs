//! Render model computed from panel state
//!
//! Front-ends draw a [`PanelView`] and nothing else, so all enable/disable
//! and labelling rules live here.

use serde::Serialize;

use super::PanelState;
use crate::bootinfo::{BootSnapshot, WorkingOrder};
use crate::i18n::Messages;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub current: String,
    pub next: String,
    pub refresh_label: String,
    pub refresh_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub number: String,
    pub label: String,
    pub active: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub can_set_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    pub retry_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelView {
    Error(ErrorView),
    Boot {
        title: String,
        status: StatusView,
        list_title: String,
        entries: Vec<EntryRow>,
    },
}

impl PanelView {
    pub fn build(
        state: &PanelState,
        snapshot: Option<&BootSnapshot>,
        order: &WorkingOrder,
        messages: &Messages,
    ) -> Self {
        if let PanelState::Failed(err) = state {
            return PanelView::Error(ErrorView {
                title: messages.error.to_string(),
                message: err.to_string(),
                retry_label: messages.retry.to_string(),
            });
        }

        let loading = *state == PanelState::Loading;
        let current = entry_name(snapshot, snapshot.and_then(|s| s.current_boot.as_deref()), messages);
        let next = match snapshot.and_then(|s| s.next_boot.as_deref()) {
            Some(num) => entry_name(snapshot, Some(num), messages),
            None => messages.follow_boot_order.to_string(),
        };

        let last = order.len().saturating_sub(1);
        let entries = order
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryRow {
                number: entry.number.clone(),
                label: entry.label.clone(),
                active: entry.active,
                can_move_up: !loading && index > 0,
                can_move_down: !loading && index < last,
                can_set_next: !loading,
            })
            .collect();

        PanelView::Boot {
            title: messages.app_name.to_string(),
            status: StatusView {
                current,
                next,
                refresh_label: if loading {
                    messages.loading.to_string()
                } else {
                    messages.refresh.to_string()
                },
                refresh_enabled: !loading,
            },
            list_title: messages.boot_order_title.to_string(),
            entries,
        }
    }
}

/// Label for a boot number: the entry label, `Boot<num>` when the entry is
/// not listed, or "Unknown" without a number
fn entry_name(snapshot: Option<&BootSnapshot>, number: Option<&str>, messages: &Messages) -> String {
    let Some(number) = number else {
        return messages.unknown.to_string();
    };
    snapshot
        .and_then(|s| s.entry(number))
        .map(|e| e.label.clone())
        .unwrap_or_else(|| format!("Boot{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootinfo::BootEntry;
    use crate::i18n::Locale;
    use crate::panel::PanelError;

    fn snapshot() -> BootSnapshot {
        BootSnapshot {
            current_boot: Some("0001".to_string()),
            next_boot: Some("0009".to_string()),
            boot_order: vec!["0001".to_string(), "0003".to_string()],
            entries: vec![
                BootEntry::new("0001", "Windows", true),
                BootEntry::new("0003", "SteamOS", false),
            ],
        }
    }

    #[test]
    fn test_status_labels() {
        let snap = snapshot();
        let view = PanelView::build(
            &PanelState::Ready,
            Some(&snap),
            &snap.working_order(),
            Locale::English.messages(),
        );

        let PanelView::Boot { status, entries, .. } = view else {
            panic!("expected boot view");
        };
        assert_eq!(status.current, "Windows");
        assert_eq!(status.next, "Boot0009");
        assert_eq!(status.refresh_label, "Refresh");

        assert_eq!(entries.len(), 2);
        assert!(!entries[0].can_move_up);
        assert!(entries[0].can_move_down);
        assert!(entries[1].can_move_up);
        assert!(!entries[1].can_move_down);
    }

    #[test]
    fn test_follow_order_and_unknown() {
        let messages = Locale::English.messages();
        let view = PanelView::build(&PanelState::Ready, None, &WorkingOrder::default(), messages);

        let PanelView::Boot { status, entries, .. } = view else {
            panic!("expected boot view");
        };
        assert_eq!(status.current, "Unknown");
        assert_eq!(status.next, "Follow BootOrder");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_loading_disables_controls() {
        let snap = snapshot();
        let view = PanelView::build(
            &PanelState::Loading,
            Some(&snap),
            &snap.working_order(),
            Locale::English.messages(),
        );

        let PanelView::Boot { status, entries, .. } = view else {
            panic!("expected boot view");
        };
        assert_eq!(status.refresh_label, "Loading...");
        assert!(!status.refresh_enabled);
        assert!(entries.iter().all(|e| !e.can_move_up && !e.can_move_down && !e.can_set_next));
    }

    #[test]
    fn test_failed_state_is_error_view() {
        let state = PanelState::Failed(PanelError::Fetch("device busy".to_string()));
        let view = PanelView::build(&state, None, &WorkingOrder::default(), Locale::English.messages());

        assert_eq!(
            view,
            PanelView::Error(ErrorView {
                title: "Error".to_string(),
                message: "device busy".to_string(),
                retry_label: "Retry".to_string(),
            })
        );
    }
}
