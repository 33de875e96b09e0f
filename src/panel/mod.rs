//! Boot order panel state
//!
//! The panel owns the latest [`BootSnapshot`], the [`WorkingOrder`] derived
//! from it and a queue of non-blocking notifications. Every operation
//! takes `&mut self`, so a write and its follow-up refresh always complete
//! before the next user action is handled.
//!
//! ```text
//! Idle -> Loading -> Ready
//!            ^   \-> Failed
//!            |          |
//!            +----------+  (refresh / retry / after a write)
//! ```

mod view;

use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, BootBackend};
use crate::bootinfo::{parse_boot_bytes, BootSnapshot, WorkingOrder};
use crate::i18n::Messages;

pub use view::{EntryRow, ErrorView, PanelView, StatusView};

/// Errors that replace the whole panel with an error view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// Backend failed or returned nothing
    #[error("{0}")]
    Fetch(String),

    /// Backend output could not be interpreted
    #[error("{0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Ready,
    Failed(PanelError),
}

/// Toast style message that does not block the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Result of a reorder or next-boot request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Nothing to do (boundary move, bad index, panel not ready)
    Skipped,
    /// Backend accepted the write and the panel was refreshed
    Applied,
    /// Backend rejected the write; a notification was queued
    Failed,
}

pub struct Panel<B> {
    backend: B,
    messages: &'static Messages,
    state: PanelState,
    snapshot: Option<BootSnapshot>,
    order: WorkingOrder,
    notifications: VecDeque<Notification>,
}

impl<B: BootBackend> Panel<B> {
    pub fn new(backend: B, messages: &'static Messages) -> Self {
        Self {
            backend,
            messages,
            state: PanelState::Idle,
            snapshot: None,
            order: WorkingOrder::default(),
            notifications: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PanelState::Loading
    }

    pub fn snapshot(&self) -> Option<&BootSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn working_order(&self) -> &WorkingOrder {
        &self.order
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Take the oldest pending notification
    pub fn pop_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Enter `Loading` ahead of a refresh so the UI can show it
    pub fn mark_loading(&mut self) {
        self.state = PanelState::Loading;
    }

    /// Fetch, parse and re-derive the working order
    ///
    /// Failures end in [`PanelState::Failed`]; nothing is returned to the
    /// caller. The previous snapshot stays around for display until a
    /// fetch succeeds.
    pub async fn refresh(&mut self) {
        self.mark_loading();
        let result = self.backend.get_boot_info().await;
        self.state = match self.load(result) {
            Ok(()) => PanelState::Ready,
            Err(e) => {
                warn!("Boot info refresh failed: {}", e);
                PanelState::Failed(e)
            }
        };
    }

    fn load(&mut self, result: Result<Vec<u8>, BackendError>) -> Result<(), PanelError> {
        let report = result.map_err(|e| {
            PanelError::Fetch(
                e.user_message()
                    .unwrap_or_else(|| self.messages.get_boot_info_failed.to_string()),
            )
        })?;

        if report.is_empty() {
            return Err(PanelError::Fetch(
                self.messages.get_boot_info_failed.to_string(),
            ));
        }

        let snapshot = parse_boot_bytes(&report).map_err(|e| {
            debug!("Parse failure: {}", e);
            PanelError::Parse(self.messages.parse_error.to_string())
        })?;

        self.order = snapshot.working_order();
        debug!(
            visible = self.order.len(),
            total = snapshot.entries.len(),
            "derived working order"
        );
        self.snapshot = Some(snapshot);
        Ok(())
    }

    /// Move the entry at `index` one row up and persist the new order
    pub async fn move_up(&mut self, index: usize) -> MutationOutcome {
        if !self.accepts_input() || !self.order.move_up(index) {
            return MutationOutcome::Skipped;
        }
        self.save_order().await
    }

    /// Move the entry at `index` one row down and persist the new order
    pub async fn move_down(&mut self, index: usize) -> MutationOutcome {
        if !self.accepts_input() || !self.order.move_down(index) {
            return MutationOutcome::Skipped;
        }
        self.save_order().await
    }

    /// Submit the ids of the (already reordered) working order
    ///
    /// Only recognized entries are submitted, so other options drop out of
    /// the firmware BootOrder.
    async fn save_order(&mut self) -> MutationOutcome {
        let ids = self.order.ids();
        info!("Saving boot order: {}", ids.join(","));

        match self.backend.set_boot_order(&ids).await {
            Ok(()) => {
                self.refresh().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                // the optimistic order stays on screen
                self.notify_failure(&e, self.messages.boot_order_save_failed);
                MutationOutcome::Failed
            }
        }
    }

    /// Ask the firmware to boot `number` next, once
    pub async fn set_next(&mut self, number: &str) -> MutationOutcome {
        if !self.accepts_input() {
            return MutationOutcome::Skipped;
        }
        info!("Setting BootNext: {}", number);

        match self.backend.set_boot_next(number).await {
            Ok(()) => {
                self.refresh().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                self.notify_failure(&e, self.messages.boot_next_set_failed);
                MutationOutcome::Failed
            }
        }
    }

    fn accepts_input(&self) -> bool {
        self.state == PanelState::Ready
    }

    fn notify_failure(&mut self, err: &BackendError, fallback: &str) {
        warn!("Boot write failed: {}", err);
        self.notifications.push_back(Notification {
            title: self.messages.error.to_string(),
            body: err.user_message().unwrap_or_else(|| fallback.to_string()),
        });
    }

    /// Render model for the current state
    pub fn view(&self) -> PanelView {
        PanelView::build(
            &self.state,
            self.snapshot.as_ref(),
            &self.order,
            self.messages,
        )
    }
}
