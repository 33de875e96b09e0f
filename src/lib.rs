//! deck-efiboot library
//!
//! Boot order model, efibootmgr backend and panel state shared by the
//! TUI and the command line front-end.

pub mod backend;
pub mod bootinfo;
pub mod config;
pub mod i18n;
pub mod panel;
