use std::path::Path;

use anyhow::{Context, Result};

use deck_efiboot::bootinfo::parse_boot_bytes;
use deck_efiboot::i18n::Messages;
use deck_efiboot::panel::{PanelState, PanelView};

use super::show::Report;

/// Parse a saved `efibootmgr -v` dump without touching firmware
pub fn run(path: &Path, json: bool, messages: &'static Messages) -> Result<()> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read boot report: {}", path.display()))?;
    let snapshot = parse_boot_bytes(&raw)
        .with_context(|| format!("{}: {}", messages.parse_error, path.display()))?;
    let order = snapshot.working_order();

    if json {
        let report = Report {
            snapshot: &snapshot,
            working_order: &order,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let view = PanelView::build(&PanelState::Ready, Some(&snapshot), &order, messages);
    super::print_view(&view, messages);
    super::print_all_entries(&snapshot, messages);

    Ok(())
}
