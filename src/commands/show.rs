use anyhow::Result;
use serde::Serialize;

use deck_efiboot::backend::BootBackend;
use deck_efiboot::bootinfo::{BootSnapshot, WorkingOrder};
use deck_efiboot::panel::Panel;

/// JSON shape of `show --json` and `parse --json`
#[derive(Serialize)]
pub struct Report<'a> {
    pub snapshot: &'a BootSnapshot,
    pub working_order: &'a WorkingOrder,
}

pub async fn run<B: BootBackend>(mut panel: Panel<B>, json: bool, all: bool) -> Result<()> {
    super::load(&mut panel).await?;

    let Some(snapshot) = panel.snapshot() else {
        return Ok(());
    };

    if json {
        let report = Report {
            snapshot,
            working_order: panel.working_order(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    super::print_view(&panel.view(), panel.messages());
    if all {
        super::print_all_entries(snapshot, panel.messages());
    }

    Ok(())
}
