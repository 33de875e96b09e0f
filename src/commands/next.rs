use anyhow::{bail, Result};
use colored::Colorize;

use deck_efiboot::backend::BootBackend;
use deck_efiboot::panel::{MutationOutcome, Panel};

/// Set BootNext to `number` and show the refreshed state
pub async fn run<B: BootBackend>(mut panel: Panel<B>, number: &str) -> Result<()> {
    super::load(&mut panel).await?;

    match panel.set_next(number).await {
        MutationOutcome::Applied | MutationOutcome::Skipped => {
            println!("{} {}", "::".bright_green(), panel.messages().success);
            super::print_view(&panel.view(), panel.messages());
        }
        MutationOutcome::Failed => {
            let body = panel
                .pop_notification()
                .map(|n| n.body)
                .unwrap_or_else(|| panel.messages().boot_next_set_failed.to_string());
            bail!("{}: {}", panel.messages().error, body);
        }
    }

    Ok(())
}
