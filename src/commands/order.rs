use anyhow::{bail, Result};
use colored::Colorize;

use deck_efiboot::backend::BootBackend;
use deck_efiboot::panel::{MutationOutcome, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Move one row of the working order and persist it
pub async fn run<B: BootBackend>(mut panel: Panel<B>, index: usize, direction: Direction) -> Result<()> {
    super::load(&mut panel).await?;

    let outcome = match direction {
        Direction::Up => panel.move_up(index).await,
        Direction::Down => panel.move_down(index).await,
    };

    match outcome {
        MutationOutcome::Skipped => {
            println!(
                "{} Entry {} cannot move {}",
                "::".bright_blue(),
                index,
                if direction == Direction::Up { "up" } else { "down" }
            );
        }
        MutationOutcome::Applied => {
            println!("{} {}", "::".bright_green(), panel.messages().success);
            super::print_view(&panel.view(), panel.messages());
        }
        MutationOutcome::Failed => {
            let body = panel
                .pop_notification()
                .map(|n| n.body)
                .unwrap_or_else(|| panel.messages().boot_order_save_failed.to_string());
            bail!("{}: {}", panel.messages().error, body);
        }
    }

    Ok(())
}
