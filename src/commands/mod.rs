pub mod next;
pub mod order;
pub mod parse;
pub mod show;

use anyhow::{bail, Result};
use colored::Colorize;

use deck_efiboot::backend::BootBackend;
use deck_efiboot::bootinfo::{is_recognized, BootSnapshot};
use deck_efiboot::i18n::Messages;
use deck_efiboot::panel::{Panel, PanelState, PanelView};

/// Load the panel once, turning a failed load into a command error
pub async fn load<B: BootBackend>(panel: &mut Panel<B>) -> Result<()> {
    panel.refresh().await;
    if let PanelState::Failed(err) = panel.state() {
        bail!("{}: {}", panel.messages().error, err);
    }
    Ok(())
}

/// Print the status lines and the working order
pub fn print_view(view: &PanelView, messages: &Messages) {
    match view {
        PanelView::Error(error) => {
            println!("{}: {}", error.title.bright_red(), error.message);
        }
        PanelView::Boot {
            title,
            status,
            list_title,
            entries,
        } => {
            println!("{} {}", "::".bright_blue(), title.bright_white());
            println!();
            println!("{}: {}", messages.current_boot.bright_white(), status.current);
            println!("{}: {}", messages.next_boot.bright_white(), status.next);

            if !entries.is_empty() {
                println!();
                println!("{}", list_title.bright_white());
                for (index, row) in entries.iter().enumerate() {
                    let marker = if row.active { "*" } else { " " };
                    println!(
                        "  {} {}{} {}",
                        format!("[{index}]").bright_blue(),
                        row.label.bright_white(),
                        marker.yellow(),
                        format!("(Boot{})", row.number).dimmed()
                    );
                }
            }
        }
    }
}

/// Print every parsed entry, marking the ones the panel manages
pub fn print_all_entries(snapshot: &BootSnapshot, messages: &Messages) {
    println!();
    println!("{}", messages.boot_order_title.bright_white());
    println!("  BootOrder: {}", snapshot.boot_order.join(","));
    for entry in &snapshot.entries {
        let marker = if entry.active { "*" } else { " " };
        let line = format!("  Boot{}{} {}", entry.number, marker, entry.label);
        if is_recognized(entry) {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line.dimmed());
        }
    }
}
