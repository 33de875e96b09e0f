//! Terminal boot order panel

use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::debug;

use deck_efiboot::backend::BootBackend;
use deck_efiboot::panel::{MutationOutcome, Notification, Panel, PanelView};

/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(5);

/// User intent decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    SelectPrev,
    SelectNext,
    MoveUp,
    MoveDown,
    SetNext,
    Refresh,
}

impl Action {
    fn from_key(key: KeyEvent) -> Option<Action> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Up if shift => Some(Action::MoveUp),
            KeyCode::Down if shift => Some(Action::MoveDown),
            KeyCode::Char('K') => Some(Action::MoveUp),
            KeyCode::Char('J') => Some(Action::MoveDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
            KeyCode::Enter | KeyCode::Char('n') => Some(Action::SetNext),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        }
    }
}

/// Panel plus the bits of UI state that are not boot data
pub struct App<B> {
    panel: Panel<B>,
    list: ListState,
    toast: Option<(Notification, Instant)>,
    busy: bool,
    running: bool,
}

impl<B: BootBackend> App<B> {
    pub fn new(panel: Panel<B>) -> Self {
        Self {
            panel,
            list: ListState::default(),
            toast: None,
            busy: false,
            running: true,
        }
    }

    fn selected(&self) -> usize {
        self.list.selected().unwrap_or(0)
    }

    fn clamp_selection(&mut self) {
        let len = self.panel.working_order().len();
        if len == 0 {
            self.list.select(None);
        } else {
            self.list.select(Some(self.selected().min(len - 1)));
        }
    }

    fn poll_toast(&mut self) {
        if let Some((_, shown)) = &self.toast {
            if shown.elapsed() >= TOAST_TTL {
                self.toast = None;
            }
        }
        if self.toast.is_none() {
            if let Some(note) = self.panel.pop_notification() {
                self.toast = Some((note, Instant::now()));
            }
        }
    }

    async fn handle(&mut self, action: Action, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        debug!(?action, "key action");
        let index = self.selected();

        match action {
            Action::Quit => self.running = false,
            Action::SelectPrev => self.list.select(Some(index.saturating_sub(1))),
            Action::SelectNext => self.list.select(Some(index + 1)),
            Action::Refresh => {
                self.panel.mark_loading();
                terminal.draw(|f| draw(f, self))?;
                self.panel.refresh().await;
            }
            Action::MoveUp | Action::MoveDown | Action::SetNext => {
                self.busy = true;
                terminal.draw(|f| draw(f, self))?;
                self.apply(action, index).await;
                self.busy = false;
            }
        }

        self.clamp_selection();
        Ok(())
    }

    async fn apply(&mut self, action: Action, index: usize) {
        match action {
            Action::MoveUp => {
                if self.panel.move_up(index).await != MutationOutcome::Skipped {
                    self.list.select(Some(index - 1));
                }
            }
            Action::MoveDown => {
                if self.panel.move_down(index).await != MutationOutcome::Skipped {
                    self.list.select(Some(index + 1));
                }
            }
            Action::SetNext => {
                let Some(number) = self.panel.working_order().get(index).map(|e| e.number.clone())
                else {
                    return;
                };
                self.panel.set_next(&number).await;
            }
            _ => {}
        }
    }
}

/// Run the interactive panel until the user quits
pub async fn run<B: BootBackend>(panel: Panel<B>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, App::new(panel)).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn event_loop<B: BootBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<B>,
) -> Result<()> {
    // initial load, shown as Loading first
    app.panel.mark_loading();
    terminal.draw(|f| draw(f, &mut app))?;
    app.panel.refresh().await;
    app.clamp_selection();

    while app.running {
        app.poll_toast();
        terminal.draw(|f| draw(f, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = Action::from_key(key) {
                        app.handle(action, terminal).await?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn draw<B: BootBackend>(frame: &mut Frame, app: &mut App<B>) {
    let messages = app.panel.messages();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Content
            Constraint::Length(3), // Toast
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    let header = Paragraph::new(format!("  {}", messages.app_name))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.panel.view() {
        PanelView::Error(error) => {
            let text = vec![
                Line::from(error.title).style(Style::default().fg(Color::Red).bold()),
                Line::from(""),
                Line::from(error.message),
                Line::from(""),
                Line::from(format!("[r] {}", error.retry_label)).style(Style::default().fg(Color::Yellow)),
            ];
            let body = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(body, chunks[1]);
        }
        PanelView::Boot {
            status,
            list_title,
            entries,
            ..
        } => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(3)])
                .split(chunks[1]);

            let refresh = if app.busy {
                messages.loading
            } else {
                status.refresh_label.as_str()
            };
            let status_text = vec![
                Line::from(vec![
                    Span::styled(format!("{}: ", messages.current_boot), Style::default().bold()),
                    Span::raw(status.current),
                ]),
                Line::from(vec![
                    Span::styled(format!("{}: ", messages.next_boot), Style::default().bold()),
                    Span::raw(status.next),
                ]),
                Line::from(format!("[r] {refresh}")).style(Style::default().fg(Color::DarkGray)),
            ];
            let status_block = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));
            frame.render_widget(status_block, content[0]);

            if !entries.is_empty() {
                let items: Vec<ListItem> = entries
                    .iter()
                    .map(|row| {
                        let style = if row.active {
                            Style::default().fg(Color::Yellow)
                        } else {
                            Style::default()
                        };
                        let arrows = format!(
                            "{}{}",
                            if row.can_move_up { "↑" } else { " " },
                            if row.can_move_down { "↓" } else { " " },
                        );
                        ListItem::new(Line::from(vec![
                            Span::styled(arrows, Style::default().fg(Color::DarkGray)),
                            Span::raw(" "),
                            Span::styled(row.label.clone(), style),
                            Span::styled(format!("  Boot{}", row.number), Style::default().fg(Color::DarkGray)),
                        ]))
                    })
                    .collect();

                let list = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(format!(" {list_title} ")),
                    )
                    .highlight_style(Style::default().bg(Color::DarkGray).bold())
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list, content[1], &mut app.list);
            }
        }
    }

    if let Some((note, _)) = &app.toast {
        let toast = Paragraph::new(note.body.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(format!(" {} ", note.title)));
        frame.render_widget(toast, chunks[2]);
    }

    let footer = Paragraph::new(format!(
        "  [↑/↓] Select  [Shift+↑/↓] Move  [n] {}  [r] {}  [q] Quit",
        messages.next_boot_button, messages.refresh
    ))
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key(key(KeyCode::Up, KeyModifiers::NONE)), Some(Action::SelectPrev));
        assert_eq!(Action::from_key(key(KeyCode::Up, KeyModifiers::SHIFT)), Some(Action::MoveUp));
        assert_eq!(Action::from_key(key(KeyCode::Char('J'), KeyModifiers::SHIFT)), Some(Action::MoveDown));
        assert_eq!(Action::from_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::SelectNext));
        assert_eq!(Action::from_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::SetNext));
        assert_eq!(Action::from_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }
}
