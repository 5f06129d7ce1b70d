//! Background screen of the demo app
//!
//! Header with queue counts, a result log of confirm answers, and a footer.
//! Dialogs are drawn last, on top of everything.

use crate::app::App;
use dialog_queue::config::colors;
use dialog_queue::ui::{self, helpers::centered_rect, helpers::truncate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Main render function
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Result log
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_results(f, chunks[1], app);
    render_footer(f, chunks[2], app);

    if app.show_help {
        render_help(f);
    }

    ui::render_root(f, &app.root, &app.config.dialogs);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let queued = app.root.dialogs().len();
    let open = app.root.open_count();
    let title = if queued == 0 {
        "dialog-queue".to_string()
    } else {
        format!("dialog-queue ({queued} queued, {open} open)")
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(colors::FG).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER))
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if app.results.is_empty() {
        vec![ListItem::new(Span::styled(
            "No answers yet. Press c to ask something.",
            Style::default().fg(colors::DIM),
        ))]
    } else {
        app.results
            .iter()
            .map(|line| {
                let color = if line.ends_with("true") {
                    colors::ACCEPT
                } else {
                    colors::DECLINE
                };
                ListItem::new(Span::styled(truncate(line, width), Style::default().fg(color)))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(" Confirm results ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::BORDER))
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status_message {
        Some((msg, _)) => msg.clone(),
        None if app.root.focused().is_some() => "dialog focused: y/n/Enter/Esc".to_string(),
        None => "c:confirm  n:notice  b:two confirms  x:clear  ?:help  q:quit".to_string(),
    };
    let footer = Paragraph::new(text).style(Style::default().fg(colors::DIM));
    f.render_widget(footer, area);
}

fn render_help(f: &mut Frame) {
    let area = centered_rect(50, 60, f.area());

    let help_text = r"
  Screen
  c           Open a confirm dialog
  n           Open a notice
  b           Open two confirm dialogs
  x           Clear result log

  Confirm dialog
  y, Enter    Confirm
  n           Cancel
  Esc         Dismiss (counts as cancel)

  Notice
  Enter, Esc  Close

  q, Esc      Quit
  Ctrl+C      Force quit
";

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(colors::FG))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::HIGHLIGHT))
                .border_type(BorderType::Double)
                .title_bottom(Line::from(" any key:close ").centered())
                .style(Style::default().bg(colors::BG)),
        );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
