//! UI module for rendering the TUI

mod form;
mod records;

use crate::app::App;
use crate::state::CatalogStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form::height(app)),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    form::draw(frame, chunks[0], app);
    records::draw(frame, chunks[1], app);
    draw_status_bar(frame, chunks[2], app);

    // Blocking notice overlays everything else
    if let Some(message) = app.state.current_error() {
        draw_notice_dialog(frame, message);
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let catalog_label = match app.state.catalog_status {
        CatalogStatus::Loading => Span::styled(
            "loading reference data…",
            Style::default().fg(Color::Yellow),
        ),
        CatalogStatus::Ready => Span::styled(
            format!("{} countries", app.state.catalog.len()),
            Style::default().fg(Color::Green),
        ),
        CatalogStatus::Failed => Span::styled(
            "reference data unavailable",
            Style::default().fg(Color::Red),
        ),
    };

    let mut spans = vec![
        Span::styled("Tab/↑↓", Style::default().fg(Color::Cyan)),
        Span::raw(": move  "),
        Span::styled("◂ ▸", Style::default().fg(Color::Cyan)),
        Span::raw(": change option  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(": submit  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": quit  |  "),
        catalog_label,
    ];

    if let Some(message) = &app.state.status_message {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}

/// Render a blocking notice centered on the screen
fn draw_notice_dialog(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let width = (message.len() as u16 + 6).clamp(30, 60).min(area.width);
    let height = 5;

    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, dialog_area);

    let content = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" or "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to dismiss"),
        ]),
    ];

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}
