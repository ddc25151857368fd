//! Saved records table

use crate::app::App;
use crate::state::MAX_TABLE_ROWS;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Draw the records table, or a placeholder when nothing has been saved
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.state.records.len();

    let title = if total > MAX_TABLE_ROWS {
        format!(" Saved Records ({total}, showing first {MAX_TABLE_ROWS}) ")
    } else {
        format!(" Saved Records ({total}) ")
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if total == 0 {
        let placeholder = Paragraph::new("No records found. Please add some data.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let records = app.state.visible_records();
    let show_city =
        app.state.requires_city() || records.iter().any(|r| !r.input.city.is_empty());

    let mut header_cells = vec!["#", "Name", "Email", "Gender", "Country"];
    if show_city {
        header_cells.push("City");
    }
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = records.iter().enumerate().map(|(idx, record)| {
        let gender = record
            .input
            .gender
            .map(|g| g.label())
            .unwrap_or_default();
        let mut cells = vec![
            Cell::from(format!("{}", idx + 1)),
            Cell::from(record.input.name.as_str()),
            Cell::from(record.input.email.as_str()),
            Cell::from(gender),
            Cell::from(record.input.country.as_str()),
        ];
        if show_city {
            cells.push(Cell::from(record.input.city.as_str()));
        }
        Row::new(cells)
    });

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Min(12),
    ];
    if show_city {
        widths.push(Constraint::Min(12));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);

    frame.render_widget(table, area);
}
