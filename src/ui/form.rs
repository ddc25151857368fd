//! Registration form rendering

use crate::app::App;
use crate::state::{cities_for, FieldId, FormFocus, Gender};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows the form needs: one bordered field plus an error line per field,
/// a submit row, and the outer borders
pub fn height(app: &App) -> u16 {
    let fields: u16 = if app.state.requires_city() { 5 } else { 4 };
    fields * 4 + 3 + 2
}

/// Draw the whole form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Add New Record ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let has_city = app.state.requires_city();
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(1), // name + error
        Constraint::Length(3),
        Constraint::Length(1), // email + error
        Constraint::Length(3),
        Constraint::Length(1), // gender + error
        Constraint::Length(3),
        Constraint::Length(1), // country + error
    ];
    if has_city {
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3)); // submit

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let form = &app.state.form;
    let active = |field: FieldId| form.focus == FormFocus::Field(field);

    draw_text_field(
        frame,
        chunks[0],
        FieldId::Name,
        &form.input.name,
        active(FieldId::Name),
    );
    draw_error_line(frame, chunks[1], form.errors.get(FieldId::Name));

    draw_text_field(
        frame,
        chunks[2],
        FieldId::Email,
        &form.input.email,
        active(FieldId::Email),
    );
    draw_error_line(frame, chunks[3], form.errors.get(FieldId::Email));

    draw_gender_field(frame, chunks[4], form.input.gender, active(FieldId::Gender));
    draw_error_line(frame, chunks[5], form.errors.get(FieldId::Gender));

    let countries = app.state.catalog.countries();
    draw_select_field(
        frame,
        chunks[6],
        FieldId::Country,
        &form.input.country,
        active(FieldId::Country),
        !countries.is_empty(),
        "Select Country",
    );
    draw_error_line(frame, chunks[7], form.errors.get(FieldId::Country));

    let mut submit_chunk = chunks[8];
    if has_city {
        let cities = cities_for(&app.state.catalog, &form.input.country);
        let placeholder = if form.input.country.is_empty() {
            "(select a country first)"
        } else {
            "Select City"
        };
        draw_select_field(
            frame,
            chunks[8],
            FieldId::City,
            &form.input.city,
            active(FieldId::City),
            !cities.is_empty(),
            placeholder,
        );
        draw_error_line(frame, chunks[9], form.errors.get(FieldId::City));
        submit_chunk = chunks[10];
    }

    draw_submit(frame, submit_chunk, form.focus == FormFocus::Submit);
}

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_text_field(frame: &mut Frame, area: Rect, field: FieldId, value: &str, is_active: bool) {
    let style = border_style(is_active);
    let cursor = if is_active { "▌" } else { "" };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(content, area);
}

fn draw_gender_field(frame: &mut Frame, area: Rect, selected: Option<Gender>, is_active: bool) {
    let style = border_style(is_active);

    let radio = |gender: Gender| {
        let mark = if selected == Some(gender) { "(•)" } else { "( )" };
        let color = if selected == Some(gender) {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        Span::styled(format!("{mark} {}", gender.label()), Style::default().fg(color))
    };

    let content = Paragraph::new(Line::from(vec![
        radio(Gender::Male),
        Span::raw("   "),
        radio(Gender::Female),
    ]))
    .block(
        Block::default()
            .title(format!(" {} ", FieldId::Gender.label()))
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(content, area);
}

fn draw_select_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldId,
    value: &str,
    is_active: bool,
    has_options: bool,
    placeholder: &str,
) {
    let style = border_style(is_active);

    let line = if value.is_empty() {
        let hint = if has_options {
            placeholder
        } else {
            "(no options)"
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    } else if is_active {
        Line::from(vec![
            Span::styled("◂ ", Style::default().fg(Color::Cyan)),
            Span::styled(value, Style::default().fg(Color::Cyan)),
            Span::styled(" ▸", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(Span::raw(value))
    };

    let content = Paragraph::new(line).block(
        Block::default()
            .title(format!(" {} ", field.label()))
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(content, area);
}

fn draw_error_line(frame: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        let line = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(line, area);
    }
}

fn draw_submit(frame: &mut Frame, area: Rect, is_active: bool) {
    let style = if is_active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let button = Paragraph::new(Line::from(Span::styled(" Add to Table ", style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_active)),
        );

    frame.render_widget(button, area);
}
