//! Modal overlays: the add/edit form and the delete confirmation.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use todomaster_core::Task;

use super::theme::Palette;
use crate::app::{FormField, TaskForm};

/// Render the add/edit form centered in `area`.
pub fn render_form(frame: &mut Frame, area: Rect, form: &TaskForm, palette: &Palette) {
    let popup = centered(area, 60, 12);

    let mut lines = Vec::with_capacity(FormField::ALL.len() * 2 + 2);
    for field in FormField::ALL {
        let active = field == form.field;
        let label_style = if active { palette.highlighted() } else { palette.dimmed() };
        let value = match field {
            FormField::Category | FormField::Priority => format!("‹ {} ›", form.value(field)),
            FormField::Text | FormField::DueDate if active => format!("{}_", form.value(field)),
            FormField::Text | FormField::DueDate => form.value(field).to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::styled(value, palette.normal()),
        ]));
        if field == FormField::DueDate {
            lines.push(Line::from(Span::styled(
                "            YYYY-MM-DD, leave empty for none",
                palette.dimmed(),
            )));
        }
    }

    lines.push(Line::raw(""));
    match &form.error {
        Some(err) => lines.push(Line::from(Span::styled(err.as_str(), palette.warning()))),
        None => lines.push(Line::from(Span::styled(
            "Enter: save | Esc: cancel | Tab/↑↓: field | ←→: change",
            palette.dimmed(),
        ))),
    }

    let block = Block::default()
        .title(Span::styled(form.title(), palette.bold()))
        .borders(Borders::ALL)
        .border_style(palette.highlighted())
        .style(palette.surface());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Render the delete confirmation for `task` centered in `area`.
pub fn render_confirm_delete(
    frame: &mut Frame,
    area: Rect,
    task: Option<&Task>,
    palette: &Palette,
) {
    let popup = centered(area, 50, 5);
    let name = task.map_or("this task", |t| t.text.as_str());

    let lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(format!("\"{name}\""), palette.bold()),
            Span::raw("?"),
        ]),
        Line::raw(""),
        Line::from(Span::styled("y: delete | n/Esc: keep", palette.dimmed())),
    ];

    let block = Block::default()
        .title(Span::styled("Confirm Delete", palette.warning()))
        .borders(Borders::ALL)
        .border_style(palette.warning())
        .style(palette.surface());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
