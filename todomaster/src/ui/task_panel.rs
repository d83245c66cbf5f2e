//! Task panel rendering.
//!
//! Each visible task is a two-line card: checkbox and description on the
//! first line, priority, category and due date on the second.

use std::fmt::Write as _;

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use todomaster_core::{Clock, DueStatus, Task};

use super::theme::Palette;
use crate::app::{App, PanelFocus};
use crate::storage::TaskPersistence;

/// Render the filtered, sorted task list.
pub fn render<P: TaskPersistence, C: Clock>(frame: &mut Frame, area: Rect, app: &App<P, C>) {
    let is_focused = app.focus == PanelFocus::Tasks;
    let filter = app.session.filter();
    let palette = app.theme.palette();

    let block = Block::default()
        .title(Span::styled(
            format!("{filter} Tasks"),
            palette.panel_title(),
        ))
        .borders(Borders::ALL)
        .border_style(palette.border(is_focused))
        .style(palette.base());

    let tasks = app.session.visible();
    if tasks.is_empty() {
        let text = vec![
            Line::from(Span::styled("No tasks here!", palette.bold())),
            Line::from(Span::styled(
                format!("Press a to add a task to {filter}."),
                palette.dimmed(),
            )),
        ];
        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let today = app.session.today();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| card(task, today, &app.date_format, palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            palette.selected()
        } else {
            palette.highlighted()
        });

    let mut state = ListState::default().with_selected(Some(app.selected_task));
    frame.render_stateful_widget(list, area, &mut state);
}

fn card<'a>(
    task: &'a Task,
    today: NaiveDate,
    date_format: &str,
    palette: &Palette,
) -> ListItem<'a> {
    let (checkbox, text_style) = if task.completed {
        ("[✓]", palette.completed())
    } else {
        ("[ ]", palette.normal())
    };

    let title = Line::from(vec![
        Span::styled(checkbox, text_style),
        Span::raw(" "),
        Span::styled(task.text.as_str(), text_style),
    ]);

    let mut details = vec![
        Span::raw("    "),
        Span::styled(
            format!("● {}", task.priority),
            palette.normal().fg(palette.priority_color(task.priority)),
        ),
        Span::styled(format!("  {}", task.category), palette.dimmed()),
    ];

    if let Some(due) = task.due_date {
        details.push(Span::styled(
            format!("  Due: {}", format_due(due, date_format)),
            palette.dimmed(),
        ));
        if !task.completed {
            let status = DueStatus::from_dates(due, today);
            details.push(Span::styled(format!(" ({status})"), palette.due(status)));
        }
    }

    ListItem::new(vec![title, Line::from(details)])
}

/// Renders `due` with `date_format`, falling back to `YYYY-MM-DD` when the
/// format asks for fields a date does not have.
fn format_due(due: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", due.format(date_format)).is_err() {
        return due.to_string();
    }
    out
}
