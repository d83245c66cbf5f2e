//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use todomaster_core::Clock;

use crate::app::{App, Mode, PanelFocus};
use crate::storage::TaskPersistence;

/// Render the status bar at the bottom of the screen.
pub fn render<P: TaskPersistence, C: Clock>(frame: &mut Frame, area: Rect, app: &App<P, C>) {
    let help_text = match (&app.mode, app.focus) {
        (Mode::Editing(_), _) => "Enter: save | Esc: cancel",
        (Mode::ConfirmDelete(_), _) => "y: delete | n/Esc: keep",
        (Mode::Normal, PanelFocus::Sidebar) => {
            "Tab: tasks | ↑↓/jk: category | a: add | t: theme | q: quit"
        }
        (Mode::Normal, PanelFocus::Tasks) => {
            "Tab: categories | a: add | e: edit | Space: done | d: delete | s: save | t: theme | q: quit"
        }
    };

    let palette = app.theme.palette();
    let (total, done) = app.session.totals();
    let mut spans = vec![
        Span::styled(concat!("TodoMaster v", env!("CARGO_PKG_VERSION")), palette.bold()),
        Span::raw(" | "),
        Span::raw(format!("{total} tasks, {done} done")),
    ];

    if app.session.is_dirty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("●", palette.normal().fg(palette.warning)));
    }

    if let Some(notice) = &app.notice {
        let style = if notice.is_warning() {
            palette.warning()
        } else {
            palette.success()
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice.to_string(), style));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(help_text, palette.dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(palette.status_bar());
    frame.render_widget(paragraph, area);
}
