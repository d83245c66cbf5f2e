//! Terminal UI rendering.

pub mod dialog;
pub mod sidebar;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use todomaster_core::Clock;

use crate::app::{App, Mode};
use crate::storage::TaskPersistence;

/// Main draw function for the entire UI.
pub fn draw<P: TaskPersistence, C: Clock>(frame: &mut Frame, app: &App<P, C>) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25), // Sidebar
            Constraint::Percentage(75), // Tasks
        ])
        .split(content_area);

    sidebar::render(frame, content_chunks[0], app);
    task_panel::render(frame, content_chunks[1], app);
    status_bar::render(frame, status_area, app);

    let palette = app.theme.palette();
    match &app.mode {
        Mode::Normal => {}
        Mode::Editing(form) => dialog::render_form(frame, content_area, form, palette),
        Mode::ConfirmDelete(id) => {
            dialog::render_confirm_delete(frame, content_area, app.session.get(*id), palette);
        }
    }
}
