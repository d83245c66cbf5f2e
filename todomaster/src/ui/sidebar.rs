//! Sidebar rendering for the category list.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use todomaster_core::Clock;

use crate::app::{App, PanelFocus};
use crate::storage::TaskPersistence;

/// Render the sidebar with one entry per category filter.
pub fn render<P: TaskPersistence, C: Clock>(frame: &mut Frame, area: Rect, app: &App<P, C>) {
    let is_focused = app.focus == PanelFocus::Sidebar;
    let palette = app.theme.palette();

    let items: Vec<ListItem> = app
        .session
        .counts()
        .into_iter()
        .enumerate()
        .map(|(idx, (filter, open))| {
            let is_selected = idx == app.selected_filter;

            let mut spans = vec![Span::raw(filter.to_string())];
            if open > 0 {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("({open})"), palette.count_badge()));
            }

            let style = if is_selected && is_focused {
                palette.selected()
            } else if is_selected {
                palette.highlighted()
            } else {
                palette.normal()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled("Categories", palette.panel_title()))
        .title_bottom(Span::styled(app.theme.label(), palette.dimmed()))
        .borders(Borders::ALL)
        .border_style(palette.border(is_focused))
        .style(palette.surface());

    frame.render_widget(List::new(items).block(block), area);
}
