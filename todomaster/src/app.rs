//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todomaster_core::{Category, CategoryFilter, Clock, Priority, SystemClock, Task, TaskDraft, TaskId};

use crate::session::{Notice, Session};
use crate::storage::TaskPersistence;
use crate::store::TaskError;
use crate::ui::theme::Theme;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Category list.
    Sidebar,
    /// Task list (default).
    Tasks,
}

/// Input field of the add/edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Task description.
    Text,
    /// Category selector.
    Category,
    /// Priority selector.
    Priority,
    /// Due date text.
    DueDate,
}

impl FormField {
    /// Fields in dialog order.
    pub const ALL: [Self; 4] = [Self::Text, Self::Category, Self::Priority, Self::DueDate];

    /// Label shown next to the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Description",
            Self::Category => "Category",
            Self::Priority => "Priority",
            Self::DueDate => "Due date",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Text => Self::Category,
            Self::Category => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Text,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Text => Self::DueDate,
            Self::Category => Self::Text,
            Self::Priority => Self::Category,
            Self::DueDate => Self::Priority,
        }
    }
}

/// State of the add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Task being edited, or `None` when adding.
    pub editing: Option<TaskId>,
    /// Values entered so far.
    pub draft: TaskDraft,
    /// Field receiving input.
    pub field: FormField,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

/// What the dialog wants after a key press.
enum FormAction {
    Continue,
    Submit,
    Cancel,
}

impl TaskForm {
    /// Empty dialog for a new task in `category`, priority Medium.
    #[must_use]
    pub fn new_task(category: Category) -> Self {
        Self {
            editing: None,
            draft: TaskDraft::new("", category, Priority::default()),
            field: FormField::Text,
            error: None,
        }
    }

    /// Dialog pre-filled from an existing task.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            draft: TaskDraft::from_task(task),
            field: FormField::Text,
            error: None,
        }
    }

    /// Dialog title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Add New Task"
        }
    }

    /// Current text of `field`, for display.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Text => &self.draft.text,
            FormField::Category => self.draft.category.label(),
            FormField::Priority => self.draft.priority.label(),
            FormField::DueDate => &self.draft.due_date,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Left => self.cycle_back(),
            KeyCode::Right => self.cycle_forward(),
            KeyCode::Backspace => {
                if let Some(buf) = self.text_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(buf) = self.text_mut() {
                    buf.push(c);
                }
            }
            _ => {}
        }
        FormAction::Continue
    }

    const fn cycle_forward(&mut self) {
        match self.field {
            FormField::Category => self.draft.category = self.draft.category.next(),
            FormField::Priority => self.draft.priority = self.draft.priority.next(),
            FormField::Text | FormField::DueDate => {}
        }
    }

    const fn cycle_back(&mut self) {
        match self.field {
            FormField::Category => self.draft.category = self.draft.category.prev(),
            FormField::Priority => self.draft.priority = self.draft.priority.prev(),
            FormField::Text | FormField::DueDate => {}
        }
    }

    const fn text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Text => Some(&mut self.draft.text),
            FormField::DueDate => Some(&mut self.draft.due_date),
            FormField::Category | FormField::Priority => None,
        }
    }
}

/// Interaction mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the lists.
    #[default]
    Normal,
    /// Add/edit dialog is open.
    Editing(TaskForm),
    /// Waiting for y/n before deleting a task.
    ConfirmDelete(TaskId),
}

/// Main application state.
pub struct App<P, C = SystemClock> {
    /// Task session (store, persistence, filter).
    pub session: Session<P, C>,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Current interaction mode.
    pub mode: Mode,
    /// Index into [`CategoryFilter::SIDEBAR`].
    pub selected_filter: usize,
    /// Index into the visible task list.
    pub selected_task: usize,
    /// Notice shown in the status bar.
    pub notice: Option<Notice>,
    /// Due date display format (chrono).
    pub date_format: String,
    /// Active colour scheme.
    pub theme: Theme,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<P: TaskPersistence, C: Clock> App<P, C> {
    /// Create the application around an opened session.
    #[must_use]
    pub fn new(session: Session<P, C>, date_format: impl Into<String>) -> Self {
        let selected_filter = CategoryFilter::SIDEBAR
            .iter()
            .position(|f| *f == session.filter())
            .unwrap_or(0);

        let mut app = Self {
            session,
            focus: PanelFocus::Tasks,
            mode: Mode::Normal,
            selected_filter,
            selected_task: 0,
            notice: None,
            date_format: date_format.into(),
            theme: Theme::default(),
            should_quit: false,
        };
        app.collect_notices();
        app
    }

    /// Start with `theme` instead of the light default.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.notice.as_ref().is_some_and(|n| !n.is_warning()) {
            self.notice = None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match std::mem::take(&mut self.mode) {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Editing(form) => self.handle_form_key(form, key),
            Mode::ConfirmDelete(id) => self.handle_confirm_key(id, key),
        }

        self.clamp_selection();
        self.collect_notices();
    }

    /// Task under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Task> {
        self.session.visible().get(self.selected_task).copied()
    }

    /// Handle key event when no dialog is open.
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Enter => match self.focus {
                PanelFocus::Sidebar => self.focus = PanelFocus::Tasks,
                PanelFocus::Tasks => self.open_edit_form(),
            },
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(),
            KeyCode::Char('s') => {
                self.session.retry_save();
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                tracing::debug!(theme = %self.theme, "theme switched");
            }
            _ => {}
        }
    }

    /// Handle key event while the add/edit dialog is open.
    fn handle_form_key(&mut self, mut form: TaskForm, key: KeyEvent) {
        match form.handle_key(key) {
            FormAction::Continue => self.mode = Mode::Editing(form),
            FormAction::Cancel => {}
            FormAction::Submit => self.submit_form(form),
        }
    }

    /// Handle key event while a delete is awaiting confirmation.
    fn handle_confirm_key(&mut self, id: TaskId, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                if self.session.delete(id).is_ok() {
                    self.clamp_selection();
                }
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {}
            _ => self.mode = Mode::ConfirmDelete(id),
        }
    }

    fn submit_form(&mut self, mut form: TaskForm) {
        let result = match form.editing {
            Some(id) => self.session.edit(id, &form.draft).map(|()| id),
            None => self.session.add(&form.draft),
        };

        match result {
            Ok(id) => self.select_task(id),
            Err(err @ (TaskError::Validation(_) | TaskError::IdsExhausted(_))) => {
                form.error = Some(err.to_string());
                self.mode = Mode::Editing(form);
            }
            Err(TaskError::NotFound(_)) => {}
        }
    }

    fn open_add_form(&mut self) {
        let category = self.session.filter().preferred_category();
        self.mode = Mode::Editing(TaskForm::new_task(category));
    }

    fn open_edit_form(&mut self) {
        if let Some(form) = self.selected().map(TaskForm::edit) {
            self.mode = Mode::Editing(form);
        }
    }

    fn ask_delete(&mut self) {
        if let Some(id) = self.selected().map(|t| t.id) {
            self.mode = Mode::ConfirmDelete(id);
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected().map(|t| t.id) else {
            return;
        };
        if self.session.toggle(id).is_ok() {
            self.select_task(id);
        }
    }

    /// Cycle focus between sidebar and task list.
    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Sidebar => PanelFocus::Tasks,
            PanelFocus::Tasks => PanelFocus::Sidebar,
        };
    }

    fn move_up(&mut self) {
        match self.focus {
            PanelFocus::Sidebar => {
                if self.selected_filter > 0 {
                    self.set_filter_index(self.selected_filter - 1);
                }
            }
            PanelFocus::Tasks => self.selected_task = self.selected_task.saturating_sub(1),
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            PanelFocus::Sidebar => {
                if self.selected_filter + 1 < CategoryFilter::SIDEBAR.len() {
                    self.set_filter_index(self.selected_filter + 1);
                }
            }
            PanelFocus::Tasks => self.selected_task += 1,
        }
    }

    fn set_filter_index(&mut self, idx: usize) {
        self.selected_filter = idx;
        self.session.set_filter(CategoryFilter::SIDEBAR[idx]);
        self.selected_task = 0;
    }

    /// Move the cursor onto task `id` if it is visible.
    fn select_task(&mut self, id: TaskId) {
        if let Some(pos) = self.session.visible().iter().position(|t| t.id == id) {
            self.selected_task = pos;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.visible().len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }

    fn collect_notices(&mut self) {
        if let Some(latest) = self.session.drain_notices().pop() {
            self.notice = Some(latest);
        }
    }
}
