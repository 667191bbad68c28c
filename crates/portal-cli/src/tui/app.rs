use portal_core::{DirectoryState, ToolForm};

// ── app state ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Screen {
    Directory,
    AddTool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Field {
    Name,
    Description,
    TargetPath,
}

impl Field {
    pub(super) fn next(self) -> Self {
        match self {
            Field::Name => Field::Description,
            Field::Description => Field::TargetPath,
            Field::TargetPath => Field::Name,
        }
    }

    pub(super) fn prev(self) -> Self {
        match self {
            Field::Name => Field::TargetPath,
            Field::Description => Field::Name,
            Field::TargetPath => Field::Description,
        }
    }
}

pub(super) struct App {
    pub(super) screen: Screen,
    pub(super) directory: DirectoryState,
    pub(super) selected: usize,
    /// A directory fetch task is in flight.
    pub(super) fetching: bool,
    pub(super) form: ToolForm,
    pub(super) focus: Field,
    pub(super) cursor: usize,
    /// Inline error shown under the form's actions.
    pub(super) form_error: String,
    /// Transient note shown on the directory screen.
    pub(super) status: String,
    pub(super) spin_i: usize,
}

impl App {
    pub(super) fn new() -> Self {
        Self {
            screen: Screen::Directory,
            directory: DirectoryState::Loading,
            selected: 0,
            fetching: false,
            form: ToolForm::new(),
            focus: Field::Name,
            cursor: 0,
            form_error: String::new(),
            status: String::new(),
            spin_i: 0,
        }
    }

    pub(super) fn busy(&self) -> bool {
        self.fetching || self.form.validation().checking || self.form.is_submitting()
    }

    pub(super) fn enter_form(&mut self) {
        self.screen = Screen::AddTool;
        self.form = ToolForm::new();
        self.focus = Field::Name;
        self.cursor = 0;
        self.form_error.clear();
        self.status.clear();
    }

    /// Field state is dropped on navigation away.
    pub(super) fn leave_form(&mut self) {
        self.screen = Screen::Directory;
        self.form = ToolForm::new();
        self.form_error.clear();
    }

    pub(super) fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn select_down(&mut self) {
        if let DirectoryState::Ready(tools) = &self.directory {
            if self.selected + 1 < tools.len() {
                self.selected += 1;
            }
        }
    }

    pub(super) fn clamp_selection(&mut self) {
        if let DirectoryState::Ready(tools) = &self.directory {
            if self.selected >= tools.len() {
                self.selected = tools.len().saturating_sub(1);
            }
        }
    }

    // ── focused-field editing ────────────────────────────────────────────────

    pub(super) fn focused_text(&self) -> &str {
        match self.focus {
            Field::Name => self.form.name(),
            Field::Description => self.form.description(),
            Field::TargetPath => self.form.target_path(),
        }
    }

    fn apply_text(&mut self, text: String) {
        match self.focus {
            Field::Name => self.form.set_name(text),
            Field::Description => self.form.set_description(text),
            Field::TargetPath => self.form.set_target_path(text),
        }
    }

    pub(super) fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.cursor = self.focused_text().len();
    }

    pub(super) fn insert_char(&mut self, c: char) {
        let mut text = self.focused_text().to_string();
        let at = self.cursor.min(text.len());
        text.insert(at, c);
        self.cursor = at + c.len_utf8();
        self.apply_text(text);
    }

    pub(super) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut text = self.focused_text().to_string();
        let i = text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        text.drain(i..self.cursor);
        self.cursor = i;
        self.apply_text(text);
    }

    pub(super) fn cursor_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let i = self.focused_text()[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.cursor = i;
    }

    pub(super) fn cursor_right(&mut self) {
        let text = self.focused_text();
        if self.cursor < text.len() {
            let n = text[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor += n;
        }
    }
}
