use ratatui::widgets::ListState;
use serde::{Deserialize, Serialize};
use tasklist_core::TaskDto;
use uuid::Uuid;

use crate::client::TaskApi;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &TaskDto) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "ALL",
            Filter::Active => "ACTIVE",
            Filter::Completed => "COMPLETED",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Active => 1,
            Filter::Completed => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Everything the view renders. Plain data so it can be inspected,
/// serialized, or restored without a terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// Server order, newest first.
    pub tasks: Vec<TaskDto>,
    pub draft_text: String,
    pub filter: Filter,
    pub theme: Theme,
    /// Last failed action or refused delete, shown until the next network
    /// action starts. Local actions (filter, theme, selection) leave it.
    pub notice: Option<String>,
}

impl ClientState {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn filtered_tasks(&self) -> Vec<&TaskDto> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Completed share of all tasks, 0.0 when there are none.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.tasks.len() as f64
        }
    }
}

pub enum InputMode {
    Normal,
    Editing,
}

/// Owns the client state and keeps it in step with the server.
///
/// Each network action first awaits its request and then reconciles local
/// state with the response. A failed request leaves the list as it was,
/// logs the error, and sets `state.notice`.
pub struct App<A: TaskApi> {
    api: A,
    pub state: ClientState,
    pub selection: ListState,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl<A: TaskApi> App<A> {
    pub fn new(api: A) -> App<A> {
        App {
            api,
            state: ClientState::default(),
            selection: ListState::default(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        }
    }

    // Network actions

    pub async fn load(&mut self) {
        self.state.notice = None;
        match self.api.list_tasks().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "loaded tasks");
                self.state.tasks = tasks;
                self.clamp_selection();
            }
            Err(error) => {
                tracing::error!(%error, "Failed to fetch tasks");
                self.state.notice = Some(format!("Could not load tasks: {}", error));
            }
        }
    }

    pub async fn add(&mut self) {
        if self.state.draft_text.trim().is_empty() {
            return;
        }
        self.state.notice = None;

        match self.api.create_task(&self.state.draft_text).await {
            Ok(task) => {
                self.state.tasks.insert(0, task);
                self.state.draft_text.clear();
                self.cursor_position = 0;
                self.clamp_selection();
            }
            Err(error) => {
                tracing::error!(%error, "Failed to add task");
                self.state.notice = Some(format!("Could not add task: {}", error));
            }
        }
    }

    pub async fn toggle(&mut self, id: Uuid) {
        self.state.notice = None;
        match self.api.toggle_task(id).await {
            Ok(updated) => {
                if let Some(task) = self.state.tasks.iter_mut().find(|t| t.id == id) {
                    *task = updated;
                }
                self.clamp_selection();
            }
            Err(error) => {
                tracing::error!(%id, %error, "Failed to toggle task");
                self.state.notice = Some(format!("Could not update task: {}", error));
            }
        }
    }

    /// Removes locally first, then restores the previous list if the
    /// server rejects the delete.
    pub async fn remove(&mut self, id: Uuid) {
        self.state.notice = None;
        let snapshot = self.state.tasks.clone();
        self.state.tasks.retain(|t| t.id != id);
        self.clamp_selection();

        if let Err(error) = self.api.delete_task(id).await {
            tracing::error!(%id, %error, "Failed to delete task");
            self.state.tasks = snapshot;
            self.clamp_selection();
            self.state.notice = Some(format!("Could not delete task: {}", error));
        }
    }

    // Selection-driven variants used by the key bindings

    pub fn selected_task(&self) -> Option<&TaskDto> {
        let index = self.selection.selected()?;
        self.state.filtered_tasks().get(index).copied()
    }

    pub async fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.toggle(id).await;
        }
    }

    /// Only completed tasks can be deleted from the list view.
    pub async fn remove_selected(&mut self) {
        let Some((id, completed)) = self.selected_task().map(|t| (t.id, t.completed)) else {
            return;
        };
        if !completed {
            self.state.notice = Some("Complete a task before deleting it".to_string());
            return;
        }
        self.remove(id).await;
    }

    // Local-only state

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.filter = filter;
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.state.filter.next());
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }

    pub fn next(&mut self) {
        let len = self.state.filtered_tasks().len();
        if len == 0 { return; }

        let i = match self.selection.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selection.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.state.filtered_tasks().len();
        if len == 0 { return; }

        let i = match self.selection.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selection.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        let len = self.state.filtered_tasks().len();
        if len == 0 {
            self.selection.select(None);
        } else {
            match self.selection.selected() {
                Some(i) if i >= len => self.selection.select(Some(len - 1)),
                Some(_) => {}
                None => self.selection.select(Some(0)),
            }
        }
    }

    // Draft editing

    pub fn enter_edit_mode(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.state.draft_text.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.state.draft_text.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.state.draft_text.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.state.draft_text.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub async fn submit_draft(&mut self) {
        self.add().await;
        if self.state.draft_text.is_empty() {
            self.exit_input_mode();
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.state
            .draft_text
            .chars()
            .take(char_index)
            .map(|c| c.len_utf8())
            .sum()
    }
}
