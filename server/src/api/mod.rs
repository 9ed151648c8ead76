//! Request handlers and shared state.

mod handlers;

pub use handlers::{create_task, delete_task, health_check, list_tasks, toggle_task};

use std::sync::Arc;

use tasklist_core::{SharedRepository, TaskService};

/// State shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService<SharedRepository>>,
}

impl AppState {
    #[must_use]
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            service: Arc::new(TaskService::new(repository)),
        }
    }
}
