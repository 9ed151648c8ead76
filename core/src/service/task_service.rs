use crate::error::{ServiceError, ServiceResult};
use crate::model::task::{sort_newest_first, Task};
use crate::repository::TaskRepository;
use crate::service::dto::{TaskDto, DELETE_CONFIRMATION};
use uuid::Uuid;

/// The four task operations. Stateless apart from the store it wraps.
///
/// Text policy: `create_task` stores the text exactly as given, empty and
/// whitespace-only strings included. This is the only place the policy is
/// decided; clients may be stricter for their own input but the service
/// never rejects or rewrites text.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_task(&self, text: String) -> ServiceResult<TaskDto> {
        let created = self.repo.create(Task::new(text))?;
        tracing::debug!(id = %created.id, "task created");
        Ok(TaskDto::from_entity(created))
    }

    pub fn list_tasks(&self) -> ServiceResult<Vec<TaskDto>> {
        let mut tasks = self.repo.list()?;
        sort_newest_first(&mut tasks);
        Ok(tasks.into_iter().map(TaskDto::from_entity).collect())
    }

    pub fn toggle_task(&self, id: &Uuid) -> ServiceResult<TaskDto> {
        let toggled = self.repo.toggle(id)?.ok_or(ServiceError::NotFound(*id))?;
        tracing::debug!(id = %toggled.id, completed = toggled.completed, "task toggled");
        Ok(TaskDto::from_entity(toggled))
    }

    /// Always answers with the fixed confirmation; deleting an unknown id is
    /// not an error.
    pub fn delete_task(&self, id: &Uuid) -> ServiceResult<&'static str> {
        let removed = self.repo.delete(id)?;
        tracing::debug!(%id, removed, "task delete requested");
        Ok(DELETE_CONFIRMATION)
    }
}
