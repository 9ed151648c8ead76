use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::model::task::Task;

pub const DELETE_CONFIRMATION: &str = "Task deleted";
pub const NOT_FOUND_MESSAGE: &str = "Task not found";

/// Wire shape of a task: `{ id, text, completed, createdAt, updatedAt, version }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,

    // Store metadata. Optional on input so clients tolerate stores that omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: u64,
}

impl TaskDto {
    pub fn from_entity(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            completed: task.completed,
            created_at: task.created_at,
            updated_at: Some(task.updated_at),
            version: task.version,
        }
    }
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        TaskDto::from_entity(task)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub text: String,
}

/// `{ "message": ... }` body used for confirmations and errors alike.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case() {
        let task = Task::new("Buy milk".to_string());
        let value = serde_json::to_value(TaskDto::from_entity(task.clone())).unwrap();

        assert_eq!(value["id"], json!(task.id.to_string()));
        assert_eq!(value["text"], json!("Buy milk"));
        assert_eq!(value["completed"], json!(false));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["version"], json!(0));
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_deserializes_without_store_metadata() {
        let id = Uuid::new_v4();
        let raw = json!({
            "id": id,
            "text": "Walk dog",
            "completed": true,
            "createdAt": "2025-01-01T10:00:00Z",
        });
        let dto: TaskDto = serde_json::from_value(raw).unwrap();
        assert_eq!(dto.id, id);
        assert!(dto.completed);
        assert_eq!(dto.updated_at, None);
        assert_eq!(dto.version, 0);
    }
}
