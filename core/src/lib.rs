pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use model::task::Task;
pub use repository::{
    FileTaskRepository, InMemoryTaskRepository, SharedRepository, StoreLocation, TaskRepository,
};
pub use service::dto::{CreateTaskRequest, MessageResponse, TaskDto, DELETE_CONFIRMATION, NOT_FOUND_MESSAGE};
pub use service::task_service::TaskService;
