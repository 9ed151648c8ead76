pub mod file;
pub mod location;
pub mod memory;
pub mod traits;

pub use file::FileTaskRepository;
pub use location::StoreLocation;
pub use memory::InMemoryTaskRepository;
pub use traits::{SharedRepository, TaskRepository};
