//! Todo entity and the two interchangeable stores that own it.

pub mod coerce;
pub mod file;
pub mod id;
pub mod memory;
pub mod model;
pub mod seed;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use model::{NewTodo, Todo, TodoPatch};
pub use store::TodoStore;
