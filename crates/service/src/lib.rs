//! Service layer owning the todo collection.
//! - `todo` holds the entity, input coercion and both store implementations.
//! - `storage` holds the reusable JSON file helper behind the file-backed store.
//! - Stores never fail on "not found"; only disk writes can return an error.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod todo;

pub use errors::ServiceError;
pub use todo::{FileStore, MemoryStore, NewTodo, Todo, TodoPatch, TodoStore};
