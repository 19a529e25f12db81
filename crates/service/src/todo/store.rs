use async_trait::async_trait;

use crate::errors::ServiceError;

use super::{
    id,
    model::{NewTodo, Todo, TodoPatch},
};

/// Contract shared by the in-memory and file-backed todo stores.
///
/// Reads hand out copies; the only way to change the collection is through
/// these methods. "Not found" is `None`/`false`, never an error.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Whole collection, most recently added first.
    async fn list(&self) -> Vec<Todo>;
    async fn get(&self, id: &str) -> Option<Todo>;
    /// Trims text, assigns a fresh id and prepends. Does not validate the title.
    async fn add(&self, input: NewTodo) -> Result<Todo, ServiceError>;
    /// `Ok(None)` when `id` is unknown; the collection is then untouched.
    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    /// Overwrite the whole collection.
    async fn replace_all(&self, todos: Vec<Todo>) -> Result<(), ServiceError>;

    fn generate_id(&self) -> String {
        id::generate_id()
    }

    /// Short backend name for logs and metrics.
    fn backend(&self) -> &'static str;
}
