use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;

use super::{
    model::{self, NewTodo, Todo, TodoPatch},
    seed::seed_todos,
    store::TodoStore,
};

/// Volatile store: the collection lives in this value for as long as the
/// process keeps it alive. Construct one at startup and share the `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new(todos: Vec<Todo>) -> Arc<Self> {
        Arc::new(Self { todos: RwLock::new(todos) })
    }

    /// Store pre-filled with the sample records.
    pub fn seeded() -> Arc<Self> {
        Self::new(seed_todos())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    async fn get(&self, id: &str) -> Option<Todo> {
        let todos = self.todos.read().await;
        todos.iter().find(|t| t.id == id).cloned()
    }

    async fn add(&self, input: NewTodo) -> Result<Todo, ServiceError> {
        let todo = Todo::create(self.generate_id(), input, model::now());
        let mut todos = self.todos.write().await;
        todos.insert(0, todo.clone());
        debug!(id = %todo.id, count = todos.len(), "memory store: added");
        Ok(todo)
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, ServiceError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        todo.apply(patch, model::now());
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() != before)
    }

    async fn replace_all(&self, todos: Vec<Todo>) -> Result<(), ServiceError> {
        *self.todos.write().await = todos;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
