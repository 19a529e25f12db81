use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{errors::ServiceError, storage::json_file::JsonFile};

use super::{
    model::{self, NewTodo, Todo, TodoPatch},
    store::TodoStore,
};

/// Durable store: the collection lives only in a JSON file.
///
/// Every call reads the whole file and every mutation rewrites it. Mutations
/// inside one process are serialized by `write_lock`; separate processes
/// sharing the file are last-writer-wins.
#[derive(Debug)]
pub struct FileStore {
    file: JsonFile<Vec<Todo>>,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating the directory and an empty `[]` file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file = JsonFile::new(path);
        file.ensure_exists().await?;
        Ok(Arc::new(Self { file, write_lock: Mutex::new(()) }))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl TodoStore for FileStore {
    async fn list(&self) -> Vec<Todo> {
        self.file.load().await
    }

    async fn get(&self, id: &str) -> Option<Todo> {
        self.file.load().await.into_iter().find(|t| t.id == id)
    }

    async fn add(&self, input: NewTodo) -> Result<Todo, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.file.load().await;
        let todo = Todo::create(self.generate_id(), input, model::now());
        todos.insert(0, todo.clone());
        self.file.save(&todos).await?;
        debug!(id = %todo.id, count = todos.len(), path = %self.path().display(), "file store: added");
        Ok(todo)
    }

    async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.file.load().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        todo.apply(patch, model::now());
        let updated = todo.clone();
        self.file.save(&todos).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut todos = self.file.load().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Ok(false);
        }
        self.file.save(&todos).await?;
        Ok(true)
    }

    async fn replace_all(&self, todos: Vec<Todo>) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.file.save(&todos).await
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
