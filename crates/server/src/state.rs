use std::sync::Arc;

use todo_service::TodoStore;

/// Shared handler state. Cloning is cheap; every clone points at the one
/// store built by `startup`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}
