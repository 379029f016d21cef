pub mod tasks;
pub mod users;

use std::sync::Arc;

pub use tasks::TaskService;
pub use users::UserService;

use crate::store::Store;

/// Shared application state handed to every handler: one service per
/// resource, both talking to the same store.
pub struct AppState {
    pub users: UserService,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            users: UserService::new(store.clone()),
            tasks: TaskService::new(store),
        }
    }
}
