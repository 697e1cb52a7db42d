//! The collaborators a [`TaskListView`](crate::view::TaskListView) talks to

use std::error::Error;

use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskId, TaskUpdate};

/// A remote source of tasks, usually a REST server (see [`Client`](crate::client::Client))
#[async_trait]
pub trait TaskApi {
    /// Returns every task of the current identity, in the server order
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>>;
    /// Creates a task. The returned task carries the identifier the server has assigned
    async fn create_task(&self, new_task: NewTask) -> Result<Task, Box<dyn Error>>;
    /// Updates a task on the server
    async fn patch_task(&self, id: &TaskId, update: TaskUpdate) -> Result<(), Box<dyn Error>>;
    /// Removes a task from the server
    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>>;
}

/// Something that knows the identity token of the current user
pub trait IdTokenSource {
    /// Returns the bearer token to attach to API requests
    fn id_token(&self) -> String;
}

/// A push-style history, that can navigate to another screen
pub trait Navigator {
    fn push(&self, path: &str);
}

/// A way to tell the user that something went wrong (a modal dialog, usually)
pub trait AlertSink {
    fn alert(&self, message: &str);
}
