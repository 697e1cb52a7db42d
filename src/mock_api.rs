//! An in-memory task API, that mocks a REST server in tests
#![cfg(any(test, feature = "mock_api"))]

use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::traits::TaskApi;

/// A request the mocked server has received
#[derive(Clone, Debug, PartialEq)]
pub enum MockRequest {
    GetTasks,
    CreateTask(NewTask),
    PatchTask(TaskId, TaskUpdate),
    DeleteTask(TaskId),
}

#[derive(Default)]
struct MockData {
    tasks: Vec<Task>,
    requests: Vec<MockRequest>,
    held: HashMap<TaskId, Arc<Notify>>,
}

/// A task API that stores its tasks in memory.
///
/// It assigns random identifiers to created tasks, just like a real server would.
/// Its failures can be scripted with a [`MockBehaviour`].
#[derive(Default)]
pub struct MockTaskApi {
    data: Mutex<MockData>,
    behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mocked server that already knows some tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let api = Self::default();
        api.data().tasks = tasks;
        api
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Let every request succeed, without consuming the scripted behaviour, until [`Self::resume_behaviour`] is called
    pub fn suspend_behaviour(&self) {
        lock(&self.behaviour).suspend();
    }
    pub fn resume_behaviour(&self) {
        lock(&self.behaviour).resume();
    }

    /// The tasks the server currently stores
    pub fn tasks(&self) -> Vec<Task> {
        self.data().tasks.clone()
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.data().requests.clone()
    }

    /// Make the next `PATCH` or `DELETE` of this task wait until the returned `Notify` is notified.
    ///
    /// This is used to resolve requests in another order than the one they were issued in.
    pub fn hold(&self, id: &TaskId) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.data().held.insert(id.clone(), notify.clone());
        notify
    }

    fn data(&self) -> MutexGuard<'_, MockData> {
        lock(&self.data)
    }

    async fn wait_if_held(&self, id: &TaskId) {
        let held = self.data().held.remove(id);
        if let Some(notify) = held {
            log::debug!("Mocked server: holding a request for {}", id);
            notify.notified().await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.data().requests.push(MockRequest::GetTasks);
        lock(&self.behaviour).can_get_tasks()?;
        Ok(self.tasks())
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task, Box<dyn Error>> {
        self.data().requests.push(MockRequest::CreateTask(new_task.clone()));
        lock(&self.behaviour).can_create_task()?;

        let id = TaskId::from(uuid::Uuid::new_v4().to_hyphenated().to_string());
        let task = Task::new(id, new_task.name, new_task.due_date, false, None);
        self.data().tasks.push(task.clone());
        Ok(task)
    }

    async fn patch_task(&self, id: &TaskId, update: TaskUpdate) -> Result<(), Box<dyn Error>> {
        self.data().requests.push(MockRequest::PatchTask(id.clone(), update.clone()));
        self.wait_if_held(id).await;
        lock(&self.behaviour).can_patch_task()?;

        let mut data = self.data();
        match data.tasks.iter_mut().find(|t| t.id() == id) {
            None => Err(format!("No task {} on the mocked server", id).into()),
            Some(task) => {
                *task = Task::new(id.clone(), update.name, update.due_date, update.done, task.attachment_url().cloned());
                Ok(())
            },
        }
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.data().requests.push(MockRequest::DeleteTask(id.clone()));
        self.wait_if_held(id).await;
        lock(&self.behaviour).can_delete_task()?;

        let mut data = self.data();
        let before = data.tasks.len();
        data.tasks.retain(|t| t.id() != id);
        if data.tasks.len() == before {
            return Err(format!("No task {} on the mocked server", id).into());
        }
        Ok(())
    }
}
