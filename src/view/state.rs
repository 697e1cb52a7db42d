//! The data a task list view owns

use std::collections::HashSet;

use crate::task::{Task, TaskId};

/// Where the view stands regarding the initial fetch
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// The task list is being fetched
    Loading,
    /// The task list has been fetched. Tasks are in the server order
    Ready(Vec<Task>),
    /// The task list could not be fetched. See [`TaskListView::retry`](super::TaskListView::retry)
    Failed(String),
}

/// The whole state of a view
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    load_state: LoadState,
    new_task_name: String,
    /// Tasks the server has created while the list was not available.
    /// They are merged into the list as soon as it is fetched
    created_while_loading: Vec<Task>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            load_state: LoadState::Loading,
            new_task_name: String::new(),
            created_while_loading: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_state(&self) -> &LoadState { &self.load_state }
    pub fn new_task_name(&self) -> &str     { &self.new_task_name }

    /// Whether the loading indicator should be displayed
    pub fn loading_tasks(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// The displayed tasks. This is empty unless the list has been fetched
    pub fn tasks(&self) -> &[Task] {
        match &self.load_state {
            LoadState::Ready(tasks) => tasks.as_slice(),
            _ => &[],
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().iter().find(|t| t.id() == id)
    }

    pub(crate) fn set_new_task_name(&mut self, name: String) {
        self.new_task_name = name;
    }

    pub(crate) fn start_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub(crate) fn fail_loading(&mut self, message: String) {
        self.load_state = LoadState::Failed(message);
    }

    /// Replace the task list with a freshly fetched one
    pub(crate) fn finish_loading(&mut self, fetched: Vec<Task>) {
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(fetched.len() + self.created_while_loading.len());
        for task in fetched.into_iter().chain(self.created_while_loading.drain(..)) {
            if seen.insert(task.id().clone()) {
                tasks.push(task);
            } else {
                log::debug!("Ignoring a duplicate of task {}", task.id());
            }
        }
        self.load_state = LoadState::Ready(tasks);
    }

    /// Insert a task the server has just created
    pub(crate) fn insert_created(&mut self, task: Task) {
        let tasks = match &mut self.load_state {
            LoadState::Ready(tasks) => tasks,
            _ => &mut self.created_while_loading,
        };

        match tasks.iter_mut().find(|t| t.id() == task.id()) {
            Some(existing) => {
                log::warn!("The server returned an already known task ID ({}). Replacing the existing task", task.id());
                *existing = task;
            },
            None => tasks.push(task),
        }
    }

    /// Remove a task. Returns whether it was known
    pub(crate) fn remove(&mut self, id: &TaskId) -> bool {
        self.created_while_loading.retain(|t| t.id() != id);
        match &mut self.load_state {
            LoadState::Ready(tasks) => {
                let before = tasks.len();
                tasks.retain(|t| t.id() != id);
                tasks.len() != before
            },
            _ => false,
        }
    }

    /// Set the completion flag of a task. Returns whether it was known
    pub(crate) fn set_done(&mut self, id: &TaskId, done: bool) -> bool {
        match &mut self.load_state {
            LoadState::Ready(tasks) => match tasks.iter_mut().find(|t| t.id() == id) {
                Some(task) => {
                    task.set_done(done);
                    true
                },
                None => false,
            },
            _ => false,
        }
    }
}
