//! The task list view
//!
//! A [`TaskListView`] keeps a local copy of the tasks of a remote [`TaskApi`], and keeps it in sync after each action
//! of the user (creating, completing, deleting a task).
//!
//! It is headless: a front-end displays [`TaskListView::render`], forwards user actions to the view, and redraws
//! when the [feedback channel](TaskListView::subscribe) tells it something has changed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::task::{NewTask, TaskId};
use crate::traits::{AlertSink, Navigator, TaskApi};

pub mod collaborators;
pub mod feedback;
pub mod render;
mod state;
pub use state::{LoadState, ViewState};

use feedback::{FeedbackReceiver, FeedbackSender, ViewEvent};
use render::RenderedView;


/// The messages displayed to the user when an action fails
#[derive(Clone, Debug, PartialEq)]
pub enum Alert {
    FetchFailed(String),
    CreationFailed,
    DeletionFailed,
    CompletionFailed,
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Alert::FetchFailed(err) => write!(f, "Failed to fetch tasks: {}", err),
            Alert::CreationFailed => write!(f, "Task creation failed"),
            Alert::DeletionFailed => write!(f, "Task deletion failed"),
            Alert::CompletionFailed => write!(f, "Task complete failed"),
        }
    }
}

/// The path of the screen that edits a task
pub fn edit_path(id: &TaskId) -> String {
    format!("/tasks/{}/edit", id)
}


/// A list of tasks, with create, complete, edit and delete actions.
///
/// Every action issues at most one request, and updates the local copy only once the server has accepted it.
/// Actions take `&self`, so that several of them can be pending at the same time: their effects are applied in the
/// order their requests complete. Tasks are always looked up by identifier, so that this order does not matter.
pub struct TaskListView<A, N, S>
where
    A: TaskApi,
    N: Navigator,
    S: AlertSink,
{
    api: A,
    navigator: N,
    alerts: S,

    state: Mutex<ViewState>,
    feedback: FeedbackSender,
}

impl<A, N, S> TaskListView<A, N, S>
where
    A: TaskApi,
    N: Navigator,
    S: AlertSink,
{
    /// Create a view. It starts in the [`LoadState::Loading`] state, call [`Self::mount`] to actually fetch the tasks
    pub fn new(api: A, navigator: N, alerts: S) -> Self {
        let (feedback, _) = feedback::feedback_channel();
        Self {
            api, navigator, alerts,
            state: Mutex::new(ViewState::new()),
            feedback,
        }
    }

    pub fn api(&self) -> &A { &self.api }
    pub fn navigator(&self) -> &N { &self.navigator }
    pub fn alerts(&self) -> &S { &self.alerts }

    /// Get notified whenever the view should be redrawn
    pub fn subscribe(&self) -> FeedbackReceiver {
        self.feedback.subscribe()
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> ViewState {
        self.state().clone()
    }

    /// What should currently be displayed
    pub fn render(&self) -> RenderedView {
        RenderedView::from(&*self.state())
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn notify(&self, event: ViewEvent) {
        log::trace!("View event: {}", event);
        self.feedback.send_replace(event);
    }

    fn notify_changed(&self) {
        let task_count = self.state().tasks().len();
        self.notify(ViewEvent::Changed{ task_count });
    }

    fn raise(&self, alert: Alert) {
        self.alerts.alert(&alert.to_string());
    }


    /// Fetch the tasks of the current user.
    ///
    /// On success, the view is [`LoadState::Ready`]. Otherwise, an alert is raised and the view is [`LoadState::Failed`].
    pub async fn mount(&self) -> Result<(), Box<dyn Error>> {
        log::debug!("Fetching tasks");
        let fetched = self.api.get_tasks().await;

        match fetched {
            Ok(tasks) => {
                let task_count = {
                    let mut state = self.state();
                    state.finish_loading(tasks);
                    state.tasks().len()
                };
                log::info!("{} tasks loaded", task_count);
                self.notify(ViewEvent::Ready{ task_count });
                Ok(())
            },
            Err(err) => {
                let message = err.to_string();
                self.state().fail_loading(message.clone());
                self.raise(Alert::FetchFailed(message.clone()));
                self.notify(ViewEvent::Failed{ message });
                Err(err)
            },
        }
    }

    /// Fetch the tasks again, after the initial fetch has failed
    pub async fn retry(&self) -> Result<(), Box<dyn Error>> {
        {
            let mut state = self.state();
            let refusal = match state.load_state() {
                LoadState::Failed(_) => None,
                LoadState::Loading => Some("Tasks are already being loaded"),
                LoadState::Ready(_) => Some("Tasks are already loaded"),
            };
            if let Some(reason) = refusal {
                return Err(reason.into());
            }
            state.start_loading();
        }
        self.notify(ViewEvent::Loading);
        self.mount().await
    }

    /// Store what the user has typed in the creation input
    pub fn update_new_task_name<T: ToString>(&self, text: T) {
        self.state().set_new_task_name(text.to_string());
        self.notify_changed();
    }

    /// Create a task named after the creation input, due in a week.
    ///
    /// Returns the identifier the server has assigned to the new task.
    pub async fn create_task(&self) -> Result<TaskId, Box<dyn Error>> {
        let new_task = NewTask {
            name: self.state().new_task_name().to_string(),
            due_date: crate::utils::due_date_from_today(),
        };
        self.send_new_task(new_task).await
    }

    /// Same as [`Self::create_task`], but pretends today is `creation_date`
    pub async fn create_task_as_of(&self, creation_date: NaiveDate) -> Result<TaskId, Box<dyn Error>> {
        let new_task = NewTask {
            name: self.state().new_task_name().to_string(),
            due_date: crate::utils::due_date_from(creation_date),
        };
        self.send_new_task(new_task).await
    }

    async fn send_new_task(&self, new_task: NewTask) -> Result<TaskId, Box<dyn Error>> {
        log::debug!("Creating task {:?} (due {})", new_task.name, new_task.due_date);
        let created = self.api.create_task(new_task).await;

        match created {
            Ok(task) => {
                let id = task.id().clone();
                {
                    let mut state = self.state();
                    state.insert_created(task);
                    state.set_new_task_name(String::new());
                }
                self.notify_changed();
                Ok(id)
            },
            Err(err) => {
                // The typed name is kept, so that the user can try again
                self.raise(Alert::CreationFailed);
                Err(err)
            },
        }
    }

    /// Delete a task from the server, then from the list
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        log::debug!("Deleting task {}", id);
        let deleted = self.api.delete_task(id).await;

        match deleted {
            Ok(()) => {
                if self.state().remove(id) == false {
                    log::debug!("Task {} was deleted, but it was not displayed", id);
                }
                self.notify_changed();
                Ok(())
            },
            Err(err) => {
                self.raise(Alert::DeletionFailed);
                Err(err)
            },
        }
    }

    /// Mark a task as done (or as not done, if it was already done)
    pub async fn toggle_task_done(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let update = self.state().task(id).map(|task| task.update_with_done(!task.done()));
        let update = match update {
            Some(u) => u,
            None => {
                self.raise(Alert::CompletionFailed);
                return Err(format!("Task {} is not in the list", id).into());
            },
        };

        let done = update.done;
        log::debug!("Setting task {} to done={}", id, done);
        let patched = self.api.patch_task(id, update).await;

        match patched {
            Ok(()) => {
                if self.state().set_done(id, done) == false {
                    log::debug!("Task {} was updated, but it is no longer displayed", id);
                }
                self.notify_changed();
                Ok(())
            },
            Err(err) => {
                self.raise(Alert::CompletionFailed);
                Err(err)
            },
        }
    }

    /// Open the screen that edits a task
    pub fn navigate_to_edit(&self, id: &TaskId) {
        self.navigator.push(&edit_path(id));
    }
}
