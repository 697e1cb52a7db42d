//! Utilities to let a front-end know when a view should be redrawn

use std::fmt::{Display, Error, Formatter};

/// An event that happens to a view
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    /// The view has not fetched anything yet
    NotMounted,
    /// The task list is being fetched
    Loading,
    /// The task list has been fetched
    Ready{ task_count: usize },
    /// The task list could not be fetched
    Failed{ message: String },
    /// The displayed data has changed (a task was created, toggled, deleted, or the input was edited)
    Changed{ task_count: usize },
}

impl Display for ViewEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            ViewEvent::NotMounted => write!(f, "Not mounted"),
            ViewEvent::Loading => write!(f, "Loading tasks..."),
            ViewEvent::Ready{task_count} => write!(f, "{} tasks loaded", task_count),
            ViewEvent::Failed{message} => write!(f, "Failed to load tasks: {}", message),
            ViewEvent::Changed{task_count} => write!(f, "Changed ({} tasks)", task_count),
        }
    }
}

impl Default for ViewEvent {
    fn default() -> Self {
        Self::NotMounted
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<ViewEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<ViewEvent>;

/// Create a feedback channel, that can be used to know when the view must be redrawn
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(ViewEvent::default())
}
