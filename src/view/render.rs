//! What a task list view displays
//!
//! This describes the widgets of the view, without any styling. A front-end maps them to its own widgets; the
//! [`Display`] implementation is a plain-text rendering.

use std::fmt::{Display, Error, Formatter};

use url::Url;

use crate::task::{Task, TaskId};
use super::state::{LoadState, ViewState};

pub const HEADER: &str = "Tasks";
pub const INPUT_PLACEHOLDER: &str = "Task name";
pub const CREATE_BUTTON_LABEL: &str = "New";
pub const LOADING_LABEL: &str = "Loading Tasks";
pub const RETRY_BUTTON_LABEL: &str = "Retry";
pub const DONE_LABEL: &str = "The task was done";


/// The whole view
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedView {
    pub header: &'static str,
    pub create_input: CreateInput,
    pub body: Body,
}

/// The input used to create a task, with its button
#[derive(Clone, Debug, PartialEq)]
pub struct CreateInput {
    pub placeholder: &'static str,
    pub value: String,
    pub button_label: &'static str,
}

/// What is displayed under the creation input
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// An indeterminate progress indicator
    Loading{ label: &'static str },
    /// The fetch error, and a button to try again
    Failed{ message: String, retry_label: &'static str },
    /// One row per task
    List(Vec<TaskRow>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskRow {
    pub id: TaskId,
    pub name: String,
    pub due_date: String,
    pub complete_button: Button,
    pub edit_button: Button,
    pub delete_button: Button,
    pub attachment_url: Option<Url>,
    pub progress: ProgressBar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    Pencil,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    Blue,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Button {
    pub icon: Icon,
    pub color: Color,
    pub enabled: bool,
    pub checked: bool,
}

impl Button {
    fn action(icon: Icon, color: Color) -> Self {
        Self { icon, color, enabled: true, checked: false }
    }
}

/// The progress bar of a task only tells whether it is done. It is always full
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressBar {
    pub percent: u8,
    pub style: ProgressStyle,
    pub label: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStyle {
    Success,
    Active,
}


impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        let done = task.done();
        let progress = if done {
            ProgressBar { percent: 100, style: ProgressStyle::Success, label: Some(DONE_LABEL) }
        } else {
            ProgressBar { percent: 100, style: ProgressStyle::Active, label: None }
        };

        Self {
            id: task.id().clone(),
            name: task.name().to_string(),
            due_date: task.due_date_string(),
            complete_button: Button { icon: Icon::CheckCircle, color: Color::Green, enabled: !done, checked: done },
            edit_button: Button::action(Icon::Pencil, Color::Blue),
            delete_button: Button::action(Icon::Delete, Color::Red),
            attachment_url: task.attachment_url().cloned(),
            progress,
        }
    }
}

impl From<&ViewState> for RenderedView {
    fn from(state: &ViewState) -> Self {
        let body = match state.load_state() {
            LoadState::Loading => Body::Loading{ label: LOADING_LABEL },
            LoadState::Failed(message) => Body::Failed{ message: message.clone(), retry_label: RETRY_BUTTON_LABEL },
            LoadState::Ready(tasks) => Body::List(tasks.iter().map(TaskRow::from).collect()),
        };

        Self {
            header: HEADER,
            create_input: CreateInput {
                placeholder: INPUT_PLACEHOLDER,
                value: state.new_task_name().to_string(),
                button_label: CREATE_BUTTON_LABEL,
            },
            body,
        }
    }
}


impl Display for RenderedView {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "{}", self.header)?;
        if self.create_input.value.is_empty() {
            writeln!(f, "[+ {}] <{}>", self.create_input.button_label, self.create_input.placeholder)?;
        } else {
            writeln!(f, "[+ {}] {}", self.create_input.button_label, self.create_input.value)?;
        }
        writeln!(f, "----")?;

        match &self.body {
            Body::Loading{ label } => writeln!(f, "... {}", label),
            Body::Failed{ message, retry_label } => writeln!(f, "!! {} [{}]", message, retry_label),
            Body::List(rows) => {
                for row in rows {
                    write!(f, "{}", row)?;
                }
                Ok(())
            },
        }
    }
}

impl Display for TaskRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let check = if self.complete_button.checked { "[✓]" } else { "[ ]" };
        writeln!(f, "{} {}\t{}\t({})", check, self.name, self.due_date, self.id)?;
        if let Some(url) = &self.attachment_url {
            writeln!(f, "    attachment: {}", url)?;
        }
        match self.progress.label {
            Some(label) => writeln!(f, "    [##########] {}", label),
            None => writeln!(f, "    [~~~~~~~~~~]"),
        }
    }
}
