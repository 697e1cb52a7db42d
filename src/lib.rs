//! This crate provides a headless task list view, backed by a REST task API.
//!
//! It provides a client for the task API in the [`client`] module, that can be used as a stand-alone module.
//!
//! The [`TaskListView`](view::TaskListView) keeps a local copy of the tasks of the current user, and keeps it in sync with the server
//! whenever a task is created, completed or deleted. \
//! It talks to its collaborators (the API, a navigation history, a way to display alerts) through the traits of the [`traits`] module,
//! and describes what should be displayed in [`view::render`].

pub mod traits;

pub mod task;
pub use task::{NewTask, Task, TaskId, TaskUpdate};
pub mod resource;
pub mod client;
pub use client::Client;
pub mod view;
pub use view::TaskListView;

pub mod config;
pub mod utils;

#[cfg(any(test, feature = "mock_api"))]
pub mod mock_behaviour;
#[cfg(any(test, feature = "mock_api"))]
pub mod mock_api;
