//! Ready-made alert sinks and navigators

use std::sync::Mutex;

use crate::traits::{AlertSink, Navigator};

/// Alerts that are only written to the log
#[derive(Default, Debug)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn alert(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Alerts that are kept in memory, so that a front-end (or a test) can display them later
#[derive(Default, Debug)]
pub struct RecordingAlerts {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert raised so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, message: &str) {
        log::warn!("{}", message);
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// A history that only remembers the paths it was asked to navigate to
#[derive(Default, Debug)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        match self.history.lock() {
            Ok(history) => history.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The last pushed path, if any
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        log::debug!("Navigating to {}", path);
        match self.history.lock() {
            Ok(mut history) => history.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}
