//! To-do tasks, as exchanged with the task API

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// The format of due dates, both on the wire and on screen
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";


/// The identifier of a task.
///
/// It is opaque and is always assigned by the server. This crate never forges one (except the mocked server).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The server-assigned identifier. Older deployments of the API call it `todoId`
    #[serde(alias = "todoId")]
    id: TaskId,

    /// The display name of the task
    name: String,

    /// When this task is due. It is set once, at creation time
    #[serde(with = "due_date_format")]
    due_date: NaiveDate,

    /// Whether the task is completed
    #[serde(default)]
    done: bool,

    /// An optional image attached to the task.
    /// Empty or unparseable values are dropped rather than failing the whole task
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_url::deserialize")]
    attachment_url: Option<Url>,
}

impl Task {
    /// Create a Task instance, usually to mirror what a server has sent
    pub fn new(id: TaskId, name: String, due_date: NaiveDate, done: bool, attachment_url: Option<Url>) -> Self {
        Self { id, name, due_date, done, attachment_url }
    }

    pub fn id(&self) -> &TaskId      { &self.id         }
    pub fn name(&self) -> &str       { &self.name       }
    pub fn due_date(&self) -> NaiveDate { self.due_date }
    pub fn done(&self) -> bool       { self.done        }
    pub fn attachment_url(&self) -> Option<&Url> { self.attachment_url.as_ref() }

    /// The due date, formatted as `YYYY-MM-DD`
    pub fn due_date_string(&self) -> String {
        self.due_date.format(DUE_DATE_FORMAT).to_string()
    }

    /// Set the completion flag.
    ///
    /// This only changes the local copy; use [`TaskListView::toggle_task_done`](crate::view::TaskListView::toggle_task_done) to tell the server.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// The body that would set this task to the given completion status on the server
    pub fn update_with_done(&self, done: bool) -> TaskUpdate {
        TaskUpdate {
            name: self.name.clone(),
            due_date: self.due_date,
            done,
        }
    }
}


/// The body of a creation request (`POST /tasks`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    #[serde(with = "due_date_format")]
    pub due_date: NaiveDate,
}

/// The body of an update request (`PATCH /tasks/{id}`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub name: String,
    #[serde(with = "due_date_format")]
    pub due_date: NaiveDate,
    pub done: bool,
}


/// (De)serializes dates as `YYYY-MM-DD` strings
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DUE_DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DUE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Deserializes an optional URL, turning empty or invalid strings into `None`
mod lenient_url {
    use serde::{Deserialize, Deserializer};
    use url::Url;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = match Option::<String>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(s) => s,
        };
        if s.trim().is_empty() {
            return Ok(None);
        }

        match Url::parse(&s) {
            Ok(url) => Ok(Some(url)),
            Err(err) => {
                log::warn!("Ignoring invalid attachment URL {:?}: {}", s, err);
                Ok(None)
            },
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_server_task() {
        let json = r#"{
            "userId": "google-oauth2|123",
            "todoId": "abc-1",
            "createdAt": "2024-01-01T10:00:00.000Z",
            "name": "Water the plants",
            "dueDate": "2024-01-08",
            "done": false,
            "attachmentUrl": "https://bucket.example.com/abc-1.png"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id().as_str(), "abc-1");
        assert_eq!(task.name(), "Water the plants");
        assert_eq!(task.due_date_string(), "2024-01-08");
        assert_eq!(task.done(), false);
        assert_eq!(task.attachment_url().map(|u| u.as_str()), Some("https://bucket.example.com/abc-1.png"));
    }

    #[test]
    fn test_missing_attachment_and_done() {
        let task: Task = serde_json::from_str(r#"{"id":"1","name":"A","dueDate":"2024-01-08"}"#).unwrap();
        assert!(task.attachment_url().is_none());
        assert_eq!(task.done(), false);

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out, serde_json::json!({"id":"1","name":"A","dueDate":"2024-01-08","done":false}));
    }

    #[test]
    fn test_empty_or_relative_attachment_is_dropped() {
        let json = r#"[
            {"id":"1","name":"A","dueDate":"2024-01-08","attachmentUrl":"https://bucket.example.com/1.png"},
            {"id":"2","name":"B","dueDate":"2024-01-08","attachmentUrl":""},
            {"id":"3","name":"C","dueDate":"2024-01-08","attachmentUrl":"/uploads/3.png"},
            {"id":"4","name":"D","dueDate":"2024-01-08","attachmentUrl":null}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.len(), 4);
        assert!(tasks[0].attachment_url().is_some());
        assert!(tasks[1].attachment_url().is_none());
        assert!(tasks[2].attachment_url().is_none());
        assert!(tasks[3].attachment_url().is_none());

        let out = serde_json::to_value(&tasks[1]).unwrap();
        assert!(out.get("attachmentUrl").is_none());
    }

    #[test]
    fn test_invalid_due_date_is_rejected() {
        let res: Result<Task, _> = serde_json::from_str(r#"{"id":"1","name":"A","dueDate":"08/01/2024"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_update_body() {
        let task = Task::new("1".into(), "A".to_string(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), false, None);
        let body = serde_json::to_value(task.update_with_done(true)).unwrap();
        assert_eq!(body, serde_json::json!({"name":"A","dueDate":"2024-01-08","done":true}));
    }
}
