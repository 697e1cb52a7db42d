//! This module provides a client to connect to the task REST API

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::resource::Resource;
use crate::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::traits::{IdTokenSource, TaskApi};

/// The route of the task collection, relative to the API base URL
const TASKS_ROUTE: &str = "tasks";


/// `GET /tasks` may wrap its results into an `items` field, depending on the deployment
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskListBody {
    Wrapped { items: Vec<Task> },
    Bare(Vec<Task>),
}

impl From<TaskListBody> for Vec<Task> {
    fn from(body: TaskListBody) -> Self {
        match body {
            TaskListBody::Wrapped { items } => items,
            TaskListBody::Bare(items) => items,
        }
    }
}

/// `POST /tasks` may wrap the created task into an `item` field, depending on the deployment
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedTaskBody {
    Wrapped { item: Task },
    Bare(Task),
}

impl From<CreatedTaskBody> for Task {
    fn from(body: CreatedTaskBody) -> Self {
        match body {
            CreatedTaskBody::Wrapped { item } => item,
            CreatedTaskBody::Bare(item) => item,
        }
    }
}


/// A task source that fetches its data from a REST server
#[derive(Debug)]
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S, token_source: Arc<dyn IdTokenSource + Send + Sync>) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;

        Ok(Self{
            resource: Resource::new(url, token_source),
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the endpoint currently set in [`crate::config::API_ENDPOINT`]
    pub fn from_config(token_source: Arc<dyn IdTokenSource + Send + Sync>) -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::api_endpoint(), token_source)
    }

    pub fn url(&self) -> &Url {
        self.resource.url()
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, Box<dyn Error>> {
        let url = self.resource.combine(segments)?;
        log::debug!("{} {}", method, url);

        Ok(self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, crate::config::product_name())
            .bearer_auth(self.resource.id_token()))
    }
}

/// Turns a non-2xx answer into an error
fn check_status(response: Response) -> Result<Response, Box<dyn Error>> {
    if response.status().is_success() == false {
        return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), response.url()).into());
    }
    Ok(response)
}

#[async_trait]
impl TaskApi for Client {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let request = self.request(Method::GET, &[TASKS_ROUTE])?;
        let response = request
            .send()
            .await?;
        let response = check_status(response)?;
        let body: TaskListBody = response.json().await?;

        let tasks = Vec::from(body);
        log::info!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task, Box<dyn Error>> {
        let request = self.request(Method::POST, &[TASKS_ROUTE])?;
        let response = request
            .json(&new_task)
            .send()
            .await?;
        let response = check_status(response)?;
        let body: CreatedTaskBody = response.json().await?;

        let task = Task::from(body);
        log::debug!("Server created task {}", task.id());
        Ok(task)
    }

    async fn patch_task(&self, id: &TaskId, update: TaskUpdate) -> Result<(), Box<dyn Error>> {
        let request = self.request(Method::PATCH, &[TASKS_ROUTE, id.as_str()])?;
        let response = request
            .json(&update)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let request = self.request(Method::DELETE, &[TASKS_ROUTE, id.as_str()])?;
        let response = request
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}
