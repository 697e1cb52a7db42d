//! An in-process task API server, used to test the HTTP client
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

/// A request the fixture server has received
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FixtureData {
    pub tasks: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
    /// Answer every request with a 500
    pub failing: bool,
    /// Wrap answers into `{"items": ...}` and `{"item": ...}`, like some deployments do
    pub wrapped: bool,
    next_id: u32,
}

#[derive(Clone, Default)]
pub struct Fixture {
    data: Arc<Mutex<FixtureData>>,
}

impl Fixture {
    pub fn with_tasks(tasks: Vec<Value>) -> Self {
        let fixture = Self::default();
        fixture.data().tasks = tasks;
        fixture
    }

    pub fn data(&self) -> std::sync::MutexGuard<'_, FixtureData> {
        self.data.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data().requests.clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.data().failing = failing;
    }

    /// Starts serving on a random local port. Returns the base URL of the API
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route("/dev/tasks", get(list).post(create))
            .route("/dev/tasks/{id}", patch(update).delete(remove))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/dev", addr)
    }

    /// Records the request, and tells whether it should be accepted
    fn check(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) -> Result<(), StatusCode> {
        let authorization = headers.get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(|h| h.to_string());
        let mut data = self.data();
        data.requests.push(RecordedRequest { method, path, authorization: authorization.clone(), body });

        if data.failing {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        let expected = format!("Bearer {}", TOKEN);
        if authorization.as_deref() != Some(expected.as_str()) {
            return Err(StatusCode::UNAUTHORIZED);
        }
        Ok(())
    }
}

async fn list(State(fixture): State<Fixture>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    fixture.check("GET", "/dev/tasks".to_string(), &headers, None)?;
    let data = fixture.data();
    let tasks = Value::Array(data.tasks.clone());
    if data.wrapped {
        Ok(Json(json!({ "items": tasks })))
    } else {
        Ok(Json(tasks))
    }
}

async fn create(State(fixture): State<Fixture>, headers: HeaderMap, Json(body): Json<Value>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    fixture.check("POST", "/dev/tasks".to_string(), &headers, Some(body.clone()))?;
    let mut data = fixture.data();
    data.next_id += 1;
    let task = json!({
        "todoId": format!("srv-{}", data.next_id),
        "userId": "user-1",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "name": body["name"],
        "dueDate": body["dueDate"],
        "done": false,
    });
    data.tasks.push(task.clone());
    if data.wrapped {
        Ok((StatusCode::CREATED, Json(json!({ "item": task }))))
    } else {
        Ok((StatusCode::CREATED, Json(task)))
    }
}

fn find_task(data: &mut FixtureData, id: &str) -> Option<usize> {
    data.tasks.iter().position(|t| t["id"] == id || t["todoId"] == id)
}

async fn update(State(fixture): State<Fixture>, Path(id): Path<String>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    if let Err(status) = fixture.check("PATCH", format!("/dev/tasks/{}", id), &headers, Some(body.clone())) {
        return status;
    }
    let mut data = fixture.data();
    match find_task(&mut data, &id) {
        None => StatusCode::NOT_FOUND,
        Some(pos) => {
            let task = &mut data.tasks[pos];
            task["name"] = body["name"].clone();
            task["dueDate"] = body["dueDate"].clone();
            task["done"] = body["done"].clone();
            StatusCode::NO_CONTENT
        },
    }
}

async fn remove(State(fixture): State<Fixture>, Path(id): Path<String>, headers: HeaderMap) -> StatusCode {
    if let Err(status) = fixture.check("DELETE", format!("/dev/tasks/{}", id), &headers, None) {
        return status;
    }
    let mut data = fixture.data();
    match find_task(&mut data, &id) {
        None => StatusCode::NOT_FOUND,
        Some(pos) => {
            data.tasks.remove(pos);
            StatusCode::NO_CONTENT
        },
    }
}
