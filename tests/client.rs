//! Tests of the REST client, against an in-process server

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use tasks_view::client::Client;
use tasks_view::resource::StaticToken;
use tasks_view::traits::TaskApi;
use tasks_view::{NewTask, TaskId};

mod fixture;
use fixture::{Fixture, TOKEN};

fn client(url: &str, token: &str) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    Client::new(url, Arc::new(StaticToken::new(token))).unwrap()
}

fn example_tasks() -> Vec<serde_json::Value> {
    vec![
        json!({"id": "1", "name": "A", "dueDate": "2024-01-08", "done": false}),
        json!({"id": "2", "name": "B", "dueDate": "2024-01-09", "done": true, "attachmentUrl": "https://img.example.com/2.png"}),
    ]
}

#[tokio::test]
async fn test_get_tasks() {
    let fixture = Fixture::with_tasks(example_tasks());
    let url = fixture.serve().await;
    let client = client(&url, TOKEN);

    let tasks = client.get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id().as_str(), "1");
    assert_eq!(tasks[1].done(), true);
    assert!(tasks[1].attachment_url().is_some());

    let requests = fixture.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_get_wrapped_tasks() {
    let fixture = Fixture::with_tasks(example_tasks());
    fixture.data().wrapped = true;
    let url = fixture.serve().await;

    let tasks = client(&url, TOKEN).get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].name(), "B");
}

#[tokio::test]
async fn test_create_task() {
    let fixture = Fixture::default();
    let url = fixture.serve().await;
    let client = client(&url, TOKEN);

    let new_task = NewTask { name: "Buy milk".to_string(), due_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap() };
    let created = client.create_task(new_task).await.unwrap();
    assert_eq!(created.id().as_str(), "srv-1");
    assert_eq!(created.name(), "Buy milk");
    assert_eq!(created.done(), false);

    assert_eq!(fixture.requests()[0].body, Some(json!({"name": "Buy milk", "dueDate": "2024-01-08"})));

    // Some deployments wrap the created item
    fixture.data().wrapped = true;
    let new_task = NewTask { name: "Walk the dog".to_string(), due_date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap() };
    let created = client.create_task(new_task).await.unwrap();
    assert_eq!(created.id().as_str(), "srv-2");
}

#[tokio::test]
async fn test_patch_and_delete() {
    let fixture = Fixture::with_tasks(example_tasks());
    let url = fixture.serve().await;
    let client = client(&url, TOKEN);

    let tasks = client.get_tasks().await.unwrap();
    client.patch_task(tasks[0].id(), tasks[0].update_with_done(true)).await.unwrap();
    let requests = fixture.requests();
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].path, "/dev/tasks/1");
    assert_eq!(requests[1].body, Some(json!({"name": "A", "dueDate": "2024-01-08", "done": true})));

    client.delete_task(&TaskId::from("2")).await.unwrap();
    assert_eq!(fixture.requests()[2].path, "/dev/tasks/2");

    let tasks = client.get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].done(), true);

    // Unknown tasks are reported as errors
    assert!(client.delete_task(&TaskId::from("2")).await.is_err());
    assert!(client.patch_task(&TaskId::from("2"), tasks[0].update_with_done(false)).await.is_err());
}

#[tokio::test]
async fn test_errors() {
    let fixture = Fixture::with_tasks(example_tasks());
    let url = fixture.serve().await;

    let err = client(&url, "wrong-token").get_tasks().await.unwrap_err();
    assert!(err.to_string().contains("401"));

    fixture.set_failing(true);
    assert!(client(&url, TOKEN).get_tasks().await.is_err());

    // Nothing listens there
    assert!(client("http://127.0.0.1:1/dev", TOKEN).get_tasks().await.is_err());
}
