//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The base URL of the task API (e.g. `https://abc123.execute-api.eu-west-1.amazonaws.com/dev`).
/// Feel free to override it when initing this library.
pub static API_ENDPOINT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("http://localhost:3000/dev".to_string())));

/// The product name, sent as the `User-Agent` of every API request.
/// Feel free to override it when initing this library.
pub static PRODUCT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("TasksView".to_string())));

/// How many days after their creation new tasks are due
pub const DUE_DATE_OFFSET_DAYS: i64 = 7;


/// Returns the current value of [`API_ENDPOINT`]
pub fn api_endpoint() -> String {
    read(&API_ENDPOINT)
}

/// Returns the current value of [`PRODUCT_NAME`]
pub fn product_name() -> String {
    read(&PRODUCT_NAME)
}

/// Override [`API_ENDPOINT`]
pub fn set_api_endpoint<S: ToString>(endpoint: S) {
    write(&API_ENDPOINT, endpoint.to_string());
}

/// Override [`PRODUCT_NAME`]
pub fn set_product_name<S: ToString>(name: S) {
    write(&PRODUCT_NAME, name.to_string());
}

// A poisoned lock still holds a valid string
fn read(setting: &Mutex<String>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn write(setting: &Mutex<String>, new_value: String) {
    match setting.lock() {
        Ok(mut value) => *value = new_value,
        Err(poisoned) => *poisoned.into_inner() = new_value,
    }
}
