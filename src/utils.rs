//! Some utility functions

use chrono::{Duration, Local, NaiveDate};

use crate::task::DUE_DATE_FORMAT;
use crate::config::DUE_DATE_OFFSET_DAYS;

/// The due date of a task created on `creation_date`
pub fn due_date_from(creation_date: NaiveDate) -> NaiveDate {
    creation_date + Duration::days(DUE_DATE_OFFSET_DAYS)
}

/// The due date of a task created on `creation_date`, formatted as `YYYY-MM-DD`
pub fn calculate_due_date(creation_date: NaiveDate) -> String {
    due_date_from(creation_date).format(DUE_DATE_FORMAT).to_string()
}

/// The due date of a task that would be created today (in the local time zone)
pub fn due_date_from_today() -> NaiveDate {
    due_date_from(Local::now().date_naive())
}
