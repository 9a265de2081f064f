use serde::{Deserialize, Serialize};

use crate::tasks::repo::Task;

/// Query string for the task listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TasksQuery {
    pub user_id: Option<i64>,
}

/// Request body for adding a task.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddTaskRequest {
    pub user_id: Option<i64>,
    pub description: Option<String>,
}

/// Response wrapping the task listing.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}
