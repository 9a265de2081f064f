use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    dto::{required, MessageResponse},
    error::ApiError,
    state::AppState,
    tasks::{
        dto::{AddTaskRequest, TaskListResponse, TasksQuery},
        repo::Task,
    },
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tasks))
        .route("/add", post(add_task))
}

#[instrument(skip(state))]
pub async fn get_tasks(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let Some(user_id) = query.user_id else {
        warn!("task listing with missing user_id");
        return Err(ApiError::MissingFields("User ID is required!"));
    };

    let tasks = Task::list_by_user(&state.db, user_id).await?;
    Ok(Json(TaskListResponse { tasks }))
}

#[instrument(skip(state, payload))]
pub async fn add_task(
    State(state): State<AppState>,
    Json(payload): Json<AddTaskRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (Some(user_id), Some(description)) = (
        payload.user_id,
        required(payload.description.as_ref()),
    ) else {
        warn!("task insert with missing fields");
        return Err(ApiError::MissingFields(
            "User ID and Description are required!",
        ));
    };

    let task = Task::create(&state.db, user_id, description).await?;

    info!(task_id = task.id, user_id, "task added");
    Ok(Json(MessageResponse {
        message: "Task added successfully!".into(),
    }))
}
