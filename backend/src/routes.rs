use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::Utc;
use shared::{
    Category, CategoryCollection, CategoryPatch, Collection, NewCategory, NewTask,
    PersistenceError, Record, Task, TaskCollection, TaskPatch,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::error::ApiError;

pub type SharedTasks = Arc<dyn TaskCollection + Send + Sync>;
pub type SharedCategories = Arc<dyn CategoryCollection + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub tasks: SharedTasks,
    pub categories: SharedCategories,
}

/// The REST API alone, without static assets.
pub fn api(state: AppState) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/:id", put(update_task).delete(delete_task))
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            put(update_category).delete(delete_category),
        )
        .with_state(state)
}

pub fn app(state: AppState, static_dir: &FsPath) -> Router {
    api(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.tasks.get_all().await?))
}

async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.tasks.create(payload).await?;
    tracing::info!(task_id = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let payload = payload
        .pair_completion(Utc::now())
        .map_err(|err| PersistenceError::Invalid {
            kind: Task::KIND,
            message: err.to_string(),
        })?;
    let task = state.tasks.update(id, payload).await?;
    tracing::info!(task_id = %id, "Task updated");
    Ok(Json(task))
}

async fn delete_task(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(id).await?;
    tracing::info!(task_id = %id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.get_all().await?))
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.categories.create(payload).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.update(id, payload).await?))
}

async fn delete_category(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.categories.delete(id).await?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
