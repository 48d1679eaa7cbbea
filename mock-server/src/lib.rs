use std::{str::FromStr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn new(title: &str, completed: bool) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            completed,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Shape the list endpoint wraps its page in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStyle {
    /// A bare JSON array.
    Bare,
    Todos,
    #[default]
    Tasks,
    Data,
    /// `{"results": [...], "count": n}`, which clients do not recognise.
    Unrecognized,
}

impl FromStr for EnvelopeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bare" => Ok(EnvelopeStyle::Bare),
            "todos" => Ok(EnvelopeStyle::Todos),
            "tasks" => Ok(EnvelopeStyle::Tasks),
            "data" => Ok(EnvelopeStyle::Data),
            "unrecognized" => Ok(EnvelopeStyle::Unrecognized),
            other => Err(format!("unknown envelope style: {other}")),
        }
    }
}

pub type Db = Arc<RwLock<Vec<Task>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    envelope: EnvelopeStyle,
}

pub fn app() -> Router {
    app_with(EnvelopeStyle::default())
}

pub fn app_with(envelope: EnvelopeStyle) -> Router {
    app_with_tasks(envelope, Vec::new())
}

pub fn app_with_tasks(envelope: EnvelopeStyle, tasks: Vec<Task>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(tasks)),
        envelope,
    };
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(state)
}

pub async fn run(listener: TcpListener, envelope: EnvelopeStyle) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(envelope)).await
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wrap one page of tasks in the configured envelope.
pub fn envelope(style: EnvelopeStyle, items: Vec<Task>, total: usize, page: u64, limit: u64) -> Value {
    let total_pages = (total as u64).div_ceil(limit).max(1);
    let keyed = |key: &str| {
        json!({
            key: items,
            "total": total,
            "page": page,
            "limit": limit,
            "totalPages": total_pages,
        })
    };
    match style {
        EnvelopeStyle::Bare => json!(items),
        EnvelopeStyle::Todos => keyed("todos"),
        EnvelopeStyle::Tasks => keyed("tasks"),
        EnvelopeStyle::Data => keyed("data"),
        EnvelopeStyle::Unrecognized => json!({ "results": items, "count": total }),
    }
}

async fn list_tasks(State(state): State<AppState>, Query(params): Query<ListParams>) -> Json<Value> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).max(1);
    let tasks = state.db.read().await;
    let start = (page - 1).saturating_mul(limit) as usize;
    let items: Vec<Task> = tasks.iter().skip(start).take(limit as usize).cloned().collect();
    tracing::debug!(page, limit, returned = items.len(), total = tasks.len(), "Listing tasks");
    Json(envelope(state.envelope, items, tasks.len(), page, limit))
}

async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> (StatusCode, Json<Task>) {
    let mut task = Task::new(&input.title, input.completed);
    task.description = input.description;
    state.db.write().await.push(task.clone());
    tracing::info!(id = %task.id, "Created task");
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Task>, StatusCode> {
    let tasks = state.db.read().await;
    tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = state.db.write().await;
    let task = tasks.iter_mut().find(|t| t.id == id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = Some(description);
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    task.updated_at = timestamp();
    Ok(Json(task.clone()))
}

async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let mut tasks = state.db.write().await;
    match tasks.iter().position(|t| t.id == id) {
        Some(index) => {
            tasks.remove(index);
            tracing::info!(%id, "Deleted task");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_to_camel_case_json() {
        let task = Task {
            id: "t-1".to_string(),
            title: "Test".to_string(),
            description: None,
            completed: false,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "t-1");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn new_task_has_matching_timestamps() {
        let task = Task::new("Fresh", true);
        assert!(task.completed);
        assert_eq!(task.created_at, task.updated_at);
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn create_task_defaults_completed_to_false() {
        let input: CreateTask = serde_json::from_str(r#"{"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(!input.completed);
        assert!(input.description.is_none());
    }

    #[test]
    fn create_task_rejects_missing_title() {
        let result: Result<CreateTask, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_task_all_fields_optional() {
        let input: UpdateTask = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert!(input.completed.is_none());
    }

    #[test]
    fn envelope_styles_wrap_items() {
        let items = vec![Task::new("a", false)];
        assert!(envelope(EnvelopeStyle::Bare, items.clone(), 1, 1, 10).is_array());
        for (style, key) in [
            (EnvelopeStyle::Todos, "todos"),
            (EnvelopeStyle::Tasks, "tasks"),
            (EnvelopeStyle::Data, "data"),
        ] {
            let body = envelope(style, items.clone(), 21, 1, 10);
            assert_eq!(body[key].as_array().unwrap().len(), 1);
            assert_eq!(body["total"], 21);
            assert_eq!(body["totalPages"], 3);
        }
        let body = envelope(EnvelopeStyle::Unrecognized, items, 1, 1, 10);
        assert!(body.get("results").is_some());
    }

    #[test]
    fn envelope_style_parses() {
        assert_eq!("Bare".parse::<EnvelopeStyle>(), Ok(EnvelopeStyle::Bare));
        assert_eq!("data".parse::<EnvelopeStyle>(), Ok(EnvelopeStyle::Data));
        assert!("xml".parse::<EnvelopeStyle>().is_err());
    }
}
