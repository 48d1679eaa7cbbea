//! Domain DTOs for the tasks API.
//!
//! # Design
//! The backend is an external service whose task schema drifts: ids may be
//! strings or numbers, the display label arrives as `title` or `name`, and
//! most fields are optional. `Todo` therefore decodes through a lenient raw
//! form and exposes `title` as the single canonical display field.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Opaque task identifier. The backend uses either JSON strings or numbers;
/// numbers are kept exactly as received, including ids beyond `i64` and
/// non-integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(Number),
    Text(String),
}

impl TodoId {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(TodoId::Number(n)),
            Value::String(s) => Some(TodoId::Text(s)),
            _ => None,
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::Number(n.into())
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Number(n.into())
    }
}

impl From<Number> for TodoId {
    fn from(n: Number) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId::Text(s)
    }
}

/// A single task as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTodo")]
pub struct Todo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<TodoId>,
}

/// Wire form accepted for a task. Every field is taken as raw JSON so a
/// loosely typed value never rejects the whole task. Both label spellings
/// are read; `title` wins when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTodo {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    completed: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    updated_at: Option<Value>,
    #[serde(default)]
    user_id: Option<Value>,
}

impl From<RawTodo> for Todo {
    fn from(raw: RawTodo) -> Self {
        Todo {
            id: raw.id.and_then(TodoId::from_value),
            title: text(raw.title).or_else(|| text(raw.name)),
            description: text(raw.description),
            completed: raw.completed.is_some_and(flag),
            created_at: text(raw.created_at),
            updated_at: text(raw.updated_at),
            user_id: raw.user_id.and_then(TodoId::from_value),
        }
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling, anything
/// else absent.
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `true`, non-zero numbers and the strings `"true"`/`"1"` count as done.
fn flag(value: Value) -> bool {
    match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

impl Todo {
    /// Display label; an untitled task renders as the empty string.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// A task without an id cannot be opened in a detail view.
    pub fn is_linkable(&self) -> bool {
        self.id.is_some()
    }

    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// Request payload for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing task. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Canonical shape of one list page, whatever envelope the server used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub total: u64,
    pub total_pages: u64,
}
