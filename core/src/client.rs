//! Stateless HTTP request builder and response parser for the tasks API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! generic builders (`build_get`, `build_get_by_id`, ...) work on any
//! resource path; the task-specific ones fix the resource to `/tasks`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

pub const TASKS_RESOURCE: &str = "/tasks";

/// Characters left unescaped in an id path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Synchronous, stateless client for the tasks API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            query: Vec::new(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: None,
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_matches('/'))
    }

    fn item_url(&self, resource: &str, id: &str) -> String {
        format!(
            "{}/{}",
            self.resource_url(resource),
            utf8_percent_encode(id, SEGMENT_ENCODE_SET)
        )
    }

    pub fn build_get(&self, resource: &str, params: &[(&str, String)]) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, self.resource_url(resource));
        req.query = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        req
    }

    pub fn build_get_by_id(&self, resource: &str, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(resource, id))
    }

    pub fn build_create<B: Serialize>(&self, resource: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let mut req = self.request(HttpMethod::Post, self.resource_url(resource));
        req.body = Some(to_json(body)?);
        Ok(req)
    }

    pub fn build_update<B: Serialize>(
        &self,
        resource: &str,
        id: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let mut req = self.request(HttpMethod::Put, self.item_url(resource, id));
        req.body = Some(to_json(body)?);
        Ok(req)
    }

    pub fn build_delete(&self, resource: &str, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(resource, id))
    }

    pub fn build_list_todos(&self, page: u64, limit: u64) -> HttpRequest {
        self.build_get(
            TASKS_RESOURCE,
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        self.build_get_by_id(TASKS_RESOURCE, id)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.build_create(TASKS_RESOURCE, input)
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.build_update(TASKS_RESOURCE, id, input)
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        self.build_delete(TASKS_RESOURCE, id)
    }

    /// Raw JSON body of a 2xx response. List bodies go through
    /// [`crate::envelope::normalize`] afterwards.
    pub fn parse_json(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_body(response)
    }

    pub fn parse_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        let value: Value = parse_body(response)?;
        if !value.is_object() {
            return Err(ApiError::DeserializationError(format!(
                "expected a task object, got {value}"
            )));
        }
        serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Any 2xx is success; the body, if any, is ignored.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
