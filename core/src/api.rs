//! Data access for the tasks resource.
//!
//! `TodoApi` ties the request builder, a transport and an observer together:
//! build, execute one round trip, parse. List bodies are normalized into a
//! [`TodoPage`]; single tasks are returned as received. Failures are
//! reported to the observer and returned unchanged. Nothing is retried.

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::envelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::observe::{Observer, TracingObserver};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateTodo, Todo, TodoPage, UpdateTodo};

pub struct TodoApi<T, O = TracingObserver> {
    client: TodoClient,
    transport: T,
    observer: O,
}

impl TodoApi<UreqTransport, TracingObserver> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            TodoClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
            TracingObserver,
        )
    }
}

impl<T: Transport, O: Observer> TodoApi<T, O> {
    pub fn new(client: TodoClient, transport: T, observer: O) -> Self {
        Self {
            client,
            transport,
            observer,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn round_trip<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        self.observer.request_sent(&request);
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| parse(&self.client, response));
        if let Err(e) = &result {
            self.observer.request_failed(&request, e);
        }
        result
    }

    /// One page of tasks in canonical form.
    ///
    /// An unrecognised envelope yields an empty page, not an error.
    pub fn list_todos(&self, page: u64, limit: u64) -> Result<TodoPage, ApiError> {
        if page == 0 {
            return Err(ApiError::InvalidArgument("page must be >= 1".to_string()));
        }
        if limit == 0 {
            return Err(ApiError::InvalidArgument("limit must be >= 1".to_string()));
        }
        let body = self.round_trip(self.client.build_list_todos(page, limit), TodoClient::parse_json)?;
        Ok(envelope::normalize(&body, limit, &self.observer))
    }

    /// A blank `id` fails with `MissingId` before any request is made.
    pub fn get_todo_by_id(&self, id: &str) -> Result<Todo, ApiError> {
        let id = require_id(id)?;
        self.round_trip(self.client.build_get_todo(id), TodoClient::parse_todo)
    }

    pub fn create_todo(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        self.round_trip(request, TodoClient::parse_todo)
    }

    pub fn update_todo(&self, id: &str, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let id = require_id(id)?;
        let request = self.client.build_update_todo(id, input)?;
        self.round_trip(request, TodoClient::parse_todo)
    }

    pub fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let id = require_id(id)?;
        self.round_trip(self.client.build_delete_todo(id), TodoClient::parse_empty)
    }
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::MissingId);
    }
    Ok(id)
}
