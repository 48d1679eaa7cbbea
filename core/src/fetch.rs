//! Per-view fetch state with latest-wins settlement.
//!
//! # Design
//! A view may start a second request (new page, new id) before the first
//! one resolves, and nothing cancels the earlier round trip. `FetchSlot`
//! hands out a monotonically increasing `RequestToken` on every `begin`; a
//! result is applied only if it carries the most recently issued token, so
//! the state always reflects the latest request no matter the order in which
//! responses arrive.

use std::fmt;

use crate::api::TodoApi;
use crate::config::ClientConfig;
use crate::observe::Observer;
use crate::transport::Transport;
use crate::types::{Todo, TodoPage};
use crate::view::{compose_view, EmptyState, StatusFilter};

/// `idle -> loading -> success | failed`; every `begin` re-enters `loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    /// Human-readable failure message, never empty.
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    issued: u64,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            issued: 0,
        }
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Enter `Loading`, discarding any previous result.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = FetchState::Loading;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Apply `result` if `token` is the latest issued one. Returns whether
    /// the result was applied.
    pub fn settle<E: fmt::Display>(&mut self, token: RequestToken, result: Result<T, E>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(token = token.0, latest = self.issued, "Discarding stale result");
            return false;
        }
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => FetchState::Failed(failure_message(&e)),
        };
        true
    }
}

fn failure_message(error: &impl fmt::Display) -> String {
    let message = error.to_string();
    if message.is_empty() {
        "request failed".to_string()
    } else {
        message
    }
}

/// State owned by the task list view: pagination, search, filter and the
/// current page fetch.
#[derive(Debug, Clone)]
pub struct TodoListView {
    page: u64,
    page_size: u64,
    search_term: String,
    filter: StatusFilter,
    fetch: FetchSlot<TodoPage>,
}

impl TodoListView {
    pub fn new(page_size: u64) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search_term: String::new(),
            filter: StatusFilter::All,
            fetch: FetchSlot::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.page_size)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn state(&self) -> &FetchState<TodoPage> {
        self.fetch.state()
    }

    /// Search and filter act on the loaded page; they never refetch.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Move to `page` without fetching; follow with `load`, or with
    /// `refetch` and `settle` when the caller drives the request itself.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Start fetching the current page. The caller requests
    /// `(self.page(), self.page_size())` and settles with the token.
    pub fn refetch(&mut self) -> RequestToken {
        self.fetch.begin()
    }

    pub fn settle<E: fmt::Display>(&mut self, token: RequestToken, result: Result<TodoPage, E>) -> bool {
        self.fetch.settle(token, result)
    }

    /// Fetch the current page through `api` and settle it.
    pub fn load<T: Transport, O: Observer>(&mut self, api: &TodoApi<T, O>) -> bool {
        let token = self.refetch();
        let result = api.list_todos(self.page, self.page_size);
        self.settle(token, result)
    }

    pub fn visible(&self) -> Vec<Todo> {
        match self.fetch.state().data() {
            Some(page) => compose_view(&page.items, &self.search_term, self.filter),
            None => Vec::new(),
        }
    }

    /// Only meaningful once a page has loaded; `None` while idle, loading,
    /// failed, or when something is visible.
    pub fn empty_state(&self) -> Option<EmptyState> {
        self.fetch.state().data()?;
        EmptyState::of(&self.visible(), &self.search_term, self.filter)
    }

    pub fn total_pages(&self) -> u64 {
        self.fetch.state().data().map_or(1, |page| page.total_pages)
    }

    pub fn shows_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn retry_available(&self) -> bool {
        self.fetch.state().error().is_some()
    }
}

/// State owned by the task detail view.
#[derive(Debug, Clone, Default)]
pub struct TodoDetailView {
    id: Option<String>,
    fetch: FetchSlot<Todo>,
}

impl TodoDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> &FetchState<Todo> {
        self.fetch.state()
    }

    /// Start loading `id`. A blank id is a no-op: no token is issued and the
    /// state is left untouched.
    pub fn begin(&mut self, id: &str) -> Option<RequestToken> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.id = Some(id.to_string());
        Some(self.fetch.begin())
    }

    pub fn settle<E: fmt::Display>(&mut self, token: RequestToken, result: Result<Todo, E>) -> bool {
        self.fetch.settle(token, result)
    }

    pub fn load<T: Transport, O: Observer>(&mut self, api: &TodoApi<T, O>, id: &str) -> bool {
        let Some(token) = self.begin(id) else {
            return false;
        };
        let result = api.get_todo_by_id(id);
        self.settle(token, result)
    }

    pub fn back_available(&self) -> bool {
        self.fetch.state().error().is_some()
    }
}
