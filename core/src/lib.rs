//! Data access core for a task board over a remote `/tasks` REST resource.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values
//! (host-does-IO pattern); a [`Transport`] performs the round trip. List
//! responses arrive in several envelope shapes and are normalized into one
//! canonical [`TodoPage`]. The view layer filters a loaded page by search
//! term and completion status, and tracks fetch state with latest-wins
//! settlement.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Envelope recognition is an explicit check over a closed set of shapes;
//!   anything else degrades to an empty page.
//! - Diagnostics go through an injected [`Observer`], never global output.
//! - `compose_view` is pure and preserves input order.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod http;
pub mod observe;
pub mod transport;
pub mod types;
pub mod view;

pub use api::TodoApi;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use envelope::{Envelope, EnvelopeKind};
pub use error::ApiError;
pub use fetch::{FetchSlot, FetchState, RequestToken, TodoDetailView, TodoListView};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use observe::{NoopObserver, Observer, TracingObserver};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateTodo, Todo, TodoId, TodoPage, UpdateTodo};
pub use view::{compose_view, EmptyState, StatusFilter};
