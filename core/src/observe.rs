//! Diagnostics seam for the data layer.
//!
//! The data layer never logs directly. It reports through an injected
//! [`Observer`]; `TracingObserver` forwards to `tracing`, `NoopObserver`
//! discards, and tests can record events without capturing output.

use serde_json::Value;

use crate::envelope::EnvelopeKind;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::TodoPage;

/// Receives diagnostic events from `TodoApi` and envelope normalization.
///
/// Every method has an empty default so implementations pick only the
/// events they care about.
pub trait Observer {
    fn request_sent(&self, _request: &HttpRequest) {}

    fn request_failed(&self, _request: &HttpRequest, _error: &ApiError) {}

    fn page_received(&self, _page: &TodoPage, _kind: EnvelopeKind) {}

    /// The list body did not match any recognised envelope shape.
    fn envelope_unrecognized(&self, _body: &Value) {}

    /// An element of a recognised item array was not a decodable task.
    fn item_skipped(&self, _index: usize, _reason: &str) {}
}

impl<O: Observer + ?Sized> Observer for &O {
    fn request_sent(&self, request: &HttpRequest) {
        (**self).request_sent(request)
    }

    fn request_failed(&self, request: &HttpRequest, error: &ApiError) {
        (**self).request_failed(request, error)
    }

    fn page_received(&self, page: &TodoPage, kind: EnvelopeKind) {
        (**self).page_received(page, kind)
    }

    fn envelope_unrecognized(&self, body: &Value) {
        (**self).envelope_unrecognized(body)
    }

    fn item_skipped(&self, index: usize, reason: &str) {
        (**self).item_skipped(index, reason)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn request_sent(&self, request: &HttpRequest) {
        tracing::debug!(method = request.method.as_str(), url = %request.url(), "Sending request");
    }

    fn request_failed(&self, request: &HttpRequest, error: &ApiError) {
        tracing::error!(
            method = request.method.as_str(),
            url = %request.url(),
            error = %error,
            "API request failed"
        );
    }

    fn page_received(&self, page: &TodoPage, kind: EnvelopeKind) {
        tracing::debug!(
            envelope = ?kind,
            items = page.items.len(),
            total = page.total,
            total_pages = page.total_pages,
            "Received task page"
        );
    }

    fn envelope_unrecognized(&self, body: &Value) {
        tracing::warn!(body = %body, "Unexpected list envelope, treating as empty");
    }

    fn item_skipped(&self, index: usize, reason: &str) {
        tracing::warn!(index, reason, "Skipping undecodable task");
    }
}
