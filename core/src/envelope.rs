//! List envelope recognition and normalization.
//!
//! # Design
//! The list endpoint has shipped several response shapes over time. Instead
//! of inspecting the body ad hoc, [`Envelope::classify`] performs one explicit
//! check over a closed set of shapes, in this order:
//!
//! 1. a bare array of tasks,
//! 2. `{"todos": [...]}`,
//! 3. `{"tasks": [...]}`,
//! 4. `{"data": [...]}`.
//!
//! Keyed shapes may also carry `total` and `totalPages`. Anything else is
//! [`Envelope::Unrecognized`], which normalizes to an empty page: an
//! unexpected backend shape renders "no items" instead of failing the view.

use serde::Deserialize;
use serde_json::Value;

use crate::observe::Observer;
use crate::types::{Todo, TodoPage};

/// Which envelope shape a list body used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Bare,
    Todos,
    Tasks,
    Data,
    Unrecognized,
}

/// Items plus the optional pagination fields of a keyed envelope.
#[derive(Debug, Clone, Copy)]
pub struct Keyed<'a> {
    pub items: &'a [Value],
    pub total: Option<u64>,
    pub total_pages: Option<u64>,
}

/// A list response body, classified.
#[derive(Debug, Clone, Copy)]
pub enum Envelope<'a> {
    Bare(&'a [Value]),
    Todos(Keyed<'a>),
    Tasks(Keyed<'a>),
    Data(Keyed<'a>),
    Unrecognized,
}

impl<'a> Envelope<'a> {
    pub fn classify(body: &'a Value) -> Self {
        match body {
            Value::Array(items) => Envelope::Bare(items),
            Value::Object(_) => {
                if let Some(keyed) = keyed(body, "todos") {
                    Envelope::Todos(keyed)
                } else if let Some(keyed) = keyed(body, "tasks") {
                    Envelope::Tasks(keyed)
                } else if let Some(keyed) = keyed(body, "data") {
                    Envelope::Data(keyed)
                } else {
                    Envelope::Unrecognized
                }
            }
            _ => Envelope::Unrecognized,
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        match self {
            Envelope::Bare(_) => EnvelopeKind::Bare,
            Envelope::Todos(_) => EnvelopeKind::Todos,
            Envelope::Tasks(_) => EnvelopeKind::Tasks,
            Envelope::Data(_) => EnvelopeKind::Data,
            Envelope::Unrecognized => EnvelopeKind::Unrecognized,
        }
    }

    pub fn items(&self) -> &'a [Value] {
        match self {
            Envelope::Bare(items) => *items,
            Envelope::Todos(k) | Envelope::Tasks(k) | Envelope::Data(k) => k.items,
            Envelope::Unrecognized => &[],
        }
    }

    /// Reported total, falling back to the number of items received.
    pub fn total(&self) -> u64 {
        match self {
            Envelope::Bare(items) => items.len() as u64,
            Envelope::Todos(k) | Envelope::Tasks(k) | Envelope::Data(k) => {
                k.total.unwrap_or(k.items.len() as u64)
            }
            Envelope::Unrecognized => 0,
        }
    }

    pub fn total_pages(&self) -> Option<u64> {
        match self {
            Envelope::Todos(k) | Envelope::Tasks(k) | Envelope::Data(k) => k.total_pages,
            Envelope::Bare(_) | Envelope::Unrecognized => None,
        }
    }
}

fn keyed<'a>(body: &'a Value, key: &str) -> Option<Keyed<'a>> {
    let items = body.get(key)?.as_array()?;
    Some(Keyed {
        items,
        total: positive(body.get("total")),
        total_pages: positive(body.get("totalPages")),
    })
}

/// Zero, negative and non-integer values count as absent.
fn positive(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64).filter(|n| *n > 0)
}

/// Page count for `total` items at `limit` per page, never below 1.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1)).max(1)
}

/// Reshape a list body into the canonical page.
///
/// Never fails: unrecognised bodies become an empty page, and elements that
/// are not JSON objects are skipped. Both are reported to `observer`. Every
/// object becomes a task, whatever the types of its fields.
pub fn normalize(body: &Value, limit: u64, observer: &impl Observer) -> TodoPage {
    let envelope = Envelope::classify(body);
    if let Envelope::Unrecognized = envelope {
        observer.envelope_unrecognized(body);
    }

    let mut items = Vec::with_capacity(envelope.items().len());
    for (index, value) in envelope.items().iter().enumerate() {
        if !value.is_object() {
            observer.item_skipped(index, "not an object");
            continue;
        }
        match Todo::deserialize(value) {
            Ok(todo) => items.push(todo),
            Err(e) => observer.item_skipped(index, &e.to_string()),
        }
    }

    let total = envelope.total();
    let page = TodoPage {
        items,
        total,
        total_pages: envelope
            .total_pages()
            .unwrap_or_else(|| total_pages(total, limit)),
    };
    observer.page_received(&page, envelope.kind());
    page
}
