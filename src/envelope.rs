use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::services::search::VideoRecord;

const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

fn now_stamp() -> String {
    OffsetDateTime::now_utc()
        .format(STAMP_FORMAT)
        .unwrap_or_default()
}

/// Advisory message state. Carried on the wire but not enforced by
/// validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Failure,
    #[default]
    Pending,
}

// Original-protocol peers carry status as a plain string whose zero
// value is ""; anything unrecognized reads as Pending rather than
// failing the whole envelope decode.
fn permissive_status<'de, D>(deserializer: D) -> std::result::Result<Status, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(match value.as_str() {
        "Success" => Status::Success,
        "Failure" => Status::Failure,
        _ => Status::Pending,
    })
}

/// The search request body carried inside a request-phase envelope. The
/// token is an unused placeholder kept for wire compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    pub request: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub error: String,
}

impl ErrorInfo {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Envelope content. Serialized untagged so the wire carries the bare
/// payload value, matching what clients already send and expect.
///
/// Variant order matters for decoding: a form is tried first, then the
/// result list, then the error shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Form(SearchForm),
    Videos(Vec<VideoRecord>),
    Error(ErrorInfo),
}

/// The request/response message wrapper exchanged at the HTTP boundary.
///
/// An envelope is created per inbound call, turned into its response with
/// [`Envelope::into_response`] at most once, and discarded after the
/// response body is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default, deserialize_with = "permissive_status")]
    pub status: Status,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub content: Option<Payload>,
}

impl Envelope {
    pub fn builder() -> EnvelopeBuilder {
        EnvelopeBuilder::default()
    }

    /// Syntactic sanity check only: sender and receiver present, content
    /// present. The shape of the content is not inspected, so an envelope
    /// carrying an empty query still validates.
    pub fn validate(&self) -> bool {
        !self.sender.is_empty() && !self.receiver.is_empty() && self.content.is_some()
    }

    /// Turn this request into its response: id + 1, sender and receiver
    /// swapped, timestamp refreshed, content replaced.
    ///
    /// Consuming `self` means a handler cannot accidentally convert the
    /// same envelope twice; applying it to the returned value anyway
    /// compounds the id increment and undoes the swap.
    #[must_use]
    pub fn into_response(mut self, content: Payload) -> Envelope {
        // The id is attacker-suppliable wire data; wrap instead of
        // panicking at the boundary value.
        self.id = self.id.wrapping_add(1);
        std::mem::swap(&mut self.sender, &mut self.receiver);
        self.timestamp = now_stamp();
        self.content = Some(content);
        self
    }
}

/// Fluent construction over a zero-valued envelope. Setters are
/// independent and idempotent; repeating one means the last call wins.
#[derive(Debug, Default)]
pub struct EnvelopeBuilder {
    inner: Envelope,
}

impl EnvelopeBuilder {
    pub fn id(mut self, id: u64) -> Self {
        self.inner.id = id;
        self
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.inner.sender = sender.into();
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.inner.receiver = receiver.into();
        self
    }

    pub fn timestamp_now(mut self) -> Self {
        self.inner.timestamp = now_stamp();
        self
    }

    pub fn content(mut self, content: Payload) -> Self {
        self.inner.content = Some(content);
        self
    }

    pub fn build(self) -> Envelope {
        self.inner
    }
}
