//! Message resource envelope and the normalized records produced from it

use crate::error::{ExtractError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One email as returned by the Gmail `users.messages.get` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResource {
    /// Gmail message id
    pub id: Option<String>,

    pub thread_id: Option<String>,

    /// Short plain-text summary, used when no body can be decoded
    #[serde(default)]
    pub snippet: String,

    /// Receive time in epoch milliseconds, as a decimal string
    pub internal_date: Option<String>,

    /// Root MIME part
    pub payload: Option<MessagePart>,
}

impl MessageResource {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::Envelope(e.to_string()))
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ExtractError::Envelope(e.to_string()))
    }

    /// Headers of the root part, if any
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        self.payload
            .as_ref()
            .and_then(|p| p.headers.as_deref())
            .unwrap_or_default()
    }

    /// Parse `internalDate` into a UTC timestamp
    #[must_use]
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.internal_date.as_deref()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// A node in the MIME tree. The root payload has the same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub part_id: Option<String>,
    pub mime_type: Option<String>,
    pub filename: Option<String>,
    pub headers: Option<Vec<Header>>,
    pub body: Option<PartBody>,
    pub parts: Option<Vec<MessagePart>>,
}

impl MessagePart {
    /// Classify which of the accepted layouts this payload uses
    #[must_use]
    pub fn shape(&self) -> PayloadShape<'_> {
        if let Some(parts) = &self.parts {
            return PayloadShape::Parts(parts);
        }

        let Some(body) = &self.body else {
            return PayloadShape::Empty;
        };

        if let Some(data) = body.data() {
            PayloadShape::SingleBody(data)
        } else if let Some(parts) = &body.parts {
            PayloadShape::NestedParts(parts)
        } else {
            PayloadShape::Empty
        }
    }

    #[must_use]
    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.mime_type.as_deref() == Some(mime_type)
    }

    /// Non-empty inline body data
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.body.as_ref().and_then(PartBody::data)
    }

    #[must_use]
    pub fn attachment_id(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.attachment_id.as_deref())
    }
}

/// Body of a part: inline base64url data or a reference to an attachment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    pub attachment_id: Option<String>,
    pub size: Option<u64>,

    /// Base64url encoded content
    pub data: Option<String>,

    /// Multipart children nested one level deeper than usual
    pub parts: Option<Vec<MessagePart>>,
}

impl PartBody {
    /// Inline data, treating an empty string as absent
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }
}

/// A single `{name, value}` header entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Where the readable content of a payload lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape<'a> {
    /// `payload.parts`
    Parts(&'a [MessagePart]),

    /// `payload.body.data`
    SingleBody(&'a str),

    /// `payload.body.parts`
    NestedParts(&'a [MessagePart]),

    /// None of the above
    Empty,
}

/// Message ID wrapper type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OAuth bearer token used for attachment fetches
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// Normalized email handed to the receipt pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,

    /// Plain text body, the snippet when nothing could be decoded
    pub body: String,

    /// Document attachments in part order
    pub attachments: Vec<Attachment>,

    /// Sender identity; `None` means the caller should drop the message
    pub company: Option<String>,

    pub subject: String,

    pub received_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Whether the sender resolved to an excluded personal domain
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.company.is_none()
    }
}

/// Attachment with text pulled out by the OCR collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub attachment_id: String,
    pub filename: String,

    /// Length of the fetched base64 data string
    pub attachment_len: usize,

    pub raw_text: String,
}
