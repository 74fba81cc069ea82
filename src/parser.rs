//! Message extraction: subject, body, HTML, attachments and the orchestrating entry point

use crate::collaborators::{AttachmentFetcher, TextExtractor};
use crate::company::resolve_company;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::html::{decode_part_data, html_to_text};
use crate::types::{
    AccessToken, Attachment, Message, MessageId, MessagePart, MessageResource, PartBody,
    PayloadShape,
};
use tracing::debug;

/// Value of the first `Subject` header, or an empty string
#[must_use]
pub fn extract_subject(message: &MessageResource) -> String {
    message
        .payload
        .as_ref()
        .and_then(|p| p.headers.as_ref())
        .and_then(|headers| headers.iter().find(|h| h.name == "Subject"))
        .map(|h| h.value.clone())
        .unwrap_or_default()
}

/// Best plain text body of a message.
///
/// Every `text/plain` or `text/html` part with data is converted and the
/// last one wins. Falls back to the snippet, verbatim, when nothing yields text.
pub fn extract_body(message: &MessageResource) -> Result<String> {
    let shape = message
        .payload
        .as_ref()
        .map_or(PayloadShape::Empty, MessagePart::shape);

    let body = match shape {
        PayloadShape::Parts(parts) | PayloadShape::NestedParts(parts) => last_text_part(parts)?,
        PayloadShape::SingleBody(data) => data_to_text(data)?,
        PayloadShape::Empty => None,
    };

    match body {
        Some(text) if !text.is_empty() => Ok(text),
        _ => {
            debug!("No decodable body, using snippet");
            Ok(message.snippet.clone())
        }
    }
}

fn last_text_part(parts: &[MessagePart]) -> Result<Option<String>> {
    let mut body = None;
    for part in parts {
        if !(part.has_mime_type("text/plain") || part.has_mime_type("text/html")) {
            continue;
        }
        if let Some(data) = part.data()
            && let Some(text) = data_to_text(data)?
        {
            body = Some(text);
        }
    }
    Ok(body)
}

fn data_to_text(data: &str) -> Result<Option<String>> {
    let decoded = decode_part_data(data)?;
    if decoded.is_empty() {
        return Ok(None);
    }
    html_to_text(&String::from_utf8_lossy(&decoded)).map(Some)
}

/// Raw HTML body of a message.
///
/// Unlike [`extract_body`] the first `text/html` part wins. When there is no
/// HTML the snippet is wrapped in a minimal document.
pub fn extract_html(message: &MessageResource) -> Result<String> {
    let shape = message
        .payload
        .as_ref()
        .map_or(PayloadShape::Empty, MessagePart::shape);

    let html = match shape {
        PayloadShape::Parts(parts) | PayloadShape::NestedParts(parts) => parts
            .iter()
            .filter(|p| p.has_mime_type("text/html"))
            .find_map(MessagePart::data)
            .map(decode_utf8)
            .transpose()?,
        PayloadShape::SingleBody(data) => Some(decode_utf8(data)?),
        PayloadShape::Empty => None,
    };

    match html {
        Some(html) if !html.is_empty() => Ok(html),
        _ => Ok(format!("<html><body>{}</body></html>", message.snippet)),
    }
}

fn decode_utf8(data: &str) -> Result<String> {
    let bytes = decode_part_data(data)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extracts normalized [`Message`]s, delegating attachment fetches and OCR
/// to the supplied collaborators
#[derive(Debug, Clone)]
pub struct MessageExtractor<F, T> {
    config: ExtractorConfig,
    fetcher: F,
    text_extractor: T,
}

impl<F, T> MessageExtractor<F, T>
where
    F: AttachmentFetcher,
    T: TextExtractor,
{
    pub const fn new(config: ExtractorConfig, fetcher: F, text_extractor: T) -> Self {
        Self {
            config,
            fetcher,
            text_extractor,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Extract one message. Any hard failure aborts the whole message.
    pub fn extract_message(
        &self,
        message: &MessageResource,
        message_id: &MessageId,
        token: &AccessToken,
    ) -> Result<Message> {
        let subject = extract_subject(message);
        let company = resolve_company(message.headers(), &subject, &self.config)?;
        let body = extract_body(message)?;
        let attachments = self.extract_attachments(message, message_id, token)?;

        debug!(
            "Extracted message {message_id}: company={company:?}, {} attachment(s)",
            attachments.len()
        );

        Ok(Message {
            message_id: message_id.clone(),
            body,
            attachments,
            company,
            subject,
            received_at: message.received_at(),
        })
    }

    /// Fetch and OCR every document attachment under `payload.parts`, in part order
    pub fn extract_attachments(
        &self,
        message: &MessageResource,
        message_id: &MessageId,
        token: &AccessToken,
    ) -> Result<Vec<Attachment>> {
        let Some(parts) = message.payload.as_ref().and_then(|p| p.parts.as_ref()) else {
            return Ok(Vec::new());
        };
        let fetch_id = message.id.as_deref().unwrap_or(message_id.as_str());

        let mut attachments = Vec::new();
        for part in parts {
            let Some(attachment_id) = part.attachment_id() else {
                continue;
            };

            let fetched = self
                .fetcher
                .fetch(fetch_id, attachment_id, token)
                .map_err(|source| ExtractError::Fetch {
                    attachment_id: attachment_id.to_string(),
                    source,
                })?;
            let Some(data) = fetched.as_ref().and_then(PartBody::data) else {
                debug!("Attachment {attachment_id} returned no data, skipping");
                continue;
            };

            let filename = part
                .filename
                .as_deref()
                .filter(|f| !f.is_empty())
                .unwrap_or(self.config.default_filename.as_str());
            if self.config.is_excluded_filename(filename) {
                debug!("Skipping attachment {filename}: excluded extension");
                continue;
            }

            let raw_text = self
                .text_extractor
                .extract_text(filename, data)
                .map_err(|source| ExtractError::TextExtraction {
                    filename: filename.to_string(),
                    source,
                })?;

            attachments.push(Attachment {
                attachment_id: attachment_id.to_string(),
                filename: filename.to_string(),
                attachment_len: data.len(),
                raw_text,
            });
        }

        Ok(attachments)
    }
}
