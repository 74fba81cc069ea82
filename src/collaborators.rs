//! Seams for the network fetch and OCR services used during attachment extraction

use crate::error::CollaboratorError;
use crate::types::{AccessToken, PartBody};

/// Retrieves the out-of-band content of an attachment part
pub trait AttachmentFetcher {
    /// Fetch attachment `attachment_id` of `message_id`.
    ///
    /// `Ok(None)` means there is nothing to attach.
    fn fetch(
        &self,
        message_id: &str,
        attachment_id: &str,
        token: &AccessToken,
    ) -> Result<Option<PartBody>, CollaboratorError>;
}

impl<F> AttachmentFetcher for F
where
    F: Fn(&str, &str, &AccessToken) -> Result<Option<PartBody>, CollaboratorError>,
{
    fn fetch(
        &self,
        message_id: &str,
        attachment_id: &str,
        token: &AccessToken,
    ) -> Result<Option<PartBody>, CollaboratorError> {
        self(message_id, attachment_id, token)
    }
}

/// Turns attachment content into text (OCR, PDF text layers, ...)
pub trait TextExtractor {
    /// `data` is the base64url payload exactly as fetched
    fn extract_text(&self, filename: &str, data: &str) -> Result<String, CollaboratorError>;
}

impl<F> TextExtractor for F
where
    F: Fn(&str, &str) -> Result<String, CollaboratorError>,
{
    fn extract_text(&self, filename: &str, data: &str) -> Result<String, CollaboratorError> {
        self(filename, data)
    }
}
