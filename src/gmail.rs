//! Blocking Gmail API attachment fetcher

use crate::collaborators::AttachmentFetcher;
use crate::config::ExtractorConfig;
use crate::error::CollaboratorError;
use crate::types::{AccessToken, PartBody};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

/// Fetches attachments from `users.messages.attachments.get`
#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    base_url: String,
}

impl GmailClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    #[must_use]
    pub fn attachment_url(&self, message_id: &str, attachment_id: &str) -> String {
        format!(
            "{}/gmail/v1/users/me/messages/{message_id}/attachments/{attachment_id}",
            self.base_url
        )
    }
}

impl AttachmentFetcher for GmailClient {
    fn fetch(
        &self,
        message_id: &str,
        attachment_id: &str,
        token: &AccessToken,
    ) -> Result<Option<PartBody>, CollaboratorError> {
        let url = self.attachment_url(message_id, attachment_id);
        debug!("Fetching attachment {attachment_id} of message {message_id}");

        let response = self.http.get(&url).bearer_auth(token.secret()).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.error_for_status()?.json::<PartBody>()?;
        Ok(Some(body))
    }
}
