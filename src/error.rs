//! Error types for message extraction

use thiserror::Error;

/// Boxed error returned by the fetch and text-extraction collaborators
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort extraction of a single message
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The `From` header holds no `local@domain` address
    #[error("No email address found in From header: {0}")]
    MalformedSenderHeader(String),

    /// Empty content handed to the HTML converter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Part data is not valid base64url
    #[error("Failed to decode part data: {0}")]
    Decode(String),

    /// The message resource JSON does not match the expected shape
    #[error("Malformed message resource: {0}")]
    Envelope(String),

    /// Extractor configuration could not be loaded
    #[error("Invalid extractor configuration: {0}")]
    Config(String),

    /// Fetching attachment bytes failed
    #[error("Failed to fetch attachment {attachment_id}: {source}")]
    Fetch {
        attachment_id: String,
        #[source]
        source: CollaboratorError,
    },

    /// Text extraction from an attachment failed
    #[error("Failed to extract text from {filename}: {source}")]
    TextExtraction {
        filename: String,
        #[source]
        source: CollaboratorError,
    },
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
