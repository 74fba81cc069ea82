// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Receipt Mail Extraction
//!
//! Turns a Gmail message resource into a normalized [`Message`]: readable
//! body text, the sender's company identity, and text pulled from document
//! attachments.
//!
//! # Features
//!
//! - Typed envelope with explicit payload shapes
//! - HTML to plain text conversion
//! - Company resolution with personal-domain exclusion and brand overrides
//! - Pluggable attachment fetching and OCR
//!
//! # Example
//!
//! ```rust
//! use receipt_mail::{MessageResource, extract_body, extract_subject, resolve_company, ExtractorConfig};
//!
//! let message = MessageResource::from_json_str(r#"{
//!     "id": "18c2",
//!     "snippet": "Thanks for your order",
//!     "payload": {
//!         "headers": [
//!             {"name": "From", "value": "Shop <orders@shop.example>"},
//!             {"name": "Subject", "value": "Your receipt"}
//!         ],
//!         "body": {"data": "PHA-VGhhbmtzITwvcD4"}
//!     }
//! }"#).unwrap();
//!
//! let subject = extract_subject(&message);
//! let company = resolve_company(message.headers(), &subject, &ExtractorConfig::default()).unwrap();
//!
//! assert_eq!(company.as_deref(), Some("shop.example"));
//! assert_eq!(extract_body(&message).unwrap(), "Thanks!");
//! ```

mod collaborators;
mod company;
mod config;
mod error;
mod gmail;
mod html;
mod parser;
mod types;

pub use collaborators::{AttachmentFetcher, TextExtractor};
pub use company::{extract_sender_domain, resolve_company};
pub use config::{BrandOverride, ExtractorConfig};
pub use error::{CollaboratorError, ExtractError, Result};
pub use gmail::GmailClient;
pub use html::{decode_part_data, html_to_text};
pub use parser::{MessageExtractor, extract_body, extract_html, extract_subject};
pub use types::*;
