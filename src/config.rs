//! Extractor configuration: domain exclusions, brand overrides and attachment filters

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const PERSONAL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    "protonmail.com",
    "proton.me",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "gmx.com",
    "mail.com",
    "yandex.com",
    "zoho.com",
];

const EXCLUDED_EXTENSIONS: &[&str] = &["zip", "ics", "txt", "png", "jpg", "jpeg", "gif"];

/// Subject substring that forces a fixed company identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrandOverride {
    /// Matched case-insensitively against the subject
    pub pattern: String,
    pub company: String,
}

impl BrandOverride {
    pub fn new(pattern: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            company: company.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        subject
            .to_lowercase()
            .contains(&self.pattern.to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sender domains that never identify a company
    pub personal_domains: HashSet<String>,

    /// Checked in order, first match wins
    pub brand_overrides: Vec<BrandOverride>,

    /// Attachment extensions (without the dot) that are never sent to OCR
    pub excluded_extensions: Vec<String>,

    /// Filename used when a part carries none
    pub default_filename: String,

    /// Identity used when there is no `From` header
    pub fallback_company: String,

    /// Gmail API root used by [`crate::GmailClient`]
    pub api_base_url: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            personal_domains: PERSONAL_DOMAINS.iter().map(|d| (*d).to_string()).collect(),
            brand_overrides: vec![
                BrandOverride::new("chanel", "chanel"),
                BrandOverride::new("louis vuitton", "Louis Vuitton"),
            ],
            excluded_extensions: EXCLUDED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            default_filename: "untitled.txt".to_string(),
            fallback_company: "others".to_string(),
            api_base_url: "https://www.googleapis.com".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub fn is_personal_domain(&self, domain: &str) -> bool {
        self.personal_domains
            .iter()
            .any(|d| d.eq_ignore_ascii_case(domain))
    }

    /// Company forced by the first override whose pattern occurs in `subject`
    #[must_use]
    pub fn brand_override(&self, subject: &str) -> Option<&str> {
        self.brand_overrides
            .iter()
            .find(|o| o.matches(subject))
            .map(|o| o.company.as_str())
    }

    /// Whether a filename's extension keeps it away from text extraction.
    ///
    /// Matching ignores ASCII case, so `RECEIPT.PNG` is excluded just like
    /// `receipt.png`. Callers pass [`Self::default_filename`] for parts whose
    /// `filename` is missing or the empty string Gmail uses for unnamed parts,
    /// so with the defaults those parts are excluded too. Earlier receipt
    /// tooling matched suffixes case-sensitively and kept unnamed parts; set
    /// `default_filename` to a non-excluded name to keep them.
    #[must_use]
    pub fn is_excluded_filename(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.excluded_extensions
                    .iter()
                    .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
