//! Sender company resolution from the `From` header and subject line

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::types::Header;
use regex::Regex;
use tracing::{debug, info};

static ADDRESS_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").unwrap());

/// Domain of the first `local@domain` address found in a header value
pub fn extract_sender_domain(value: &str) -> Result<String> {
    let address = ADDRESS_REGEX
        .find(value)
        .ok_or_else(|| ExtractError::MalformedSenderHeader(value.to_string()))?
        .as_str();

    match address.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => Ok(domain.to_string()),
        _ => Err(ExtractError::MalformedSenderHeader(value.to_string())),
    }
}

/// Resolve the company a message belongs to.
///
/// Only the first `From` header is consulted; without one the configured
/// fallback identity is used. Returns `Ok(None)` when the sender is on a
/// personal domain, meaning the message should be dropped.
pub fn resolve_company(
    headers: &[Header],
    subject: &str,
    config: &ExtractorConfig,
) -> Result<Option<String>> {
    let domain = match headers.iter().find(|h| h.name == "From") {
        Some(from) => extract_sender_domain(&from.value)?,
        None => config.fallback_company.clone(),
    };

    if config.is_personal_domain(&domain) {
        info!(domain = %domain, "Skipping email from personal domain");
        return Ok(None);
    }

    if let Some(company) = config.brand_override(subject) {
        debug!("Subject override: {domain} -> {company}");
        return Ok(Some(company.to_string()));
    }

    Ok(Some(domain))
}
