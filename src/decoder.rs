use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("og:image meta tag has no content attribute")]
    MissingContent,
}

/// Parses a completion as one JSON value. A surrounding Markdown code fence
/// is tolerated, anything else around the JSON is an error.
pub fn parse_json(text: &str) -> Result<Value, ParseError> {
    let value = serde_json::from_str(strip_code_fence(text))?;
    Ok(value)
}

pub fn passthrough(text: String) -> String {
    text
}

/// Returns the `content` of the first `<meta property="og:image">`, or an
/// empty string when the page has no such tag.
pub fn og_image(html: &[u8]) -> Result<String, ParseError> {
    let html = String::from_utf8_lossy(html);
    let document = Html::parse_document(&html);

    match document.select(&OG_IMAGE).next() {
        Some(meta) => meta
            .value()
            .attr("content")
            .map(str::to_string)
            .ok_or(ParseError::MissingContent),
        None => Ok(String::new()),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string, e.g. ```json
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => {
            let inner = inner.trim();
            inner.strip_prefix("json").unwrap_or(inner).trim()
        }
    }
}
