use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use reqwest::{Client, Url};
use std::time::Duration;

const USER_AGENT: &str = concat!("jobscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} returned no document")]
    NoDocument { url: String },
    #[error("could not read markup from {url}: {reason}")]
    Markup { url: String, reason: String },
}

impl FetchError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Visible text of one page. Lives for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub source_url: String,
    pub text: String,
}

/// Loads pages over HTTP. Holds one shared `reqwest::Client`, so it is cheap
/// to share across handlers.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    bytes_timeout: Duration,
}

impl PageFetcher {
    pub fn new(bytes_timeout: Duration) -> Result<PageFetcher, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                reason: format!("could not build http client: {e}"),
            })?;
        Ok(PageFetcher {
            client,
            bytes_timeout,
        })
    }

    /// Fetches `url` and returns its text with script and style markup removed.
    /// An error status is logged; the body is still extracted.
    pub async fn load_text(&self, url: &str) -> Result<PageContent, FetchError> {
        let parsed = parse_url(url)?;
        tracing::debug!(url, "loading page text");

        let res = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "page answered with an error status");
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        if body.is_empty() {
            return Err(FetchError::NoDocument {
                url: url.to_string(),
            });
        }

        let text = html_to_text(&body).map_err(|e| FetchError::Markup {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(PageContent {
            source_url: url.to_string(),
            text,
        })
    }

    /// Fetches `url` with the configured timeout and returns the raw body,
    /// whatever the HTTP status.
    pub async fn load_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = parse_url(url)?;
        tracing::debug!(url, timeout = ?self.bytes_timeout, "loading page bytes");

        let res = self
            .client
            .get(parsed)
            .timeout(self.bytes_timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let body = res
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        Ok(body.to_vec())
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Parses `html` and returns its visible text. Block elements start new lines,
/// blank lines are dropped.
pub fn html_to_text(html: &[u8]) -> std::io::Result<String> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut std::io::Cursor::new(html))?;

    let mut out = String::new();
    walk_html(&dom.document, &mut out);
    Ok(compress_whitespaces(&out))
}

fn is_skipped(local: &LocalName) -> bool {
    matches!(&**local, "script" | "style" | "noscript" | "template")
}

fn is_block_like(local: &LocalName) -> bool {
    matches!(
        &**local,
        "p" | "div"
            | "section"
            | "article"
            | "main"
            | "aside"
            | "nav"
            | "li"
            | "ul"
            | "ol"
            | "dl"
            | "dt"
            | "dd"
            | "header"
            | "footer"
            | "title"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "table"
            | "tr"
            | "br"
            | "pre"
            | "blockquote"
    )
}

fn walk_html(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => {
            let s = contents.borrow();
            let s = s.trim();
            if s.is_empty() {
                return;
            }
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
            out.push_str(s);
        }
        NodeData::Element { name, .. } => {
            let local = &name.local;
            if is_skipped(local) {
                return;
            }

            let block = is_block_like(local);
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
            for child in handle.children.borrow().iter() {
                walk_html(child, out);
            }
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        _ => {
            for child in handle.children.borrow().iter() {
                walk_html(child, out);
            }
        }
    }
}

fn compress_whitespaces(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
