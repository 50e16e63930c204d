use anyhow::Result;
use std::time::Duration;

use jobscout::fetcher::{FetchError, PageFetcher, html_to_text};

mod test_helpers {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;

    pub fn pages_router() -> Router {
        Router::new()
            .route(
                "/page",
                get(|| async {
                    Html("<html><body><p>Open roles</p><script>var x = 1;</script></body></html>")
                }),
            )
            .route("/empty", get(|| async { "" }))
            .route(
                "/gone",
                get(|| async {
                    (
                        StatusCode::GONE,
                        Html(r#"<meta property="og:image" content="still-here.png">"#),
                    )
                }),
            )
            .route(
                "/forbidden",
                get(|| async {
                    (
                        StatusCode::FORBIDDEN,
                        Html("<p>Senior Rust Engineer, Berlin</p>"),
                    )
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "too late"
                }),
            )
    }

    pub async fn spawn(app: Router) -> Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Ok(format!("http://{addr}"))
    }
}

use test_helpers::*;

mod html_to_text_tests {
    use super::*;

    #[test]
    fn test_strips_script_and_style() {
        let html = b"<html><head><title>Acme</title><style>.x { color: red; }</style>\
            <script>var a = 1;</script></head>\
            <body><h1>Careers</h1><p>Rust Engineer</p><p>Remote</p></body></html>";
        let text = html_to_text(html).unwrap();
        assert_eq!(text, "Acme\nCareers\nRust Engineer\nRemote");
    }

    #[test]
    fn test_inline_elements_join_with_space() {
        let text = html_to_text(b"<p>Hello <b>World</b>!</p>").unwrap();
        assert_eq!(text, "Hello World !");
    }

    #[test]
    fn test_noscript_is_dropped() {
        let text = html_to_text(b"<body><noscript>enable js</noscript><div>jobs</div></body>").unwrap();
        assert_eq!(text, "jobs");
    }

    #[test]
    fn test_list_items_on_own_lines() {
        let text = html_to_text(b"<ul><li>Rust</li><li>Go</li></ul>").unwrap();
        assert_eq!(text, "Rust\nGo");
    }

    #[test]
    fn test_plain_text_input() {
        assert_eq!(html_to_text(b"just text").unwrap(), "just text");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(b"").unwrap(), "");
    }
}

#[tokio::test]
async fn test_load_text() -> Result<()> {
    let base = spawn(pages_router()).await?;
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;

    let url = format!("{base}/page");
    let page = fetcher.load_text(&url).await?;
    assert_eq!(page.source_url, url);
    assert_eq!(page.text, "Open roles");
    Ok(())
}

#[tokio::test]
async fn test_load_text_empty_body() -> Result<()> {
    let base = spawn(pages_router()).await?;
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;

    let err = fetcher.load_text(&format!("{base}/empty")).await.unwrap_err();
    assert!(matches!(err, FetchError::NoDocument { .. }));
    Ok(())
}

#[tokio::test]
async fn test_load_text_keeps_body_of_error_status() -> Result<()> {
    let base = spawn(pages_router()).await?;
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;

    let page = fetcher.load_text(&format!("{base}/forbidden")).await?;
    assert_eq!(page.text, "Senior Rust Engineer, Berlin");
    Ok(())
}

#[tokio::test]
async fn test_load_bytes_ignores_status() -> Result<()> {
    let base = spawn(pages_router()).await?;
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;

    let body = fetcher.load_bytes(&format!("{base}/gone")).await?;
    assert!(String::from_utf8(body)?.contains("still-here.png"));
    Ok(())
}

#[tokio::test]
async fn test_load_bytes_times_out() -> Result<()> {
    let base = spawn(pages_router()).await?;
    let fetcher = PageFetcher::new(Duration::from_millis(200))?;

    let err = fetcher.load_bytes(&format!("{base}/slow")).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host() -> Result<()> {
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;

    let err = fetcher.load_text("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, FetchError::Request { .. }));
    let err = fetcher.load_bytes("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, FetchError::Request { .. }));
    Ok(())
}

#[tokio::test]
async fn test_invalid_url_never_hits_network() -> Result<()> {
    let fetcher = PageFetcher::new(Duration::from_secs(10))?;
    let err = fetcher.load_text("file:///etc/passwd").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
    Ok(())
}
