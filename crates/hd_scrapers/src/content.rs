use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Node};
use hd_core::{DigestConfig, Result};

/// Subtrees that never carry article text.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "form", "iframe", "noscript",
];

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Readable text of the page at `url`, or an empty string when it can't be had
    async fn fetch_content(&self, url: &str) -> String;
}

/// Visible text of an HTML document, whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let stripped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| STRIPPED_TAGS.contains(&el.name()))
        });
        if stripped {
            continue;
        }
        text.push_str(chunk);
        text.push(' ');
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    client: Client,
}

impl HttpContentFetcher {
    pub fn new(config: &DigestConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            tracing::debug!("{} returned {}", url, response.status());
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch_content(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(Some(html)) => visible_text(&html),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Failed to fetch content for {}: {}", url, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::spawn_server;
    use axum::{http::StatusCode as AxumStatus, response::Html as AxumHtml, routing::get, Router};

    const PAGE: &str = r#"<html>
        <head><title>Post</title><style>body { color: red }</style></head>
        <body>
            <header><a href="/">Home</a></header>
            <nav><ul><li>Pricing</li><li>Blog</li></ul></nav>
            <article>
                <h1>Zero-copy   parsing</h1>
                <p>Rust makes
                   it easy.</p>
                <script>track("visit")</script>
            </article>
            <aside>Related posts</aside>
            <form><input name="q"><button>Search</button></form>
            <footer>© 2024</footer>
        </body>
    </html>"#;

    #[test]
    fn test_visible_text_strips_chrome() {
        assert_eq!(visible_text(PAGE), "Post Zero-copy parsing Rust makes it easy.");
    }

    #[test]
    fn test_visible_text_of_plain_fragment() {
        assert_eq!(visible_text("<p>one</p><p>two</p>"), "one two");
        assert_eq!(visible_text(""), "");
    }

    #[tokio::test]
    async fn test_fetch_content() {
        let app = Router::new()
            .route("/post", get(|| async { AxumHtml(PAGE) }))
            .route("/gone", get(|| async { (AxumStatus::NOT_FOUND, "missing") }));
        let base = spawn_server(app).await;
        let fetcher = HttpContentFetcher::new(&DigestConfig::default()).unwrap();

        assert_eq!(
            fetcher.fetch_content(&format!("{}post", base)).await,
            "Post Zero-copy parsing Rust makes it easy."
        );
        assert_eq!(fetcher.fetch_content(&format!("{}gone", base)).await, "");
        assert_eq!(fetcher.fetch_content("http://127.0.0.1:1/unreachable").await, "");
    }
}
