//! Competitor page scraping
//!
//! Failures never propagate: the caller gets a marker-prefixed message that is
//! safe to drop straight into a prompt.

use std::time::Duration;
use async_trait::async_trait;
use scraper::{Html, Node};
use tracing::{debug, warn};

use crate::error::GeneratorResult;
use crate::traits::ContentScraper;

/// Prefix of every scrape failure message
pub const SCRAPE_FAILURE_MARKER: &str = "Scrape failed:";

/// Maximum number of characters kept from a page
pub const MAX_EXTRACT_CHARS: usize = 5000;

/// Desktop browser user agent; some landing pages block obvious bots
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP scraper backed by reqwest and html5ever
pub struct RealContentScraper {
    client: reqwest::Client,
}

impl RealContentScraper {
    pub fn new() -> GeneratorResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(8))
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String, String> {
        let parsed = url::Url::parse(url.trim()).map_err(|e| format!("invalid URL ({e})"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme {}", parsed.scheme()));
        }

        let response = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    format!("timed out after {}s", timeout.as_secs())
                } else {
                    e.to_string()
                }
            })?;

        if !response.status().is_success() {
            // Error pages are still parsed; they sometimes carry useful copy
            debug!(status = %response.status(), "Competitor page returned non-success status");
        }

        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(extract_visible_text(&body))
    }
}

#[async_trait]
impl ContentScraper for RealContentScraper {
    async fn fetch(&self, url: &str, timeout: Duration) -> String {
        match self.fetch_text(url, timeout).await {
            Ok(text) => {
                debug!(url = url, chars = text.chars().count(), "Scraped competitor page");
                text
            }
            Err(reason) => {
                warn!(url = url, reason = %reason, "Competitor scrape failed");
                failure_message(&reason)
            }
        }
    }
}

/// Marker-prefixed failure message, stripped of characters that confuse a JSON-shaped prompt
pub fn failure_message(reason: &str) -> String {
    let sanitized: String = reason
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '`'))
        .collect();
    format!("{SCRAPE_FAILURE_MARKER} {sanitized}")
}

/// Visible text of an HTML document, one phrase per line, at most [`MAX_EXTRACT_CHARS`] characters
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let fragments: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|element| matches!(element.name(), "script" | "style"))
                });
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .collect();

    let joined = fragments.join(" ");
    let normalized = normalize_lines(&joined);
    truncate_chars(&normalized, MAX_EXTRACT_CHARS)
}

/// Strip every line, split mashed headlines on double spaces and drop blanks
fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
