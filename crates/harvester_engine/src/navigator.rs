//! Browser-like navigation capability the harvester drives.
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tokio::time::{sleep, Instant};
use url::Url;

/// How often `wait_until_present` re-queries the page.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("invalid url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },
    #[error("http status {status} for {url}")]
    Http { url: String, status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("browser error: {0}")]
    Browser(String),
    #[error("no page loaded")]
    NoPage,
}

/// Snapshot of a matched DOM element, captured as its outer HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    outer_html: String,
}

impl Element {
    pub fn new(outer_html: impl Into<String>) -> Self {
        Self {
            outer_html: outer_html.into(),
        }
    }

    pub fn outer_html(&self) -> &str {
        &self.outer_html
    }

    pub fn into_outer_html(self) -> String {
        self.outer_html
    }

    /// Attribute of the element itself (not of its descendants).
    pub fn attr(&self, name: &str) -> Option<String> {
        let fragment = Html::parse_fragment(&self.outer_html);
        let own = fragment
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .next()?;
        own.value().attr(name).map(ToOwned::to_owned)
    }

    /// Whitespace-normalized text of the first descendant matching `selector`.
    pub fn select_text(&self, selector: &str) -> Result<Option<String>, NavError> {
        let selector = parse_selector(selector)?;
        let fragment = Html::parse_fragment(&self.outer_html);
        let text = fragment
            .select(&selector)
            .next()
            .map(|node| normalize_text(node.text()));
        Ok(text)
    }
}

/// Navigation primitives over one browser session.
///
/// All methods act on the single page the session currently shows, so calls
/// must not be interleaved across navigations.
#[async_trait::async_trait]
pub trait Navigator: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), NavError>;

    /// URL of the page currently shown, after redirects.
    async fn current_url(&mut self) -> Result<Url, NavError>;

    /// All elements matching a CSS selector, in document order.
    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Element>, NavError>;

    async fn find_element(&mut self, selector: &str) -> Result<Option<Element>, NavError> {
        Ok(self.find_elements(selector).await?.into_iter().next())
    }

    /// Polls until `selector` matches or `timeout` elapses.
    async fn wait_until_present(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, NavError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = self.find_element(selector).await? {
                return Ok(element);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(NavError::Timeout {
                    what: format!("selector {selector:?}"),
                    waited: timeout,
                });
            }
            sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    /// Releases the session. Calling it twice is harmless.
    async fn shutdown(&mut self) -> Result<(), NavError> {
        Ok(())
    }
}

/// Evaluates a CSS selector against a full HTML document.
pub fn select_elements(html: &str, selector: &str) -> Result<Vec<Element>, NavError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .map(|node| Element::new(node.html()))
        .collect())
}

fn parse_selector(selector: &str) -> Result<Selector, NavError> {
    Selector::parse(selector).map_err(|err| NavError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
