#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Once;

use harvester_engine::{select_elements, Element, NavError, Navigator};
use url::Url;

pub const CATALOG_URL: &str = "https://docs.example.com/pages/";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// In-memory site: URL -> HTML, queried with the same selector engine as the
/// static navigator.
#[derive(Default)]
pub struct FixtureNavigator {
    pages: HashMap<String, String>,
    unreachable: HashSet<String>,
    /// Selectors whose matches cannot be read back, as when a browser node
    /// has no markup.
    unreadable: HashSet<String>,
    current: Option<String>,
    pub visits: Vec<String>,
    pub shutdowns: usize,
}

impl FixtureNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn unreadable(mut self, selector: &str) -> Self {
        self.unreadable.insert(selector.to_string());
        self
    }

    /// Article URLs visited after the catalog, in order.
    pub fn article_visits(&self) -> Vec<&str> {
        self.visits
            .iter()
            .map(String::as_str)
            .filter(|url| *url != CATALOG_URL)
            .collect()
    }
}

#[async_trait::async_trait]
impl Navigator for FixtureNavigator {
    async fn navigate(&mut self, url: &str) -> Result<(), NavError> {
        self.visits.push(url.to_string());
        self.current = None;
        if self.unreachable.contains(url) {
            return Err(NavError::Network(format!("connection reset by {url}")));
        }
        if !self.pages.contains_key(url) {
            return Err(NavError::Http {
                url: url.to_string(),
                status: 404,
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn current_url(&mut self) -> Result<Url, NavError> {
        let current = self.current.as_deref().ok_or(NavError::NoPage)?;
        Url::parse(current).map_err(|err| NavError::InvalidUrl {
            url: current.to_string(),
            message: err.to_string(),
        })
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Element>, NavError> {
        let current = self.current.as_ref().ok_or(NavError::NoPage)?;
        if self.unreadable.contains(selector) {
            return Err(NavError::Browser(format!(
                "node matching {selector:?} has no outer HTML"
            )));
        }
        select_elements(&self.pages[current], selector)
    }

    async fn shutdown(&mut self) -> Result<(), NavError> {
        self.shutdowns += 1;
        Ok(())
    }
}

/// Catalog page listing `(href, title)` entries under `#categories`.
pub fn catalog(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(href, title)| {
            format!(r#"<li><a href="{href}"><span class="article-title">{title}</span></a></li>"#)
        })
        .collect();
    format!(r#"<html><body><ul id="categories">{items}</ul></body></html>"#)
}

/// Article page with the loading shell followed by the real content block.
pub fn article(body: &str) -> String {
    format!(
        r#"<html><body><div class="content_container">
            <div id="content_block">Loading...</div>
            <div id="content_block"><p>{body}</p></div>
        </div></body></html>"#
    )
}

/// Article page flagged as an out-of-domain type, content present anyway.
pub fn unwanted_article() -> String {
    r#"<html><body><div class="content_container">
        <div class="unwanted-article-type">Redirect</div>
        <div id="content_block">Loading...</div>
        <div id="content_block"><p>redirect target</p></div>
    </div></body></html>"#
        .to_string()
}

/// Page that never renders the content container.
pub fn never_ready() -> String {
    "<html><body><p>still loading</p></body></html>".to_string()
}
