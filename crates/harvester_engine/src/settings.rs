use std::path::PathBuf;
use std::time::Duration;

use harvester_core::Pace;

/// CSS selectors describing the target site's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Container that signals the catalog has rendered.
    pub catalog_container: String,
    /// Links inside the catalog that may point at articles.
    pub catalog_link: String,
    /// Title element inside a catalog link.
    pub title: String,
    /// Element that signals an article page has rendered.
    pub content_ready: String,
    /// Content blocks; the first match is the loading placeholder.
    pub content_block: String,
    /// Marker of an article type that is not harvested.
    pub unwanted_marker: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            catalog_container: "#categories".to_string(),
            catalog_link: "#categories a[href]".to_string(),
            title: "span.article-title".to_string(),
            content_ready: ".content_container".to_string(),
            content_block: "#content_block".to_string(),
            unwanted_marker: ".unwanted-article-type".to_string(),
        }
    }
}

/// Minimum spacing between requests to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub before_navigation: Duration,
    pub after_success: Duration,
    pub after_exclusion: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            before_navigation: Duration::ZERO,
            after_success: Duration::ZERO,
            after_exclusion: Duration::ZERO,
        }
    }

    pub fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::AfterSuccess => self.after_success,
            Pace::AfterExclusion => self.after_exclusion,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            before_navigation: Duration::from_millis(500),
            after_success: Duration::from_secs(1),
            after_exclusion: Duration::from_millis(500),
        }
    }
}

/// Launch options for the Chromium backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    /// Headed by default so the operator can sign in at the first checkpoint.
    pub headless: bool,
    pub args: Vec<String>,
    pub executable: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: false,
            args: vec![
                "--disable-gpu".to_string(),
                "--log-level=3".to_string(),
                "--silent".to_string(),
            ],
            executable: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    pub catalog_url: String,
    /// Path prefix an article link must resolve under.
    pub article_path_prefix: String,
    pub selectors: Selectors,
    pub discovery_timeout: Duration,
    pub content_timeout: Duration,
    /// Per-request timeout for the static navigator.
    pub request_timeout: Duration,
    pub pacing: Pacing,
    pub browser: BrowserOptions,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            catalog_url: "https://example.com/pages/".to_string(),
            article_path_prefix: "/pages/".to_string(),
            selectors: Selectors::default(),
            discovery_timeout: Duration::from_secs(10),
            content_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            pacing: Pacing::default(),
            browser: BrowserOptions::default(),
        }
    }
}
