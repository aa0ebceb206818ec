//! Navigator over server-rendered HTML: fetch with reqwest, query with scraper.
use std::time::Duration;

use engine_logging::engine_debug;
use url::Url;

use crate::navigator::{select_elements, Element, NavError, Navigator};

struct LoadedPage {
    url: Url,
    body: String,
}

/// Navigator for catalogs and articles that render without JavaScript.
///
/// Each `navigate` replaces the current document; queries run against the
/// last successfully loaded one.
pub struct StaticNavigator {
    client: reqwest::Client,
    request_timeout: Duration,
    page: Option<LoadedPage>,
}

impl StaticNavigator {
    pub fn new(request_timeout: Duration) -> Result<Self, NavError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| NavError::Network(err.to_string()))?;
        Ok(Self {
            client,
            request_timeout,
            page: None,
        })
    }

    fn map_reqwest_error(&self, url: &str, err: reqwest::Error) -> NavError {
        if err.is_timeout() {
            return NavError::Timeout {
                what: format!("response from {url}"),
                waited: self.request_timeout,
            };
        }
        NavError::Network(err.to_string())
    }
}

#[async_trait::async_trait]
impl Navigator for StaticNavigator {
    async fn navigate(&mut self, url: &str) -> Result<(), NavError> {
        let parsed = Url::parse(url).map_err(|err| NavError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        // A failed navigation leaves no stale document behind.
        self.page = None;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(NavError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|err| self.map_reqwest_error(url, err))?;
        engine_debug!("Loaded {} ({} bytes)", final_url, body.len());

        self.page = Some(LoadedPage {
            url: final_url,
            body,
        });
        Ok(())
    }

    async fn current_url(&mut self) -> Result<Url, NavError> {
        self.page
            .as_ref()
            .map(|page| page.url.clone())
            .ok_or(NavError::NoPage)
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Element>, NavError> {
        let page = self.page.as_ref().ok_or(NavError::NoPage)?;
        select_elements(&page.body, selector)
    }

    async fn shutdown(&mut self) -> Result<(), NavError> {
        self.page = None;
        Ok(())
    }
}
