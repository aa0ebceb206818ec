//! Navigator backed by a real Chromium instance over CDP.
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use url::Url;

use crate::navigator::{Element, NavError, Navigator};
use crate::settings::BrowserOptions;

/// Owns the browser process, its CDP event loop and the single page the run
/// works in.
///
/// Dropping the navigator stops the event loop; chromiumoxide kills the child
/// process when the `Browser` is dropped, so an unwinding run still releases
/// the browser. `shutdown` is the orderly path.
pub struct ChromiumNavigator {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromiumNavigator {
    pub async fn launch(options: &BrowserOptions) -> Result<Self, NavError> {
        let mut builder = BrowserConfig::builder().args(options.args.clone());
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &options.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(NavError::Browser)?;

        let (browser, mut events) = Browser::launch(config).await.map_err(browser_error)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(err) = event {
                    engine_debug!("CDP event loop stopped: {}", err);
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler.abort();
                return Err(browser_error(err));
            }
        };
        engine_info!(
            "Chromium session started ({})",
            if options.headless { "headless" } else { "headed" }
        );

        Ok(Self {
            browser,
            page,
            handler,
            closed: false,
        })
    }
}

#[async_trait::async_trait]
impl Navigator for ChromiumNavigator {
    async fn navigate(&mut self, url: &str) -> Result<(), NavError> {
        Url::parse(url).map_err(|err| NavError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        self.page.goto(url).await.map_err(browser_error)?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<Url, NavError> {
        let raw = self
            .page
            .url()
            .await
            .map_err(browser_error)?
            .ok_or(NavError::NoPage)?;
        Url::parse(&raw).map_err(|err| NavError::InvalidUrl {
            url: raw.clone(),
            message: err.to_string(),
        })
    }

    async fn find_elements(&mut self, selector: &str) -> Result<Vec<Element>, NavError> {
        let nodes = self
            .page
            .find_elements(selector)
            .await
            .map_err(browser_error)?;
        let mut elements = Vec::with_capacity(nodes.len());
        // Callers rely on match positions, so a node without markup is an
        // error rather than a gap.
        for node in nodes {
            let html = node
                .outer_html()
                .await
                .map_err(browser_error)?
                .ok_or_else(|| {
                    NavError::Browser(format!("node matching {selector:?} has no outer HTML"))
                })?;
            elements.push(Element::new(html));
        }
        Ok(elements)
    }

    async fn shutdown(&mut self) -> Result<(), NavError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let closed = self.browser.close().await.map(|_| ());
        if let Err(err) = self.browser.wait().await {
            engine_warn!("Chromium did not exit cleanly: {}", err);
        }
        self.handler.abort();
        engine_info!("Chromium session closed");
        closed.map_err(browser_error)
    }
}

impl Drop for ChromiumNavigator {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

fn browser_error(err: impl std::fmt::Display) -> NavError {
    NavError::Browser(err.to_string())
}
