use std::time::Duration;

use engine_logging::engine_debug;
use tokio::time::sleep;

use crate::navigator::{NavError, Navigator};
use crate::{ArticleStub, Extraction, FailureKind, HarvestSettings, Selectors};

/// Visits one article page and classifies what it finds there.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selectors: Selectors,
    content_timeout: Duration,
    before_navigation: Duration,
}

impl ContentExtractor {
    pub fn new(settings: &HarvestSettings) -> Self {
        Self {
            selectors: settings.selectors.clone(),
            content_timeout: settings.content_timeout,
            before_navigation: settings.pacing.before_navigation,
        }
    }

    /// Never fails: navigation and query errors become `Extraction::Failure`.
    pub async fn extract(&self, navigator: &mut dyn Navigator, stub: &ArticleStub) -> Extraction {
        sleep(self.before_navigation).await;
        match self.try_extract(navigator, stub).await {
            Ok(extraction) => extraction,
            Err(NavError::Timeout { .. }) => Extraction::Failure(FailureKind::Timeout),
            Err(err) => Extraction::Failure(FailureKind::Unknown(err.to_string())),
        }
    }

    async fn try_extract(
        &self,
        navigator: &mut dyn Navigator,
        stub: &ArticleStub,
    ) -> Result<Extraction, NavError> {
        navigator.navigate(&stub.url).await?;
        navigator
            .wait_until_present(&self.selectors.content_ready, self.content_timeout)
            .await?;

        if navigator
            .find_element(&self.selectors.unwanted_marker)
            .await?
            .is_some()
        {
            return Ok(Extraction::Skip);
        }

        let blocks = navigator.find_elements(&self.selectors.content_block).await?;
        engine_debug!("{} content blocks at {}", blocks.len(), stub.url);
        // The first block is the loading shell; the second holds the article.
        Ok(match blocks.into_iter().nth(1) {
            Some(block) => Extraction::Content(block.into_outer_html()),
            None => Extraction::Failure(FailureKind::ContentNotFound),
        })
    }
}
