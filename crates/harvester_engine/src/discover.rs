use std::collections::HashSet;

use engine_logging::{engine_info, engine_warn};
use url::Url;

use crate::navigator::{Element, NavError, Navigator};
use crate::{ArticleStub, HarvestError, HarvestSettings};

enum Candidate {
    Accepted { title: String, url: Url },
    /// Not an article link at all; dropped silently.
    Unrelated,
    /// Looked like an article link but lacked a usable title or URL.
    Rejected(String),
}

/// Reads the catalog page the navigator is on and returns article stubs in
/// document order, with dense ids.
pub async fn discover(
    navigator: &mut dyn Navigator,
    settings: &HarvestSettings,
) -> Result<Vec<ArticleStub>, HarvestError> {
    let selectors = &settings.selectors;
    navigator
        .wait_until_present(&selectors.catalog_container, settings.discovery_timeout)
        .await
        .map_err(|err| match err {
            NavError::Timeout { waited, .. } => HarvestError::DiscoveryTimeout {
                selector: selectors.catalog_container.clone(),
                waited,
            },
            other => HarvestError::Catalog(other),
        })?;

    let base = navigator
        .current_url()
        .await
        .map_err(HarvestError::Catalog)?;
    let links = navigator
        .find_elements(&selectors.catalog_link)
        .await
        .map_err(HarvestError::Catalog)?;

    let mut stubs = Vec::new();
    let mut seen_titles = HashSet::new();
    for link in &links {
        match classify(link, &base, settings) {
            Candidate::Accepted { title, url } => {
                if !seen_titles.insert(title.clone()) {
                    engine_warn!("Dropping duplicate catalog title {:?} -> {}", title, url);
                    continue;
                }
                engine_info!("Found: {} -> {}", title, url);
                stubs.push(ArticleStub {
                    id: stubs.len(),
                    title,
                    url: url.to_string(),
                });
            }
            Candidate::Unrelated => {}
            Candidate::Rejected(reason) => {
                engine_warn!("Error processing catalog entry: {}", reason);
            }
        }
    }

    engine_info!("Total articles found: {}", stubs.len());
    Ok(stubs)
}

fn classify(link: &Element, base: &Url, settings: &HarvestSettings) -> Candidate {
    let title = match link.select_text(&settings.selectors.title) {
        Ok(Some(title)) => title,
        Ok(None) => return Candidate::Unrelated,
        Err(err) => return Candidate::Rejected(err.to_string()),
    };
    let href = link.attr("href").unwrap_or_default();
    let href = href.trim();
    if href.is_empty() {
        return Candidate::Rejected(format!("entry {title:?} has an empty url"));
    }
    let url = match base.join(href) {
        Ok(url) => url,
        Err(err) => {
            return Candidate::Rejected(format!("entry {title:?}: bad href {href:?}: {err}"))
        }
    };
    // Articles live on the catalog's own site.
    if url.origin() != base.origin() || !url.path().starts_with(&settings.article_path_prefix) {
        return Candidate::Unrelated;
    }
    if title.is_empty() {
        return Candidate::Rejected(format!("entry {url} has an empty title"));
    }
    Candidate::Accepted { title, url }
}
