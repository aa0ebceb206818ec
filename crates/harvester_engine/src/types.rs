use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::navigator::NavError;
use crate::persist::PersistError;

/// A discovered article's identity before its content is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleStub {
    /// 0-based position among accepted catalog entries.
    pub id: usize,
    pub title: String,
    /// Absolute URL.
    pub url: String,
}

impl ArticleStub {
    pub fn with_content(&self, content: String) -> Article {
        Article {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            content: Some(content),
        }
    }
}

/// The persisted record. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: usize,
    pub title: String,
    pub url: String,
    pub content: Option<String>,
}

/// Classification of a single extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Raw outer markup of the authoritative content block.
    Content(String),
    /// The page is an out-of-domain article type.
    Skip,
    Failure(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    ContentNotFound,
    Unknown(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout waiting for content"),
            FailureKind::ContentNotFound => write!(f, "content block not found"),
            FailureKind::Unknown(message) => write!(f, "{message}"),
        }
    }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("catalog container {selector:?} did not appear within {waited:?}")]
    DiscoveryTimeout { selector: String, waited: Duration },
    #[error("catalog page unavailable: {0}")]
    Catalog(NavError),
    #[error("output directory unusable: {0}")]
    OutputDir(PersistError),
    #[error("browser session failed to start: {0}")]
    Session(NavError),
}
