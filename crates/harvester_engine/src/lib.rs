//! Harvester engine: navigation, discovery, extraction and persistence.
mod discover;
mod extract;
mod filename;
mod harvester;
mod navigator;
mod operator;
mod persist;
mod settings;
mod static_page;
mod types;

#[cfg(feature = "chromium")]
mod chromium;

#[cfg(feature = "chromium")]
pub use chromium::ChromiumNavigator;
pub use discover::discover;
pub use extract::ContentExtractor;
pub use filename::{record_filename, sanitize_title};
pub use harvester::Harvester;
pub use navigator::{select_elements, Element, NavError, Navigator, WAIT_POLL_INTERVAL};
pub use operator::{AutoConfirm, Checkpoint, Operator};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, RecordWriter};
pub use settings::{BrowserOptions, HarvestSettings, Pacing, Selectors};
pub use static_page::StaticNavigator;
pub use types::{Article, ArticleStub, Extraction, FailureKind, HarvestError};
