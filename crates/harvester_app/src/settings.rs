//! Optional RON settings file layered over the built-in site profile.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvester_engine::HarvestSettings;
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub catalog_url: Option<String>,
    pub article_path_prefix: Option<String>,
    pub discovery_timeout_ms: Option<u64>,
    pub content_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub selectors: SelectorsFile,
    pub pacing: PacingFile,
    pub browser: BrowserFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorsFile {
    pub catalog_container: Option<String>,
    pub catalog_link: Option<String>,
    pub title: Option<String>,
    pub content_ready: Option<String>,
    pub content_block: Option<String>,
    pub unwanted_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacingFile {
    pub before_navigation_ms: Option<u64>,
    pub after_success_ms: Option<u64>,
    pub after_exclusion_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserFile {
    pub headless: Option<bool>,
    pub args: Option<Vec<String>>,
    pub executable: Option<PathBuf>,
}

impl SettingsFile {
    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// Overwrites every field of `settings` this file sets.
    pub fn apply(self, settings: &mut HarvestSettings) {
        set(&mut settings.catalog_url, self.catalog_url);
        set(&mut settings.article_path_prefix, self.article_path_prefix);
        set_millis(&mut settings.discovery_timeout, self.discovery_timeout_ms);
        set_millis(&mut settings.content_timeout, self.content_timeout_ms);
        set_millis(&mut settings.request_timeout, self.request_timeout_ms);

        let selectors = &mut settings.selectors;
        set(&mut selectors.catalog_container, self.selectors.catalog_container);
        set(&mut selectors.catalog_link, self.selectors.catalog_link);
        set(&mut selectors.title, self.selectors.title);
        set(&mut selectors.content_ready, self.selectors.content_ready);
        set(&mut selectors.content_block, self.selectors.content_block);
        set(&mut selectors.unwanted_marker, self.selectors.unwanted_marker);

        let pacing = &mut settings.pacing;
        set_millis(&mut pacing.before_navigation, self.pacing.before_navigation_ms);
        set_millis(&mut pacing.after_success, self.pacing.after_success_ms);
        set_millis(&mut pacing.after_exclusion, self.pacing.after_exclusion_ms);

        let browser = &mut settings.browser;
        set(&mut browser.headless, self.browser.headless);
        set(&mut browser.args, self.browser.args);
        if self.browser.executable.is_some() {
            browser.executable = self.browser.executable;
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_millis(slot: &mut Duration, millis: Option<u64>) {
    set(slot, millis.map(Duration::from_millis));
}

/// Defaults, then the settings file, then command-line overrides.
pub fn resolve(cli: &Cli) -> anyhow::Result<HarvestSettings> {
    let mut settings = HarvestSettings::default();
    if let Some(path) = &cli.config {
        SettingsFile::load(path)?.apply(&mut settings);
    }
    if let Some(url) = &cli.catalog_url {
        settings.catalog_url = url.clone();
    }
    if cli.headless {
        settings.browser.headless = true;
    }
    Ok(settings)
}
