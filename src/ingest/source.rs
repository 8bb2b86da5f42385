use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Provider of the raw table text.
///
/// `fetch` is called exactly once per load. A failure is fatal: the caller
/// surfaces it and nothing retries.
pub trait DataSource {
    fn describe(&self) -> String;

    fn fetch(&mut self) -> ChartResult<String>;
}

/// Table text that is already in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl DataSource for TextSource {
    fn describe(&self) -> String {
        format!("in-memory table ({} bytes)", self.text.len())
    }

    fn fetch(&mut self) -> ChartResult<String> {
        Ok(self.text.clone())
    }
}

/// Table read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> ChartResult<String> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            ChartError::SourceUnavailable(format!("{}: {err}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), bytes = text.len(), "read source file");
        Ok(text)
    }
}

/// Table fetched with a single blocking HTTP GET (no timeout, no retry).
#[cfg(feature = "http-source")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http-source")]
impl HttpSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http-source")]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&mut self) -> ChartResult<String> {
        let unavailable =
            |err: reqwest::Error| ChartError::SourceUnavailable(format!("{}: {err}", self.url));
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(unavailable)?;
        let text = client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(unavailable)?;
        debug!(url = %self.url, bytes = text.len(), "fetched source table");
        Ok(text)
    }
}
