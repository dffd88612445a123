use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to launch browser session: {0}")]
    Launch(#[source] WebDriverError),
    #[error("Page did not settle within {0:?}")]
    NotSettled(Duration),
    #[error("Timed out after {timeout:?} waiting for `{selector}`")]
    Timeout { selector: String, timeout: Duration },
    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
    /// Failures of `BrowserLauncher` / `BrowserSession` implementations that are not
    /// backed by WebDriver and have no typed error of their own.
    #[error("{0}")]
    Browser(String),
}

/// Opens isolated browser sessions, one per scrape.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, FetchError>;
}

/// A single page context. Form controls are addressed by their `name` attribute,
/// everything else by CSS selector.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate and block until the page stops loading resources, bounded by `settle_timeout`.
    async fn goto(&self, url: &Url, settle_timeout: Duration) -> Result<(), FetchError>;

    async fn select_option(&self, name: &str, value: &str) -> Result<(), FetchError>;

    async fn type_text(&self, name: &str, text: &str) -> Result<(), FetchError>;

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), FetchError>;

    async fn wait_until_clickable(&self, selector: &str, timeout: Duration)
        -> Result<(), FetchError>;

    async fn click(&self, selector: &str) -> Result<(), FetchError>;

    async fn page_source(&self) -> Result<String, FetchError>;

    /// Ends the session and frees the browser process behind it.
    async fn quit(self: Box<Self>) -> Result<(), FetchError>;
}
