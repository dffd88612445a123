use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thirtyfour::{
    components::SelectElement, error::WebDriverResult, prelude::ElementQueryable, By,
    ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement,
};
use tokio::time::{sleep, Instant};
use url::Url;

use crate::configuration::ScraperSettings;

use super::{BrowserLauncher, BrowserSession, FetchError};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

// Resource count stands in for network activity; WebDriver has no idle signal.
const PAGE_STATE_SCRIPT: &str = r#"
    return {
        readyState: document.readyState,
        resources: performance.getEntriesByType('resource').length
    };
"#;

#[derive(Deserialize)]
struct PageState {
    #[serde(rename = "readyState")]
    ready_state: String,
    resources: u64,
}

pub struct DroidLauncher {
    webdriver_url: String,
    headless: bool,
}

impl DroidLauncher {
    pub fn new(settings: &ScraperSettings) -> Self {
        DroidLauncher {
            webdriver_url: settings.webdriver_url.clone(),
            headless: settings.headless,
        }
    }
}

#[async_trait]
impl BrowserLauncher for DroidLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, FetchError> {
        let droid = Droid::new(&self.webdriver_url, self.headless)
            .await
            .map_err(FetchError::Launch)?;

        Ok(Box::new(droid))
    }
}

/// Chrome session driven over WebDriver.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(webdriver_url: &str, headless: bool) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
        }
        caps.set_no_sandbox()?;
        caps.add_arg("--disable-setuid-sandbox")?;
        caps.set_disable_dev_shm_usage()?;

        let driver = WebDriver::new(webdriver_url, caps).await?;

        Ok(Droid { driver })
    }

    async fn find(&self, selector: &str) -> WebDriverResult<WebElement> {
        self.driver.find(By::Css(selector)).await
    }
}

/// Turns the outcome of a bounded element wait into a `FetchError::Timeout` when nothing matched.
fn found_or_timeout(found: bool, selector: &str, timeout: Duration) -> Result<(), FetchError> {
    match found {
        true => Ok(()),
        false => Err(FetchError::Timeout {
            selector: selector.to_string(),
            timeout,
        }),
    }
}

#[async_trait]
impl BrowserSession for Droid {
    async fn goto(&self, url: &Url, settle_timeout: Duration) -> Result<(), FetchError> {
        self.driver.goto(url.as_str()).await?;

        let started = Instant::now();
        let mut last_resources = None;

        loop {
            let state: PageState = self
                .driver
                .execute(PAGE_STATE_SCRIPT, Vec::new())
                .await?
                .convert()?;

            if state.ready_state == "complete" && last_resources == Some(state.resources) {
                return Ok(());
            }
            last_resources = Some(state.resources);

            if started.elapsed() >= settle_timeout {
                return Err(FetchError::NotSettled(settle_timeout));
            }
            sleep(SETTLE_POLL_INTERVAL).await;
        }
    }

    async fn select_option(&self, name: &str, value: &str) -> Result<(), FetchError> {
        let element = self.find(&format!("select[name='{}']", name)).await?;
        SelectElement::new(&element)
            .await?
            .select_by_value(value)
            .await?;

        Ok(())
    }

    async fn type_text(&self, name: &str, text: &str) -> Result<(), FetchError> {
        let element = self.find(&format!("input[name='{}']", name)).await?;
        element.send_keys(text).await?;

        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), FetchError> {
        let found = self
            .driver
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .exists()
            .await?;

        found_or_timeout(found, selector, timeout)
    }

    async fn wait_until_clickable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), FetchError> {
        let clickable = self
            .driver
            .query(By::Css(selector))
            .and_clickable()
            .wait(timeout, POLL_INTERVAL)
            .exists()
            .await?;

        found_or_timeout(clickable, selector, timeout)
    }

    async fn click(&self, selector: &str) -> Result<(), FetchError> {
        self.find(selector).await?.click().await?;

        Ok(())
    }

    async fn page_source(&self) -> Result<String, FetchError> {
        Ok(self.driver.source().await?)
    }

    async fn quit(self: Box<Self>) -> Result<(), FetchError> {
        self.driver.quit().await?;

        Ok(())
    }
}
