use std::sync::Arc;

use uuid::Uuid;

use crate::{
    configuration::ScraperSettings,
    domain::{ResultQuery, ResultRecord},
};

use super::{extract_result, BrowserLauncher, BrowserSession, FetchError, RESULT_TABLE_SELECTOR};

const EXAM_SELECT_SELECTOR: &str = "select[name='exam']";
const SUBMIT_SELECTOR: &str = "input[type='submit']";

/// Fills the results form for one query and scrapes the rendered result.
pub struct ResultFetcher {
    launcher: Arc<dyn BrowserLauncher>,
    settings: ScraperSettings,
}

impl ResultFetcher {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, settings: ScraperSettings) -> Self {
        ResultFetcher { launcher, settings }
    }

    /// One scrape attempt in a fresh browser session. Once launched, the
    /// session is released whatever the outcome.
    pub async fn fetch(&self, query: &ResultQuery) -> Result<ResultRecord, FetchError> {
        let session_id = Uuid::new_v4();

        let session = self.launcher.launch().await.inspect_err(|e| {
            log::error!("[{}] Could not launch browser session: {}", session_id, e);
        })?;
        log::info!(
            "[{}] Launched browser session for {} roll {} ({})",
            session_id,
            query.board,
            query.roll,
            query.year
        );

        let outcome = self.scrape(session.as_ref(), query, session_id).await;

        match session.quit().await {
            Ok(()) => log::info!("[{}] Released browser session", session_id),
            Err(e) => log::error!(
                "[{}] Failed to release browser session: {:?}",
                session_id,
                e
            ),
        }

        if let Err(ref e) = outcome {
            log::error!("[{}] Scrape failed: {}", session_id, e);
        }

        outcome
    }

    async fn scrape(
        &self,
        session: &dyn BrowserSession,
        query: &ResultQuery,
        session_id: Uuid,
    ) -> Result<ResultRecord, FetchError> {
        let settle_timeout = self.settings.settle_timeout();

        session
            .goto(&self.settings.results_url, settle_timeout)
            .await?;
        session.wait_for(EXAM_SELECT_SELECTOR, settle_timeout).await?;

        session.select_option("exam", &self.settings.exam).await?;
        session.select_option("year", &query.year).await?;
        session.select_option("board", query.board.as_str()).await?;
        session.type_text("roll", &query.roll).await?;
        session.type_text("reg", &query.reg).await?;

        session
            .wait_until_clickable(SUBMIT_SELECTOR, settle_timeout)
            .await?;
        // The site's own scripts still touch the form after the submit button enables.
        tokio::time::sleep(self.settings.settle_delay()).await;

        session.click(SUBMIT_SELECTOR).await?;
        log::info!("[{}] Submitted result form", session_id);

        session
            .wait_for(RESULT_TABLE_SELECTOR, self.settings.result_timeout())
            .await?;

        let html = session.page_source().await?;

        Ok(extract_result(&html))
    }
}
