use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use board_result::{
    configuration::ScraperSettings,
    services::{BrowserLauncher, BrowserSession, FetchError, ResultFetcher, RESULT_TABLE_SELECTOR},
    startup::run,
};
use url::Url;

pub const RESULTS_URL: &str = "http://results.test/";

/// What the simulated results site does once the form is submitted.
#[derive(Clone)]
pub enum MockPage {
    Renders(String),
    NeverRenders,
    LaunchFails,
}

#[derive(Default)]
struct ProbeState {
    launches: usize,
    releases: usize,
    actions: Vec<String>,
}

/// Shared view into every session a `MockLauncher` hands out.
#[derive(Clone, Default)]
pub struct BrowserProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl BrowserProbe {
    pub fn launches(&self) -> usize {
        self.state.lock().unwrap().launches
    }

    pub fn releases(&self) -> usize {
        self.state.lock().unwrap().releases
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    fn record(&self, action: String) {
        self.state.lock().unwrap().actions.push(action);
    }
}

pub struct MockLauncher {
    page: MockPage,
    probe: BrowserProbe,
}

impl MockLauncher {
    pub fn new(page: MockPage, probe: BrowserProbe) -> Self {
        MockLauncher { page, probe }
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, FetchError> {
        self.probe.state.lock().unwrap().launches += 1;

        if let MockPage::LaunchFails = self.page {
            return Err(FetchError::Browser("chromedriver unreachable".to_string()));
        }

        Ok(Box::new(MockSession {
            page: self.page.clone(),
            probe: self.probe.clone(),
        }))
    }
}

struct MockSession {
    page: MockPage,
    probe: BrowserProbe,
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn goto(&self, url: &Url, _settle_timeout: Duration) -> Result<(), FetchError> {
        self.probe.record(format!("goto {}", url));
        Ok(())
    }

    async fn select_option(&self, name: &str, value: &str) -> Result<(), FetchError> {
        self.probe.record(format!("select {}={}", name, value));
        Ok(())
    }

    async fn type_text(&self, name: &str, text: &str) -> Result<(), FetchError> {
        self.probe.record(format!("type {}={}", name, text));
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), FetchError> {
        self.probe.record(format!("wait {}", selector));

        match self.page {
            MockPage::NeverRenders if selector == RESULT_TABLE_SELECTOR => {
                Err(FetchError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                })
            }
            _ => Ok(()),
        }
    }

    async fn wait_until_clickable(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<(), FetchError> {
        self.probe.record(format!("ready {}", selector));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), FetchError> {
        self.probe.record(format!("click {}", selector));
        Ok(())
    }

    async fn page_source(&self) -> Result<String, FetchError> {
        match &self.page {
            MockPage::Renders(html) => Ok(html.clone()),
            _ => Err(FetchError::Browser("no page rendered".to_string())),
        }
    }

    async fn quit(self: Box<Self>) -> Result<(), FetchError> {
        self.probe.state.lock().unwrap().releases += 1;
        Ok(())
    }
}

pub fn scraper_settings() -> ScraperSettings {
    ScraperSettings {
        webdriver_url: "http://localhost:9515".to_string(),
        results_url: Url::parse(RESULTS_URL).unwrap(),
        exam: "ssc".to_string(),
        headless: true,
        settle_timeout_secs: 1,
        result_timeout_secs: 1,
        settle_delay_millis: 0,
    }
}

pub fn mock_fetcher(page: MockPage) -> (ResultFetcher, BrowserProbe) {
    let probe = BrowserProbe::default();
    let launcher = MockLauncher::new(page, probe.clone());

    (
        ResultFetcher::new(Arc::new(launcher), scraper_settings()),
        probe,
    )
}

/// Renders a page shaped like the site's result view.
pub fn result_page(name: &str, gpa: &str, result: &str, subjects: &[(&str, &str, &str)]) -> String {
    let rows: String = subjects
        .iter()
        .map(|(code, subject, grade)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                code, subject, grade
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <table class="black12">
            <tr><td>Roll No</td><td>123456</td><td>Name</td><td>{name}</td></tr>
            <tr><td>Result</td><td>{result}</td><td>GPA</td><td>{gpa}</td></tr>
        </table>
        <table class="black12">
            <tr><td>Code</td><td>Subject</td><td>Grade</td></tr>
            {rows}
        </table>
        </body></html>"#
    )
}

pub fn dhaka_page() -> String {
    result_page(
        "MD. RAHIM UDDIN",
        "5.00",
        "PASSED",
        &[
            ("101", "BANGLA", "A+"),
            ("107", "ENGLISH", "A+"),
            ("109", "MATHEMATICS", "A"),
        ],
    )
}

pub struct TestApp {
    pub address: String,
    pub probe: BrowserProbe,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_result(&self, query: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/result?{}", self.address, query))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app(page: MockPage) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let (fetcher, probe) = mock_fetcher(page);
    let server = run(listener, fetcher).expect("Failed to start server");
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        probe,
        api_client: reqwest::Client::new(),
    }
}
