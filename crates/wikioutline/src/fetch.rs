use crate::prelude::*;
use std::time::{Duration, Instant};
use wikioutline_core::wiki::{article_url, classify_status, UpstreamStatus};

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct FetchedArticle {
    pub url: String,
    pub html: String,
    pub fetch_time_ms: u64,
}

/// Client for the article pages of one Wikipedia edition
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn url_for(&self, subject: &str) -> String {
        article_url(&self.base_url, subject)
    }

    /// Fetch the article HTML for a subject
    ///
    /// A 404 maps to [`Error::NotFound`], any other non-2xx status to
    /// [`Error::UpstreamHttp`], and transport failures (timeouts included)
    /// to [`Error::Network`]. Nothing is retried.
    pub async fn fetch_article(&self, subject: &str) -> std::result::Result<FetchedArticle, Error> {
        let url = self.url_for(subject);
        let start = Instant::now();

        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        match classify_status(status.as_u16()) {
            UpstreamStatus::Success => {}
            UpstreamStatus::NotFound => {
                return Err(Error::NotFound {
                    subject: subject.to_string(),
                    url,
                })
            }
            UpstreamStatus::HttpError => {
                return Err(Error::UpstreamHttp(format!("{status} for url: {url}")))
            }
        }

        let html = response.text().await.map_err(network_error)?;
        let fetch_time_ms = elapsed_ms(start.elapsed());
        log::debug!("Fetched {} bytes from {url} in {fetch_time_ms} ms", html.len());

        Ok(FetchedArticle {
            url,
            html,
            fetch_time_ms,
        })
    }
}

fn network_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Network(format!("{err} (timed out)"))
    } else {
        Error::Network(err.to_string())
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
