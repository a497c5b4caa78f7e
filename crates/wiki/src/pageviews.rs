use anyhow::{Context, Result};
use chrono::{Days, Utc};
use reqwest::StatusCode;
use serde_json::Value;

const DEFAULT_API_URL: &str =
    "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article/en.wikipedia/all-access/user";
const VIEWS_WINDOW_DAYS: u64 = 365;

/// Wikimedia REST pageviews client. Like the query API, it requires an
/// identifying User-Agent.
#[derive(Clone)]
pub struct PageviewsClient {
    base_url: String,
    client: reqwest::Client,
}

impl PageviewsClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL.to_string(), user_agent)
    }

    pub fn with_base_url(base_url: String, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build pageviews HTTP client")?;
        Ok(Self { base_url, client })
    }

    /// Sum of daily views over the trailing 365 days. A 404 means the
    /// endpoint has no recorded views for the article, which is zero, not an
    /// error.
    pub async fn views_last_year(&self, title: &str) -> Result<u64> {
        let end = Utc::now().date_naive();
        let start = end - Days::new(VIEWS_WINDOW_DAYS);
        let article = urlencoding::encode(&title.replace(' ', "_")).into_owned();
        let url = format!(
            "{}/{}/daily/{}/{}",
            self.base_url,
            article,
            start.format("%Y%m%d00"),
            end.format("%Y%m%d00"),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send pageviews request")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(0);
        }
        if !response.status().is_success() {
            anyhow::bail!("Pageviews request failed: {}", response.status());
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse pageviews response")?;
        Ok(sum_views(&body))
    }
}

pub(crate) fn sum_views(body: &Value) -> u64 {
    body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["views"].as_u64())
                .sum()
        })
        .unwrap_or(0)
}
