use std::time::Duration;

use anyhow::{Context as _, anyhow};
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER};
use url::Url;

/// Downloads the page under replay. One document per run, so no pooling
/// beyond what reqwest does itself.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build reqwest client")?;
        Ok(Self { client })
    }

    /// GET the page and decode it as UTF-8, retrying briefly when the host
    /// throttles.
    pub async fn fetch_page(&self, url: &Url) -> anyhow::Result<String> {
        let (bytes, headers) = self.get_bytes(url).await?;

        if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !content_type.to_ascii_lowercase().contains("html") {
                tracing::warn!(%url, content_type, "page does not look like html");
            }
        }

        let text = String::from_utf8(bytes.to_vec())
            .with_context(|| format!("page at {} is not valid utf-8", url))?;
        tracing::debug!(%url, bytes = text.len(), "fetched page");
        Ok(text)
    }

    async fn get_bytes(&self, url: &Url) -> anyhow::Result<(Bytes, HeaderMap)> {
        let mut backoff = Duration::from_millis(250);
        let max_attempts = 4usize;

        for attempt in 1..=max_attempts {
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {}", url))?;

            let status = resp.status();
            let headers = resp.headers().clone();

            if status.is_success() {
                let bytes = resp.bytes().await.context("read response body")?;
                return Ok((bytes, headers));
            }

            if status.as_u16() == 429 || status.as_u16() == 503 {
                let wait = retry_after_duration(&headers).unwrap_or(backoff);
                tracing::warn!(
                    %status,
                    attempt,
                    wait_ms = wait.as_millis(),
                    "throttled; backing off"
                );
                tokio::time::sleep(wait).await;
                backoff = (backoff * 2).min(Duration::from_secs(10));
                continue;
            }

            return Err(anyhow!("GET {} failed with status {}", url, status));
        }

        Err(anyhow!("GET {} failed after retries", url))
    }
}

fn retry_after_duration(headers: &HeaderMap) -> Option<Duration> {
    let v = headers.get(RETRY_AFTER)?;
    let s = v.to_str().ok()?.trim();
    let seconds: u64 = s.parse().ok()?;
    Some(Duration::from_secs(seconds))
}
