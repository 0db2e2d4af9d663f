use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the reference table over http(s) with a single GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ReferenceSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn read_table(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        let body = response.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
    }
}
