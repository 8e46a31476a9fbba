use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::domain::host::{Host, HostsResponse};
use crate::errors::SourceError;

const HOSTS_PATH: &str = "api/v0/hosts";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Where host records come from.
///
/// An `Err` means the source could not be queried at all, which is distinct from an
/// empty `Ok`.
#[async_trait]
pub trait HostSource: Send + Sync {
    async fn find_hosts(&self) -> Result<Vec<Host>, SourceError>;

    async fn find_hosts_by_name(&self, name: &str) -> Result<Vec<Host>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct MackerelClient {
    client: Client,
    api_base: Url,
    api_key: String,
}

impl MackerelClient {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn hosts_url(&self, name: Option<&str>) -> Result<Url, SourceError> {
        let mut url = self.api_base.join(HOSTS_PATH)?;
        if let Some(name) = name {
            url.query_pairs_mut().append_pair("name", name);
        }
        Ok(url)
    }

    async fn get_hosts(&self, url: Url) -> Result<Vec<Host>, SourceError> {
        debug!(url = %url, "querying mackerel hosts");
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::api(status.as_u16(), error_message(status, message)));
        }

        let body = response.bytes().await?;
        let parsed: HostsResponse = serde_json::from_slice(&body)?;
        debug!(count = parsed.hosts.len(), "received mackerel hosts");
        Ok(parsed.hosts)
    }
}

fn error_message(status: StatusCode, body: String) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl HostSource for MackerelClient {
    async fn find_hosts(&self) -> Result<Vec<Host>, SourceError> {
        let url = self.hosts_url(None)?;
        self.get_hosts(url).await
    }

    async fn find_hosts_by_name(&self, name: &str) -> Result<Vec<Host>, SourceError> {
        let url = self.hosts_url(Some(name))?;
        self.get_hosts(url).await
    }
}
