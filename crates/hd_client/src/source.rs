use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use hd_core::Digest;
use crate::error::ClientError;

pub const DIGEST_ENDPOINT: &str = "/api/scrape_and_summarize";

#[async_trait]
pub trait DigestSource: Send + Sync {
    /// Issues one request for the digest
    async fn fetch_digest(&self) -> Result<Digest, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpDigestSource {
    client: Client,
    endpoint: Url,
}

impl HttpDigestSource {
    pub fn new(server: &str) -> Result<Self, ClientError> {
        Self::with_client(server, Client::new())
    }

    pub fn with_client(server: &str, client: Client) -> Result<Self, ClientError> {
        let endpoint = Url::parse(server)?.join(DIGEST_ENDPOINT)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DigestSource for HttpDigestSource {
    async fn fetch_digest(&self) -> Result<Digest, ClientError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
