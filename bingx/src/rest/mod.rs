pub mod endpoints;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::BingxConfig;
use crate::error::{BingxError, Result};
use crate::signing::signed_query;
use crate::types::ApiResponse;

const API_KEY_HEADER: &str = "X-BX-APIKEY";

#[derive(Debug, Clone)]
struct Credentials {
    api_key: String,
    api_secret: String,
}

/// HTTP client wrapper for the BingX swap REST API.
#[derive(Debug, Clone)]
pub struct BingxHttpClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl BingxHttpClient {
    pub fn new(config: &BingxConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let credentials = config.has_credentials().then(|| Credentials {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        });
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// GET a public JSON resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;
        Self::decode(resp).await
    }

    /// GET a private resource with a signed query string.
    pub async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let (url, api_key) = self.signed_url(path, params)?;
        debug!(path, "signed GET");
        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// POST to a private endpoint. Parameters travel in the signed query
    /// string and the body stays empty.
    pub async fn post_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let (url, api_key) = self.signed_url(path, params)?;
        debug!(path, "signed POST");
        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;
        Self::decode(resp).await
    }

    fn signed_url(&self, path: &str, params: &[(&str, String)]) -> Result<(String, &str)> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(BingxError::MissingCredentials)?;
        let timestamp = chrono::Utc::now().timestamp_millis();
        let query = signed_query(params, timestamp, &creds.api_secret)?;
        Ok((
            format!("{}{}?{}", self.base_url, path, query),
            creds.api_key.as_str(),
        ))
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<ApiResponse<T>> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BingxError::Http {
                status,
                message: body,
            });
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
