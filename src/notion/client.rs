// Notion API HTTP client.
// Handles authentication, versioning headers, and response status mapping.

use reqwest::{
    Client, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;

use crate::error::{NotaError, Result};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client with bearer authentication.
pub struct NotionClient {
    client: Client,
}

impl NotionClient {
    /// Create a new Notion client with the given integration token.
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| NotaError::Other(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(NotaError::Api)?;

        Ok(Self { client })
    }

    /// Make a GET request to the Notion API.
    pub(crate) async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", NOTION_API_BASE, endpoint);
        let response = self.client.get(&url).send().await.map_err(NotaError::Api)?;

        self.check_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post(&self, endpoint: &str, body: &Value) -> Result<Response> {
        let url = format!("{}{}", NOTION_API_BASE, endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(NotaError::Api)?;

        self.check_response(response).await
    }

    /// POST with an explicit Notion-Version header, for endpoints that need
    /// a newer API version than the default (page positioning).
    pub(crate) async fn post_with_version(
        &self,
        endpoint: &str,
        body: &Value,
        version: &str,
    ) -> Result<Response> {
        let url = format!("{}{}", NOTION_API_BASE, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Notion-Version", version)
            .json(body)
            .send()
            .await
            .map_err(NotaError::Api)?;

        self.check_response(response).await
    }

    /// Make a PATCH request with a JSON body.
    pub(crate) async fn patch(&self, endpoint: &str, body: &Value) -> Result<Response> {
        let url = format!("{}{}", NOTION_API_BASE, endpoint);
        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(NotaError::Api)?;

        self.check_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", NOTION_API_BASE, endpoint);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(NotaError::Api)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(NotaError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(NotaError::NotFound(url))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .map(|s| format!("{}s", s))
                    .unwrap_or_else(|| "unknown".to_string());
                Err(NotaError::RateLimited { retry_after })
            }
            status => Err(NotaError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
