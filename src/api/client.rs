use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::error::FetchError;
use super::transport::{HttpRequest, HttpResponse, Transport};

pub type FetchResult<T> = Result<T, FetchError>;

/// reqwest-backed [`Transport`].
#[derive(Clone, Default)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> FetchResult<Self> {
        // Deadlines are enforced by the timeout racer, not the client.
        let client = Client::builder().build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: HttpRequest) -> FetchResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
