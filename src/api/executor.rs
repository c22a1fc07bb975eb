use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::FetchConfig;
use crate::models::{Envelope, Method, RequestProps};

use super::client::FetchResult;
use super::error::FetchError;
use super::transport::{HttpRequest, Transport};
use super::url::build_url;

/// Issues requests described by [`RequestProps`] and normalizes the outcome.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    config: Arc<FetchConfig>,
}

impl<T> From<FetchResult<T>> for Envelope<T> {
    fn from(result: FetchResult<T>) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(error) => Envelope::failure(error.into_envelope_error()),
        }
    }
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, config: FetchConfig) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// GET without a payload, parsing the response as JSON.
    pub async fn fetch_json(&self, props: RequestProps) -> Envelope<Value> {
        self.try_fetch_json(props).await.into()
    }

    /// Send `props.body` as JSON and parse the response as JSON.
    pub async fn fetch_json_with_body(&self, method: Method, props: RequestProps) -> Envelope<Value> {
        self.try_fetch_json_with_body(method, props).await.into()
    }

    /// GET without a payload, returning the response body as text.
    pub async fn fetch_text(&self, props: RequestProps) -> Envelope<String> {
        self.try_fetch_text(props).await.into()
    }

    pub async fn try_fetch_json(&self, props: RequestProps) -> FetchResult<Value> {
        let body = self.dispatch(Method::Get, props, false).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn try_fetch_json_with_body(
        &self,
        method: Method,
        props: RequestProps,
    ) -> FetchResult<Value> {
        let body = self.dispatch(method, props, true).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn try_fetch_text(&self, props: RequestProps) -> FetchResult<String> {
        self.dispatch(Method::Get, props, false).await
    }

    /// Resolve props, send the request and return the raw body of a
    /// successful response.
    async fn dispatch(
        &self,
        method: Method,
        props: RequestProps,
        include_body: bool,
    ) -> FetchResult<String> {
        let resolved = props.resolve(&self.config.defaults());
        let url = build_url(
            &self.config,
            &resolved.route,
            resolved.query.as_ref(),
            resolved.service,
            &resolved.api_version,
        );

        let mut request = HttpRequest::new(method, url);
        if include_body {
            // A missing body is sent as JSON null.
            request = request.with_body(resolved.body.unwrap_or(Value::Null));
        }

        let span = tracing::info_span!(
            "fetch",
            request_id = %Uuid::new_v4(),
            method = %method,
            service = %resolved.service,
        );

        async move {
            tracing::debug!(url = %request.url, "sending request");

            let response = self.transport.send(request).await.map_err(|e| {
                tracing::warn!(error = %e, "request failed");
                e
            })?;

            if !response.is_success() {
                tracing::warn!(status = response.status, "non-success response");
                let parsed: Value = serde_json::from_str(&response.body)?;
                return Err(FetchError::Status {
                    status: response.status,
                    error: parsed.get("error").cloned().unwrap_or(Value::Null),
                });
            }

            tracing::debug!(status = response.status, "request succeeded");
            Ok(response.body)
        }
        .instrument(span)
        .await
    }
}
