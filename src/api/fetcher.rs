use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::models::{Envelope, Method, RequestProps};

use super::client::{ApiClient, FetchResult};
use super::executor::Executor;
use super::timeout::with_timeout;
use super::transport::Transport;

/// Entry point: `get`, `post` and `text`, each raced against the timeout.
#[derive(Clone)]
pub struct Fetcher {
    executor: Executor,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        Ok(Self::with_transport(config, Arc::new(ApiClient::new()?)))
    }

    pub fn with_transport(config: FetchConfig, transport: Arc<dyn Transport>) -> Self {
        let timeout = config.timeout();
        Self {
            executor: Executor::new(transport, config),
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get(&self, props: RequestProps) -> Envelope<Value> {
        with_timeout(self.executor.try_fetch_json(props), self.timeout)
            .await
            .into()
    }

    pub async fn post(&self, props: RequestProps) -> Envelope<Value> {
        with_timeout(
            self.executor.try_fetch_json_with_body(Method::Post, props),
            self.timeout,
        )
        .await
        .into()
    }

    pub async fn text(&self, props: RequestProps) -> Envelope<String> {
        with_timeout(self.executor.try_fetch_text(props), self.timeout)
            .await
            .into()
    }
}
