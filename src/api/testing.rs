use async_trait::async_trait;
use std::sync::Mutex;

use super::client::FetchResult;
use super::error::FetchError;
use super::transport::{HttpRequest, HttpResponse, Transport};

pub enum Behavior {
    Respond(u16, &'static str),
    Fail(&'static str),
    Hang,
}

/// Scripted transport that records every request it receives.
pub struct FakeTransport {
    behavior: Behavior,
    seen: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> FetchResult<HttpResponse> {
        self.seen.lock().unwrap().push(request);

        match &self.behavior {
            Behavior::Respond(status, body) => Ok(HttpResponse::new(*status, *body)),
            Behavior::Fail(message) => Err(FetchError::Transport(message.to_string())),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
