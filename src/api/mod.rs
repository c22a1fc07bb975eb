pub mod client;
pub mod error;
pub mod executor;
pub mod fetcher;
pub mod timeout;
pub mod transport;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, FetchResult};
pub use error::FetchError;
pub use executor::Executor;
pub use fetcher::Fetcher;
pub use timeout::{with_timeout, DEFAULT_TIMEOUT};
pub use transport::{HttpRequest, HttpResponse, Transport};
pub use url::build_url;
