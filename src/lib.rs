//! HTTP fetch helpers: URL construction from a service selector and route,
//! JSON/text request execution and a timeout race, all reporting through a
//! uniform [`Envelope`].

pub mod api;
pub mod config;
pub mod logging;
pub mod models;

pub use api::{Fetcher, FetchError, Transport};
pub use config::FetchConfig;
pub use models::{Envelope, Method, Query, RequestProps, Service};
