pub mod envelope;
pub mod props;

pub use envelope::{Envelope, FETCH_TIMEOUT, INTERNAL_ERROR};
pub use props::{Method, PropsDefaults, Query, RequestProps, ResolvedProps, Service};
