use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Backend host family a request targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    Proxy,
    Node,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Query parameters in insertion order.
///
/// Values are rendered with `to_string` and never percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query(Vec<(String, String)>);

/// Partial request descriptor; unset fields fall back to [`PropsDefaults`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestProps {
    pub route: Option<String>,
    pub query: Option<Query>,
    pub body: Option<Value>,
    pub api_version: Option<String>,
    pub service: Option<Service>,
    pub refresh_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropsDefaults {
    pub route: String,
    pub service: Service,
    pub api_version: String,
    pub refresh_interval_secs: u64,
}

/// Request descriptor after defaults have been merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProps {
    pub route: String,
    pub query: Option<Query>,
    pub body: Option<Value>,
    pub api_version: String,
    pub service: Service,
    pub refresh_interval_secs: u64,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `k1=v1&k2=v2` with values copied verbatim.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.push(key, value);
        }
        query
    }
}

impl RequestProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_route(route: impl Into<String>) -> Self {
        Self::new().with_route(route)
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.service = Some(service);
        self
    }

    pub fn with_refresh_interval(mut self, seconds: u64) -> Self {
        self.refresh_interval_secs = Some(seconds);
        self
    }

    /// Merge with the defaults table. Fields with no default (query, body)
    /// stay unset when the caller leaves them out.
    pub fn resolve(self, defaults: &PropsDefaults) -> ResolvedProps {
        ResolvedProps {
            route: self.route.unwrap_or_else(|| defaults.route.clone()),
            query: self.query,
            body: self.body,
            api_version: self
                .api_version
                .unwrap_or_else(|| defaults.api_version.clone()),
            service: self.service.unwrap_or(defaults.service),
            refresh_interval_secs: self
                .refresh_interval_secs
                .unwrap_or(defaults.refresh_interval_secs),
        }
    }
}

impl Default for PropsDefaults {
    fn default() -> Self {
        Self {
            route: "/".to_string(),
            service: Service::Proxy,
            api_version: "v1.0".to_string(),
            refresh_interval_secs: 60,
        }
    }
}

impl ResolvedProps {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::Proxy => write!(f, "proxy"),
            Service::Node => write!(f, "node"),
        }
    }
}

impl std::str::FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proxy" => Ok(Service::Proxy),
            "node" => Ok(Service::Node),
            _ => Err(format!("Invalid service: {}", s)),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}
