use crate::config::FetchConfig;
use crate::models::{Query, Service};

/// Compose the full request URL.
///
/// Proxy URLs take the form `{host}[:{port}]/{api_version}{route}`; node URLs
/// are `{host}{route}`. Query values are appended without percent-encoding.
pub fn build_url(
    config: &FetchConfig,
    route: &str,
    query: Option<&Query>,
    service: Service,
    api_version: &str,
) -> String {
    let host = config.host_for(service);
    let host = host.strip_suffix('/').unwrap_or(host);

    let mut url = String::from(host);

    if service == Service::Proxy {
        if let Some(port) = &config.port {
            url.push(':');
            url.push_str(port);
        }
        url.push('/');
        url.push_str(api_version);
    }

    url.push_str(route);

    if let Some(query) = query {
        url.push('?');
        url.push_str(&query.to_query_string());
    }

    url
}
