use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::config::types::RemoteServiceConfig;
use crate::error::{Result, ServiceError};

/// Build the pooled HTTP client used for one downstream service.
pub fn build_http_client(config: &RemoteServiceConfig) -> Result<Client> {
    let http = Client::builder()
        .user_agent(concat!("accommodations-service/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(10)
        .build()?;
    Ok(http)
}

/// Join `path` onto `base`, keeping any path prefix the base URL carries.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            ServiceError::Config(format!("base URL cannot be a base: {base}"))
        })?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(url)
}

/// Like [`endpoint`], with `id` appended as a single escaped path segment.
pub fn resource_endpoint(base: &Url, path: &str, id: &str) -> Result<Url> {
    let mut url = endpoint(base, path)?;
    url.path_segments_mut()
        .map_err(|()| ServiceError::Config(format!("base URL cannot be a base: {base}")))?
        .push(id);
    Ok(url)
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(ServiceError::Config(format!(
            "service URL must be hierarchical: {raw}"
        )));
    }
    Ok(url)
}

/// Turn a non-success HTTP status into a `RemoteStatus` error.
pub fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ServiceError::RemoteStatus {
        service,
        status: status.as_u16(),
    })
}

pub fn is_not_found(response: &Response) -> bool {
    response.status() == StatusCode::NOT_FOUND
}
