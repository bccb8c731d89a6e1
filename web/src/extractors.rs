//! Custom Axum extractors.

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::net::SocketAddr;

/// Client identity used as the rate-limiter key.
///
/// Resolution order mirrors what a reverse proxy deployment needs:
///
/// 1. First comma-separated value of `X-Forwarded-For`, trimmed, when present
///    and non-blank
/// 2. The peer address from `ConnectInfo`
/// 3. `"unknown"` (no proxy header, no connect info — e.g. in-process tests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_key(
            &parts.headers,
            parts.extensions.get::<ConnectInfo<SocketAddr>>(),
        )))
    }
}

/// Resolve the client key from headers or connection info.
pub fn client_key(headers: &HeaderMap, connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty());
    if let Some(first) = forwarded {
        return first.to_string();
    }

    connect_info.map_or_else(|| "unknown".to_string(), |info| info.0.ip().to_string())
}
