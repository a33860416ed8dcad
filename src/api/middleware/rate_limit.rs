//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Picks the client IP the limiter keys on.
///
/// `Forwarded` trusts `X-Forwarded-For` / `X-Real-IP` / `Forwarded` headers
/// and must only be used behind a reverse proxy that sets them. `Peer` uses
/// the socket address and needs `ConnectInfo<SocketAddr>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientIpKeyExtractor {
    Peer,
    Forwarded,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        if behind_proxy {
            Self::Forwarded
        } else {
            Self::Peer
        }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        match self {
            Self::Peer => PeerIpKeyExtractor.extract(req),
            Self::Forwarded => SmartIpKeyExtractor.extract(req),
        }
    }
}

/// Creates a rate limiter for public endpoints (redirects, health).
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{short_code}", get(redirect_handler))
///     .layer(rate_limit::layer(config.behind_proxy));
/// ```
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 2, 100)
}

/// Creates a stricter rate limiter for the management API.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure_layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 1, 10)
}

fn build(behind_proxy: bool, per_second: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    #[test]
    fn test_peer_extractor_uses_socket_address() {
        let addr: SocketAddr = "10.0.0.7:4000".parse().unwrap();
        let mut req = Request::new(());
        req.extensions_mut().insert(ConnectInfo(addr));
        req.headers_mut()
            .insert("x-forwarded-for", "203.0.113.9".parse().unwrap());

        let key = ClientIpKeyExtractor::new(false).extract(&req).unwrap();
        assert_eq!(key, addr.ip());
    }

    #[test]
    fn test_forwarded_extractor_trusts_proxy_header() {
        let mut req = Request::new(());
        req.headers_mut()
            .insert("x-forwarded-for", "203.0.113.9".parse().unwrap());

        let key = ClientIpKeyExtractor::new(true).extract(&req).unwrap();
        assert_eq!(key, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_layers_build() {
        let _ = layer(false);
        let _ = secure_layer(true);
    }
}
