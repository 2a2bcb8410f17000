//! Per-IP rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type PeerIpGovernor =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Limiter for every page.
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 100 requests
///
/// Requests over the limit get `429 Too Many Requests`. The key is the peer
/// socket address, so the server must be run with connect info.
pub fn layer() -> PeerIpGovernor {
    build(5, 100)
}

/// Stricter limiter for credential forms (`/login`, `/register`).
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn credentials_layer() -> PeerIpGovernor {
    build(1, 10)
}

fn build(per_second: u64, burst_size: u32) -> PeerIpGovernor {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .expect("rate limit quota is non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}
