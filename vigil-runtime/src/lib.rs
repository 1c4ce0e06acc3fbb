//! Vigil Runtime
//!
//! Cache, rate limiter, background refresh and the HTTP API around a
//! [`vigil_scan::Scanner`].

pub mod api;
pub mod cache;
pub mod config;
pub mod rate_limit;
pub mod refresh;
pub mod service;

#[cfg(test)]
mod testing;

pub use api::*;
pub use cache::*;
pub use config::*;
pub use rate_limit::*;
pub use refresh::*;
pub use service::*;

use std::sync::Arc;

use tracing::info;
use vigil_scan::SharedScanner;

/// Run the API until ctrl-c, with the refresh scheduler alongside if enabled
pub async fn serve(config: RuntimeConfig, scanner: SharedScanner) -> anyhow::Result<()> {
    let cache = Arc::new(CacheStore::new(config.cache_ttl));
    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let service = ThreatService::new(scanner.clone(), cache.clone(), limiter);

    let refresh = config.refresh.enabled.then(|| {
        RefreshScheduler::new(scanner, cache.clone(), config.refresh.clone()).spawn()
    });

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Vigil listening on {} (cache TTL {}s, refresh {})",
        addr,
        cache.ttl_seconds(),
        if refresh.is_some() { "on" } else { "off" }
    );

    let app = router(Arc::new(AppState::new(service)));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await?;

    if let Some(handle) = refresh {
        handle.shutdown().await;
    }
    Ok(())
}
