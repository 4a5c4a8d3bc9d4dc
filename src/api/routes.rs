use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    crate::Error,
    axum::extract::ConnectInfo,
    std::net::{IpAddr, SocketAddr},
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;
use crate::Result;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Result<Router> {
    // Public API routes - read-only
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        // Default catalog
        .route("/suggest", get(api_handlers::suggest_default))
        .route("/ingredients", get(api_handlers::list_default_ingredients))
        // Named catalogs
        .route("/catalogs", get(api_handlers::list_catalogs))
        .route("/catalogs/:name/suggest", get(api_handlers::suggest_in_catalog))
        .route(
            "/catalogs/:name/ingredients",
            get(api_handlers::list_catalog_ingredients),
        )
        // Stats
        .route("/stats", get(api_handlers::get_stats))
        .with_state(state.clone());

    // Rate limiting is keyed on the peer IP, falling back to localhost when
    // the connection info is unavailable. Skipped in unit tests, where
    // requests carry no peer address.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> std::result::Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) =
                    req.extensions().get::<ConnectInfo<SocketAddr>>()
                {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        // API_RATE_LIMIT is requests per second: one token every 1000/rate ms,
        // with a burst of one second's worth of requests
        let rate = settings.server.api_rate_limit.max(1);
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_millisecond((1000 / rate).max(1))
            .burst_size(u32::try_from(rate).unwrap_or(u32::MAX))
            .finish()
            .ok_or_else(|| Error::Config("Invalid API rate limit configuration".to_string()))?;

        api_routes = api_routes.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        });
    }

    let api_routes = api_routes;

    // Health check routes
    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    let router = Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(
            settings.limits.max_request_body_size,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.server.request_timeout_seconds,
        )))
        .layer(
            // CORS - allow all origins for read-only public API
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
