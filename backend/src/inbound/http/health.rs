//! Liveness and readiness probes for orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Process health flags shared between the server bootstrap and the probes.
///
/// The process starts live but not ready; bootstrap marks it ready once the
/// HTTP server is bound.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live, not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes, e.g. while draining before shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether readiness probes pass.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether liveness probes pass.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe(passing: bool) -> HttpResponse {
    let mut response = if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the server accepts traffic, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe: 200 while the process is healthy, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;

    async fn probe_status(state: web::Data<HealthState>, uri: &str) -> StatusCode {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        res.status()
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_mark_ready() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(
            probe_status(state.clone(), "/health/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        state.mark_ready();
        assert_eq!(probe_status(state, "/health/ready").await, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_unhealthy() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(probe_status(state.clone(), "/health/live").await, StatusCode::OK);

        state.mark_unhealthy();
        assert_eq!(
            probe_status(state, "/health/live").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
