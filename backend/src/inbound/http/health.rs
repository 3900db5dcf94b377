//! Readiness and liveness endpoints for orchestrators and load balancers.
//!
//! The process moves through three phases: starting, serving, and draining.
//! `/health/ready` answers 200 only while serving; `/health/live` answers 200
//! until draining begins.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, http::header, web};

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared between the server and the health handlers.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
        }
    }
}

impl HealthState {
    /// A process that has not started serving yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapters are wired; accept traffic. Has no effect once draining.
    pub fn mark_ready(&self) {
        // A lost exchange means draining already began.
        let _ = self
            .phase
            .compare_exchange(STARTING, SERVING, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Shutdown has begun; both endpoints report 503 from now on.
    pub fn mark_draining(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    /// Whether the server accepts new traffic.
    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    /// Whether the process should be left running.
    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }
}

fn status_response(healthy: bool) -> HttpResponse {
    let mut res = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    res.insert_header((header::CACHE_CONTROL, "no-store")).finish()
}

/// Report whether the server accepts traffic.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Serving"),
        (status = 405, description = "Only GET is supported"),
        (status = 503, description = "Starting or draining")
    )
)]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    status_response(state.is_ready())
}

/// Report whether the process should keep running.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Running"),
        (status = 405, description = "Only GET is supported"),
        (status = 503, description = "Draining")
    )
)]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    status_response(state.is_alive())
}
