//! Orchestrator probes backed by a single lifecycle phase.
//!
//! The process moves `starting -> serving -> draining` and never back.
//! Readiness holds only while serving; liveness fails once draining begins.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

/// Where the process is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Listener not yet bound.
    Starting,
    /// Accepting user traffic.
    Serving,
    /// Shutting down.
    Draining,
}

impl Lifecycle {
    const fn encode(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn decode(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Shared lifecycle phase read by the probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Lifecycle::Starting.encode()),
        }
    }
}

impl HealthState {
    /// A process that has not bound its listener yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Lifecycle {
        Lifecycle::decode(self.phase.load(Ordering::Acquire))
    }

    /// Enter `serving`. Has no effect once draining.
    pub fn mark_ready(&self) {
        let _previous = self.phase.compare_exchange(
            Lifecycle::Starting.encode(),
            Lifecycle::Serving.encode(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter `draining`.
    pub fn mark_unhealthy(&self) {
        self.phase
            .store(Lifecycle::Draining.encode(), Ordering::Release);
    }

    /// Whether the readiness probe passes.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase() == Lifecycle::Serving
    }

    /// Whether the liveness probe passes.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.phase() != Lifecycle::Draining
    }
}

#[derive(Serialize)]
struct ProbeBody {
    phase: Lifecycle,
}

fn probe_response(passing: bool, phase: Lifecycle) -> HttpResponse {
    let mut builder = if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody { phase })
}

/// Readiness probe: 200 while serving, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Listener bound and serving"),
        (status = 503, description = "Starting up or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready(), state.phase())
}

/// Liveness probe: 200 until draining begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive(), state.phase())
}
