//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_metrics;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_directory::Trace;
#[cfg(debug_assertions)]
use user_directory::doc::ApiDoc;
use user_directory::inbound::http::health::{HealthState, live, ready};
use user_directory::inbound::http::routes::configure;
use user_directory::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server for the user directory.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        users,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let http_state = web::Data::new(HttpState::new(users));

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "user directory listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use user_directory::domain::{DEFAULT_STORE_DEADLINE, UserDirectoryService};
    use user_directory::outbound::persistence::InMemoryUserRepository;

    fn states() -> (web::Data<HealthState>, web::Data<HttpState>) {
        let service =
            UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()), DEFAULT_STORE_DEADLINE);
        (
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::new(Arc::new(service))),
        )
    }

    #[actix_web::test]
    async fn app_serves_users_and_probes() {
        let (health, http) = states();
        health.mark_ready();
        let app = test::init_service(build_app(health, http)).await;

        for uri in ["/user", "/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
            assert!(res.headers().contains_key("trace-id"), "{uri}");
        }
    }

    #[actix_web::test]
    async fn unknown_paths_fall_through_to_not_found() {
        let (health, http) = states();
        let app = test::init_service(build_app(health, http)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_server_marks_ready_after_binding() {
        let (health, http) = states();
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("loopback address"),
            Arc::clone(&http.users),
        );

        let server = create_server(health.clone(), config).expect("bind ephemeral port");
        assert!(health.is_ready());

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        handle.stop(false).await;
        running
            .await
            .expect("server task joins")
            .expect("server shuts down cleanly");
    }
}
