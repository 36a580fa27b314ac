use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod health;
pub mod pdf;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Generic failure payload returned by the generation and housekeeping
/// endpoints.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn failed() -> Self {
        Self {
            status: "failed".to_string(),
        }
    }
}

/// Register the HTTP surface. Shared between `run` and the integration
/// tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(web::resource("").route(web::get().to(pdf::handlers::info)))
            .service(
                web::resource("/invoice").route(web::post().to(pdf::handlers::generate_invoice)),
            )
            .service(
                web::resource("/shipping").route(web::post().to(pdf::handlers::generate_shipping)),
            )
            .service(
                web::resource("/order-confirmation")
                    .route(web::post().to(pdf::handlers::generate_order_confirmation)),
            )
            .service(
                web::resource("/delete/pdf").route(web::delete().to(pdf::handlers::delete_pdf)),
            )
            .service(
                web::resource("/delete/all").route(web::delete().to(pdf::handlers::delete_all)),
            ),
    )
    .service(web::resource("/health").route(web::get().to(health::health_check)));
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::pdf::handlers::info,
            crate::pdf::handlers::generate_invoice,
            crate::pdf::handlers::generate_shipping,
            crate::pdf::handlers::generate_order_confirmation,
            crate::pdf::handlers::delete_pdf,
            crate::pdf::handlers::delete_all,
            crate::health::health_check
        ),
        components(
            schemas(
                pdf::models::DocumentRequest,
                pdf::models::Recipient,
                health::HealthStatus,
                StatusResponse,
            )
        ),
        tags(
            (name = "Document Generation", description = "Render structured document data to PDF."),
            (name = "Housekeeping", description = "Bulk deletion of rendered artifacts."),
            (name = "Health", description = "Liveness probes."),
            (name = "Info", description = "Service info page.")
        )
    )]
    struct ApiDoc;

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    fs::create_dir_all(&config.output_dir)?;

    let registry = prometheus::Registry::new();
    let prometheus = PrometheusMetricsBuilder::new("pdf")
        .endpoint("/metrics")
        .registry(registry.clone())
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let app_state = match AppState::new(config.clone(), &registry) {
        Ok(state) => web::Data::new(state),
        Err(err) => {
            log::error!("failed to register metrics: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting server at http://{}:{}",
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .app_data(app_state.clone())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
