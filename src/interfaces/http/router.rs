//! API router with Swagger UI and single-page app fallback

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    http::{StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ChargeGenerationService;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

use super::common::ApiResponse;
use super::modules::billing::{self, BillingState};
use super::modules::health::{self, HealthState};

/// State shared by all `/api` routes. Handlers extract their own slice of
/// it through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub generator: Arc<ChargeGenerationService>,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    pub fn new(db: DatabaseConnection, page_size: u64) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        Self {
            generator: Arc::new(ChargeGenerationService::new(repos.clone(), page_size)),
            repos,
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

impl FromRef<ApiState> for BillingState {
    fn from_ref(s: &ApiState) -> Self {
        BillingState {
            repos: Arc::clone(&s.repos),
            generator: Arc::clone(&s.generator),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        billing::generate_charges,
        billing::list_charges,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            billing::GenerateChargesRequest,
            billing::GenerateChargesResponse,
            billing::ChargeDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Billing", description = "Charge generation per billing period"),
    ),
    info(
        title = "Academia API",
        version = "1.0.0",
        description = "Billing endpoints of the academy management server"
    )
)]
pub struct ApiDoc;

async fn api_not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("No route for {}", uri.path()))),
    )
}

fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/generar-deudas", post(billing::generate_charges))
        .route("/cargos", get(billing::list_charges))
        .fallback(api_not_found)
        .with_state(state)
}

/// Create the application router: `/api`, Swagger UI at `/docs` and the
/// frontend in `frontend_dir`, where unknown paths resolve to `index.html`.
pub fn create_api_router(state: ApiState, frontend_dir: impl AsRef<Path>) -> Router {
    let frontend_dir = frontend_dir.as_ref();
    let spa = ServeDir::new(frontend_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .nest("/api", api_routes(state))
        .fallback_service(spa)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::database::testing::memory_db;

    fn frontend_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "academia-spa-{}-{}",
            name,
            crate::infrastructure::new_record_id()
        ));
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("index.html"), "<html>app</html>").unwrap();
        std::fs::write(dir.join("assets/app.js"), "console.log(1)").unwrap();
        dir
    }

    async fn app(name: &str) -> Router {
        let state = ApiState::new(memory_db().await, 1000);
        create_api_router(state, frontend_fixture(name))
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn serves_static_files() {
        let app = app("static").await;
        let (status, body) = get(&app, "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        let app = app("fallback").await;
        for path in ["/", "/atletas/123", "/pagos"] {
            let (status, body) = get(&app, path).await;
            assert_eq!(status, StatusCode::OK, "path {path}");
            assert_eq!(body, "<html>app</html>");
        }
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let app = app("api404").await;
        let (status, body) = get(&app, "/api/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn health_is_mounted_under_api() {
        let app = app("health").await;
        let (status, body) = get(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"database\""));
    }

    #[tokio::test]
    async fn openapi_document_lists_billing_paths() {
        let app = app("docs").await;
        let (status, body) = get(&app, "/api-doc/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/api/generar-deudas"));
        assert!(body.contains("/api/cargos"));
    }
}
