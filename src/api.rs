//! REST API for the packing service.
//!
//! Provides a single HTTP endpoint driving the engine, plus its OpenAPI
//! document. Uses Axum as the web framework and supports CORS.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use std::sync::OnceLock;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};

use crate::config::ApiConfig;
use crate::diagnostics::UnplacedBox;
use crate::driver::RchConfig;
use crate::engine;
use crate::model::{Box3D, Container, Score, ValidationError, WeightZone};

#[derive(Clone)]
struct ApiState {
    default_rch_config: RchConfig,
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>loadplan API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js"
            integrity="sha384-2YH8WDRaj7V2OqU/trsmzSagmk/E2SutiCsGkdgoQwC9pNUJV1u/141DHB6jgs8t"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                const ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout",
                });
                window.ui = ui;
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request body for the packing endpoint: a container, its optional weight
/// zones, and the boxes to place.
#[derive(Deserialize, ToSchema)]
#[schema(
    example = json!({
        "container": {"dims": [100, 100, 100], "max_weight": 500.0},
        "zones": null,
        "boxes": [
            {"id": "box-1", "customer_id": "cust-1", "priority": 0, "fragility": false, "dims": [30, 40, 20], "weight": 5.0}
        ]
    })
)]
pub struct OptimizeRequest {
    pub container: ContainerRequest,
    #[serde(default)]
    #[schema(nullable = true)]
    pub zones: Option<Vec<ZoneRequest>>,
    pub boxes: Vec<Box3D>,
    /// Overrides the configured RCH iteration count for this request only.
    #[serde(default)]
    #[schema(nullable = true)]
    pub iterations: Option<usize>,
}

#[derive(Deserialize, Clone, ToSchema)]
pub struct ContainerRequest {
    #[schema(value_type = [i64; 3], example = json!([100, 100, 100]))]
    pub dims: (i64, i64, i64),
    pub max_weight: f64,
}

#[derive(Deserialize, Clone, ToSchema)]
pub struct ZoneRequest {
    pub x_lo: i64,
    pub x_hi: i64,
    pub budget: f64,
}

struct ValidatedOptimizeRequest {
    container: Container,
    boxes: Vec<Box3D>,
    iterations: Option<usize>,
}

enum OptimizeRequestValidationError {
    InvalidContainer(ValidationError),
}

impl OptimizeRequest {
    fn into_validated(self) -> Result<ValidatedOptimizeRequest, OptimizeRequestValidationError> {
        // A caller-supplied max_weight of 0 or below is a sentinel: fall back
        // to the sum of the submitted boxes' weights.
        let max_weight = if self.container.max_weight <= 0.0 {
            self.boxes.iter().map(|b| b.weight).sum()
        } else {
            self.container.max_weight
        };

        let container = match self.zones {
            Some(zones) => {
                let zones = zones
                    .into_iter()
                    .map(|z| WeightZone::new(z.x_lo, z.x_hi, z.budget))
                    .collect::<Result<Vec<_>, ValidationError>>()
                    .map_err(OptimizeRequestValidationError::InvalidContainer)?;
                Container::new(self.container.dims, max_weight, zones)
                    .map_err(OptimizeRequestValidationError::InvalidContainer)?
            }
            None => Container::single_zone(self.container.dims, max_weight)
                .map_err(OptimizeRequestValidationError::InvalidContainer)?,
        };

        Ok(ValidatedOptimizeRequest {
            container,
            boxes: self.boxes,
            iterations: self.iterations,
        })
    }
}

/// Response body: the rendered 3D label volume, the solution's score, and
/// any boxes that could not be placed.
#[derive(Serialize, ToSchema)]
pub struct OptimizeResponse {
    pub volume: Vec<Vec<Vec<String>>>,
    pub placed_count: usize,
    pub unplaced: Vec<UnplacedBox>,
    pub is_complete: bool,
    pub score: ScoreDto,
}

/// Wire-friendly projection of `Score` (the engine's own enum has no
/// numeric payload in the `NotDefined`/`Infeasible` cases).
#[derive(Serialize, ToSchema)]
#[serde(tag = "kind", content = "value")]
pub enum ScoreDto {
    NotDefined,
    Infeasible,
    Value(f64),
}

impl From<Score> for ScoreDto {
    fn from(score: Score) -> Self {
        match score {
            Score::NotDefined => ScoreDto::NotDefined,
            Score::Infeasible => ScoreDto::Infeasible,
            Score::Value(v) => ScoreDto::Value(v),
        }
    }
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(status: StatusCode, error: impl Into<String>, details: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid JSON data", err.to_string())
}

fn container_config_error(details: impl Into<String>) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, "Invalid container configuration", details)
}

fn parse_optimize_request(
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<ValidatedOptimizeRequest, Response> {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(err) => return Err(json_deserialize_error(err)),
    };

    match payload.into_validated() {
        Ok(validated) => Ok(validated),
        Err(OptimizeRequestValidationError::InvalidContainer(err)) => {
            Err(container_config_error(err.to_string()))
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handle_optimize),
    components(schemas(
        OptimizeRequest,
        ContainerRequest,
        ZoneRequest,
        OptimizeResponse,
        ScoreDto,
        ErrorResponse,
        Box3D,
        UnplacedBox
    )),
    tags((name = "packing", description = "Endpoints for 3D container loading optimization"))
)]
struct ApiDoc;

/// Starts the API server. Blocks until the server is terminated.
pub async fn start_api_server(config: ApiConfig, rch_config: RchConfig) {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let state = ApiState {
        default_rch_config: rch_config,
    };

    let app = Router::new()
        .route("/optimize", post(handle_optimize))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(state);

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            panic!("❌ Could not bind API server to {}: {}", addr, err);
        }
    };

    let display_host = config.display_host().to_string();
    println!("🚀 Server running on http://{}:{}", display_host, config.port());
    if config.binds_to_all_interfaces() && config.uses_default_host() {
        println!("💡 Local access: http://localhost:{}", config.port());
    }
    println!("📦 API Endpoints:");
    println!("   - POST /optimize");
    println!("📑 Documentation:");
    println!("   - GET /docs");
    println!("   - GET /docs/openapi.json");

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("❌ API server terminated with an error: {err}");
    }
}

/// Handler for POST /optimize: packs the submitted boxes into the submitted
/// container and returns the resulting label volume.
#[utoipa::path(
    post,
    path = "/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Successfully computed a packing", body = OptimizeResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid request or container configuration",
            body = ErrorResponse
        )
    ),
    tag = "packing"
)]
async fn handle_optimize(
    State(state): State<ApiState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_optimize_request(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    println!(
        "📥 New optimize request: {} boxes into container {:?}",
        request.boxes.len(),
        request.container.dims
    );

    let mut rch_config = state.default_rch_config;
    if let Some(iterations) = request.iterations {
        rch_config.iterations = iterations;
    }

    let (volume, solution, unplaced) =
        engine::optimize_to_label_volume(&request.boxes, &request.container, &rch_config);

    println!(
        "📦 Result: {} placed, {} unplaced",
        solution.placements.len(),
        unplaced.len()
    );

    let response = OptimizeResponse {
        placed_count: solution.placements.len(),
        is_complete: unplaced.is_empty(),
        score: solution.score.into(),
        volume,
        unplaced,
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn serve_openapi_json(State(_state): State<ApiState>) -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui(State(_state): State<ApiState>) -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_lists_expected_paths() {
        let doc = openapi_doc();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/optimize"), "OpenAPI documentation is missing the /optimize path");
    }

    #[test]
    fn openapi_doc_contains_key_schemas() {
        let doc = openapi_doc();
        let components = doc
            .components
            .as_ref()
            .expect("OpenAPI documentation contains no components");
        let schemas = &components.schemas;
        for name in ["OptimizeRequest", "OptimizeResponse", "ErrorResponse"] {
            assert!(schemas.contains_key(name), "Expected schema '{}' is missing from OpenAPI spec", name);
        }
    }

    #[test]
    fn optimize_request_parses_with_default_zones() {
        let json = r#"{
            "container": {"dims": [10, 10, 10], "max_weight": 100.0},
            "boxes": [{"id": "a", "customer_id": "c", "priority": 0, "fragility": false, "dims": [5, 5, 5], "weight": 10.0}]
        }"#;
        let request: OptimizeRequest = serde_json::from_str(json).expect("should parse valid JSON");
        assert!(request.zones.is_none());
        assert_eq!(request.boxes.len(), 1);

        let validated = request.into_validated().map_err(|_| ()).expect("should validate");
        assert_eq!(validated.container.zones.len(), 1);
    }

    #[test]
    fn optimize_request_parses_explicit_zones() {
        let json = r#"{
            "container": {"dims": [10, 10, 10], "max_weight": 100.0},
            "zones": [{"x_lo": 0, "x_hi": 5, "budget": 20.0}, {"x_lo": 5, "x_hi": 10, "budget": 80.0}],
            "boxes": []
        }"#;
        let request: OptimizeRequest = serde_json::from_str(json).expect("should parse valid JSON");
        let validated = request.into_validated().map_err(|_| ()).expect("should validate");
        assert_eq!(validated.container.zones.len(), 2);
    }

    #[test]
    fn non_positive_max_weight_defaults_to_sum_of_box_weights() {
        let json = r#"{
            "container": {"dims": [10, 10, 10], "max_weight": 0},
            "boxes": [
                {"id": "a", "customer_id": "c", "priority": 0, "fragility": false, "dims": [2, 2, 2], "weight": 3.0},
                {"id": "b", "customer_id": "c", "priority": 0, "fragility": false, "dims": [2, 2, 2], "weight": 4.5}
            ]
        }"#;
        let request: OptimizeRequest = serde_json::from_str(json).expect("should parse valid JSON");
        let validated = request.into_validated().map_err(|_| ()).expect("should validate");
        assert_eq!(validated.container.max_weight, 7.5);
        assert_eq!(validated.container.zones[0].budget, 7.5);
    }
}
