mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod health;
    pub mod roster;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::roster::roster,
        ),
        components(schemas(
            types::RosterRequest, types::RosterResponse, types::RosterStatus,
            types::EmployeeRoster, types::SelectionMode
        )),
        tags(
            (name = "rostera", description = "Shift roster generation API")
        )
    )]
struct ApiDoc;

fn app(app_state: state::AppState) -> Router {
    Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/roster", post(routes::roster::roster))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack())
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let app = app(state::AppState::from_env());

    let port = std::env::var("ROSTERA__SERVER__PORT").unwrap_or_else(|_| "8080".into());
    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", port)
        .parse()
        .expect("invalid listen addr");
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(state::AppState::from_env())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn roster_request(payload: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/roster")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn roster_endpoint_returns_a_roster() {
        let payload = serde_json::json!({
            "num_employees": 3,
            "num_days": 7,
            "num_shifts": 3,
            "num_days_off": 2,
            "soft_days_off": false
        });
        let response = test_app().oneshot(roster_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["week_length"], 7);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"][0]["employee_id"], "Employee 1");
    }

    #[tokio::test]
    async fn infeasible_problem_is_a_normal_response() {
        let payload = serde_json::json!({
            "num_employees": 1,
            "num_days": 2,
            "num_shifts": 3,
            "num_days_off": 2,
            "soft_days_off": false
        });
        let response = test_app().oneshot(roster_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "infeasible");
        assert_eq!(body["week_length"], -1);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_parameters_are_a_normal_response() {
        let payload = serde_json::json!({
            "num_employees": 0,
            "num_days": 7,
            "num_shifts": 3,
            "num_days_off": 2,
            "soft_days_off": false
        });
        let response = test_app().oneshot(roster_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "invalid_params");
        assert_eq!(body["week_length"], -1);
        assert!(body["detail"].as_str().unwrap().contains("num_employees"));
    }

    #[tokio::test]
    async fn days_off_target_defaults_when_omitted() {
        let payload = serde_json::json!({
            "num_employees": 3,
            "num_days": 7,
            "num_shifts": 3,
            "soft_days_off": false
        });
        let response = test_app().oneshot(roster_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        let shifts = body["data"][0]["shifts"].as_array().unwrap();
        let offs = shifts.iter().filter(|k| **k == 1).count();
        assert_eq!(offs, 2);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["paths"]["/v1/roster"].is_object());
        assert!(body["paths"]["/v1/health"].is_object());
    }
}
