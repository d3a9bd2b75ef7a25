//! HTTP request handlers

use crate::dto::{
    HealthResponse, LogStatusResponse, MessageResponse, StartRequest, UpdateRateRequest,
    UpdateRateResponse,
};
use crate::error::{ApiError, Result};
use crate::metrics::GeneratorMetrics;
use axum::{
    Json,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use logpulse_core::{LogGenerator, StartOutcome};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Application state shared by all handlers
pub struct AppState {
    pub generator: Arc<LogGenerator>,
    pub metrics: GeneratorMetrics,
}

impl AppState {
    pub fn new(generator: Arc<LogGenerator>) -> prometheus::Result<Self> {
        Ok(Self {
            generator,
            metrics: GeneratorMetrics::new()?,
        })
    }
}

/// JSON body that may be omitted.
///
/// A request without a JSON content type yields `None`; a JSON body that
/// fails to parse is rejected as [`ApiError::BadRequest`].
pub struct OptionalJson<T>(pub Option<T>);

impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let payload = Option::<Json<T>>::from_request(req, state)
            .await
            .map_err(invalid_format)?;
        Ok(Self(payload.map(|Json(value)| value)))
    }
}

fn invalid_format(rejection: JsonRejection) -> ApiError {
    debug!(error = %rejection, "rejected request body");
    ApiError::BadRequest("invalid request format".to_string())
}

/// POST /logs/start
///
/// Without a body, generation starts at the stored rate.
pub async fn start_generation(
    State(state): State<Arc<AppState>>,
    OptionalJson(payload): OptionalJson<StartRequest>,
) -> Result<Json<MessageResponse>> {
    let outcome = match payload {
        Some(req) => state.generator.start(req.rate_per_second)?,
        None => state.generator.resume()?,
    };

    match outcome {
        StartOutcome::Started { .. } => Ok(Json(MessageResponse::new("log generation started"))),
        StartOutcome::AlreadyRunning { .. } => Err(ApiError::AlreadyRunning),
    }
}

/// POST /logs/stop
pub async fn stop_generation(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    let outcome = state.generator.stop();
    debug!(?outcome, "stop requested");
    Json(MessageResponse::new("log generation stopped"))
}

/// PUT /logs/rate
pub async fn update_rate(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<UpdateRateRequest>, JsonRejection>,
) -> Result<Json<UpdateRateResponse>> {
    let Json(req) = payload.map_err(invalid_format)?;

    let change = state.generator.update_rate(req.rate_per_second)?;

    Ok(Json(UpdateRateResponse {
        message: "log rate updated successfully".to_string(),
        rate_per_second: change.current,
    }))
}

/// GET /logs/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<LogStatusResponse> {
    Json(state.generator.status().into())
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /metrics
pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let body = state
        .metrics
        .render(state.generator.status(), state.generator.live_workers())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpulse_core::{GeneratorConfig, NullSink};
    use std::time::Duration;

    fn create_test_state() -> Arc<AppState> {
        let generator =
            LogGenerator::new(Arc::new(NullSink), GeneratorConfig::default()).unwrap();
        Arc::new(AppState::new(Arc::new(generator)).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_start_without_body_uses_stored_rate() {
        let state = create_test_state();

        let Json(body) = start_generation(State(state.clone()), OptionalJson(None)).await.unwrap();
        assert_eq!(body.message, "log generation started");

        let Json(status) = get_status(State(state.clone())).await;
        assert!(status.is_running);
        assert_eq!(status.rate_per_second, 2000);

        stop_generation(State(state)).await;
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let state = create_test_state();

        start_generation(
            State(state.clone()),
            OptionalJson(Some(StartRequest {
                rate_per_second: 100,
            })),
        )
        .await
        .unwrap();

        let err = start_generation(State(state.clone()), OptionalJson(None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyRunning));

        let Json(status) = get_status(State(state.clone())).await;
        assert_eq!(status.rate_per_second, 100);

        state.generator.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn test_start_with_invalid_rate() {
        let state = create_test_state();
        let err = start_generation(
            State(state.clone()),
            OptionalJson(Some(StartRequest {
                rate_per_second: 0,
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.client_message(), "rate must be greater than zero");
        assert!(!state.generator.status().is_running);
    }

    async fn extract_start_body(
        content_type: Option<&str>,
        body: &'static str,
    ) -> Result<OptionalJson<StartRequest>> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/logs/start");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder.body(axum::body::Body::from(body)).unwrap();
        OptionalJson::<StartRequest>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_start_body_extraction() {
        let OptionalJson(parsed) =
            extract_start_body(Some("application/json"), r#"{"rate_per_second": 25}"#)
                .await
                .unwrap();
        assert_eq!(parsed.unwrap().rate_per_second, 25);

        let OptionalJson(absent) = extract_start_body(None, "").await.unwrap();
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_start_body_rejections_are_bad_requests() {
        for body in ["{not json", "", r#"{"rate_per_second": "x"}"#] {
            let Err(err) = extract_start_body(Some("application/json"), body).await else {
                panic!("body {body:?} was accepted");
            };
            assert!(matches!(err, ApiError::BadRequest(_)), "body {body:?}");
            assert_eq!(err.client_message(), "invalid request format");
            assert_eq!(
                err.into_response().status(),
                axum::http::StatusCode::BAD_REQUEST
            );
        }
    }

    #[tokio::test]
    async fn test_update_rate_bounds() {
        let state = create_test_state();

        let Json(body) = update_rate(
            State(state.clone()),
            Ok(Json(UpdateRateRequest {
                rate_per_second: 750,
            })),
        )
        .await
        .unwrap();
        assert_eq!(body.rate_per_second, 750);
        assert_eq!(body.message, "log rate updated successfully");

        let err = update_rate(
            State(state.clone()),
            Ok(Json(UpdateRateRequest {
                rate_per_second: 10_001,
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.client_message(),
            "maximum allowed rate is 10000 logs per second"
        );

        let err = update_rate(
            State(state.clone()),
            Ok(Json(UpdateRateRequest {
                rate_per_second: -1,
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.client_message(), "rate must be greater than zero");

        assert_eq!(state.generator.status().rate_per_second, 750);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let state = create_test_state();
        let Json(first) = stop_generation(State(state.clone())).await;
        let Json(second) = stop_generation(State(state.clone())).await;
        assert_eq!(first, second);
        assert!(!state.generator.status().is_running);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let state = create_test_state();
        let response = metrics(State(state)).await.unwrap().into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
