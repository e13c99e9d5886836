use axum::{
    http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    http::{HeaderName, Method, Request, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::api::{activities, auth, grades_log, handlers, reports, teacher_assignments, users};
use crate::core::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION};
use crate::core::{config::Settings, state::AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) fn router(state: AppState) -> Router {
    let cors = build_cors_layer(state.settings());
    let api_prefix = state.settings().api().api_prefix.clone();
    let api = Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/teacher-assignments", teacher_assignments::router())
        .nest("/grades-log", grades_log::router())
        .nest("/activities", activities::router())
        .nest("/reports", reports::router());

    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_id_header_for_span = request_id_header.clone();
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(move |request: &Request<_>| {
            let request_id = request
                .headers()
                .get(&request_id_header_for_span)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(|response: &Response<axum::body::Body>, latency: Duration, _span: &Span| {
            let status = response.status().as_u16().to_string();
            metrics::counter!(HTTP_REQUESTS_TOTAL, "status" => status.clone()).increment(1);
            metrics::histogram!(HTTP_REQUEST_DURATION, "status" => status)
                .record(latency.as_secs_f64());
        });

    let mut router: Router<AppState> = Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz).head(handlers::healthz))
        .nest(&api_prefix, api)
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(trace_layer)
        .layer(cors);

    if state.settings().telemetry().prometheus_enabled {
        router = router.route("/metrics", get(handlers::metrics));
    }

    router.with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins = settings
        .cors()
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            ORIGIN,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        // Wildcard origin cannot be combined with allow_credentials
        base.allow_origin(Any)
    } else {
        base.allow_credentials(true).allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::router;
    use axum::{body::Body, http::Method, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use crate::core::redis::RedisHandle;
    use crate::core::state::AppState;
    use crate::core::{config::Settings, metrics};
    use crate::test_support;

    /// The pool connects lazily, so routes that never touch the database
    /// work without one.
    fn build_state(settings: Settings) -> AppState {
        let db =
            sqlx::PgPool::connect_lazy(&settings.database().database_url()).expect("lazy pool");
        let redis = RedisHandle::new(settings.redis().redis_url());
        AppState::new(settings, db, redis)
    }

    async fn app() -> axum::Router {
        let settings = Settings::load().expect("settings");
        router(build_state(settings))
    }

    #[tokio::test]
    async fn root_returns_banner() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let response = app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = test_support::read_json(response).await;
        assert_eq!(json["message"], "SIGRA API");
        assert_eq!(json["api_prefix"], "/api");
    }

    #[tokio::test]
    async fn metrics_disabled_returns_404() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let response = app()
            .await
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_enabled_returns_200() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var("PROMETHEUS_ENABLED", "1");

        let settings = Settings::load().expect("settings");
        metrics::init(&settings).expect("metrics init");
        let app = router(build_state(settings));

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected_before_querying() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let cases = [
            ("/api/users/abc", "Invalid user id"),
            ("/api/users/0/role", "Invalid user id"),
            ("/api/teacher-assignments/-4", "Invalid user id"),
        ];

        for (uri, detail) in cases {
            let response = app()
                .await
                .oneshot(test_support::json_request(Method::GET, uri, None, None))
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = test_support::read_json(response).await;
            assert_eq!(json["detail"], detail, "{uri}");
        }
    }

    #[tokio::test]
    async fn reports_require_bearer_token() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        for uri in ["/api/reports/final/me", "/api/reports/final/3"] {
            let response = app()
                .await
                .oneshot(test_support::json_request(Method::GET, uri, None, None))
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn grade_records_require_bearer_token() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        for uri in [
            "/api/grades-log/user/3",
            "/api/grades-log/activity/4",
            "/api/activities/activity/4",
            "/api/grades-log/user/abc",
        ] {
            let response = app()
                .await
                .oneshot(test_support::json_request(Method::GET, uri, None, None))
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(response.headers()["www-authenticate"], "Bearer", "{uri}");
        }
    }

    #[tokio::test]
    async fn register_rejects_short_password_before_touching_the_database() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let response = app()
            .await
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": "ana@school.edu",
                    "first_name": "Ana",
                    "last_name": "Pérez",
                    "password": "12345"
                })),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = test_support::read_json(response).await;
        assert_eq!(json["detail"], "Password is required (min 6 characters)");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let response = app()
            .await
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": "ana@school.edu" })),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = test_support::read_json(response).await;
        assert_eq!(json["detail"], "Email and password required");
    }
}
