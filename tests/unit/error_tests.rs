//! Unit tests for `AppError` display format and HTTP mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use mattermost_netlify::AppError;

#[test]
fn display_prefixes_identify_the_failing_layer() {
    let cases = [
        (AppError::Config("x".into()), "config: x"),
        (AppError::Db("x".into()), "db: x"),
        (AppError::Mattermost("x".into()), "mattermost: x"),
        (AppError::Netlify("x".into()), "netlify: x"),
        (AppError::OAuth("x".into()), "oauth: x"),
        (AppError::Crypto("x".into()), "crypto: x"),
        (AppError::NotFound("x".into()), "not found: x"),
        (AppError::Unauthorized("x".into()), "unauthorized: x"),
        (AppError::Forbidden("x".into()), "forbidden: x"),
        (AppError::BadRequest("x".into()), "bad request: x"),
        (AppError::Io("x".into()), "io: x"),
    ];
    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn client_errors_map_to_4xx() {
    assert_eq!(
        AppError::BadRequest("x".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Unauthorized("x".into()).status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden("x".into()).status_code(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::NotFound("x".into()).status_code(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn upstream_errors_map_to_bad_gateway() {
    assert_eq!(
        AppError::Netlify("x".into()).status_code(),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        AppError::Mattermost("x".into()).status_code(),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn oauth_failure_is_internal_error() {
    assert_eq!(
        AppError::OAuth("exchange failed".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn into_response_uses_status_code() {
    let response = AppError::Forbidden("Cross-site request forgery".into()).into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn sqlx_errors_convert_to_db() {
    let err: AppError = sqlx::Error::RowNotFound.into();
    assert!(err.to_string().starts_with("db:"));
}

#[test]
fn toml_errors_convert_to_config() {
    let parse_err = toml::from_str::<toml::Value>("not = [valid").expect_err("invalid toml");
    let err: AppError = parse_err.into();
    assert!(err.to_string().starts_with("config: invalid config"));
}
