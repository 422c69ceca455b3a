use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shared::{LoginForm, LoginOutcome};
use tracing::{error, info};

use crate::domain::validation;
use crate::error::DashboardError;

use super::AppState;

/// Axum handler for POST /api/auth/login
///
/// On success the session token is persisted as an HTTP-only cookie and the
/// outcome carries the authenticated redirect target. Upstream rejections
/// and transport failures both render as a non-fatal `ok:false` outcome.
pub async fn login(State(state): State<AppState>, Json(form): Json<LoginForm>) -> impl IntoResponse {
    info!("POST /api/auth/login - identifier: {}", form.identifier);

    let credentials = match validation::validate_login_form(&form) {
        Ok(credentials) => credentials,
        Err(failure) => return (StatusCode::UNPROCESSABLE_ENTITY, Json(failure)).into_response(),
    };

    match state.auth.login(&credentials).await {
        Ok(session) => {
            let cookie = session_cookie(&state.config.session_cookie, &session.jwt);
            let value = match HeaderValue::from_str(&cookie) {
                Ok(value) => value,
                Err(_) => {
                    error!("session token is not representable as a cookie value");
                    return (
                        StatusCode::OK,
                        Json(LoginOutcome::failure("Server error please try again later.")),
                    )
                        .into_response();
                }
            };
            let outcome = LoginOutcome::success(state.config.login_redirect.clone());
            let mut response = (StatusCode::OK, Json(outcome)).into_response();
            response.headers_mut().append(SET_COOKIE, value);
            response
        }
        Err(e @ DashboardError::Transport(_)) => {
            error!("login failed: {:?}", e);
            (
                StatusCode::OK,
                Json(LoginOutcome::failure("Server error please try again later.")),
            )
                .into_response()
        }
        Err(e) => {
            error!("login rejected: {:?}", e);
            (StatusCode::OK, Json(LoginOutcome::failure(e.form_message()))).into_response()
        }
    }
}

/// Axum handler for POST /api/auth/logout — clears the session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Ok(value) = HeaderValue::from_str(&expired_cookie(&state.config.session_cookie)) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

/// Query parameter for the user lookup used by the session subsystem.
#[derive(Debug, Deserialize)]
pub struct UserLookupQuery {
    pub email: String,
}

/// Axum handler for GET /api/users/lookup
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(lookup): Query<UserLookupQuery>,
) -> impl IntoResponse {
    info!("GET /api/users/lookup - email: {}", lookup.email);

    match state.dashboard.user_by_email(&lookup.email).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "User not found.").into_response(),
        Err(e) => {
            error!("user lookup failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user.").into_response()
        }
    }
}

fn session_cookie(name: &str, token: &str) -> String {
    format!("{}={}; HttpOnly; Path=/; SameSite=Lax", name, token)
}

fn expired_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::test_state;

    #[test]
    fn test_session_cookie_is_http_only() {
        let cookie = session_cookie("jwt", "token-1");
        assert_eq!(cookie, "jwt=token-1; HttpOnly; Path=/; SameSite=Lax");
    }

    #[test]
    fn test_expired_cookie_zeroes_max_age() {
        let cookie = expired_cookie("jwt");
        assert!(cookie.starts_with("jwt=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_login_boundary_validation_answers_422() {
        let state = test_state().await;
        let form = LoginForm {
            identifier: "ab".to_string(),
            password: "short#1".to_string(),
        };

        let response = login(State(state), Json(form)).await.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_logout_clears_the_session_cookie() {
        let state = test_state().await;

        let response = logout(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("logout sets a cookie")
            .to_str()
            .expect("cookie is ascii");
        assert!(cookie.contains("Max-Age=0"));
    }
}
