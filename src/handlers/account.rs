// Account endpoints: registration, login, logout, profile.

use axum::{extract::State, http::header, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{password, UserSnapshot};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::store::NewUser;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn required(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// POST /create-account - register and receive an access token
pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<Json<Value>, ApiError> {
    let full_name = required(body.full_name, "Full Name is required")?;
    let email = required(body.email, "Email is required")?;
    let plain = required(body.password, "Password is required")?;

    // Characters, not bytes: a short multibyte password is still short.
    if plain.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    // Uniqueness is enforced by the store itself; a losing concurrent insert
    // surfaces as the same Conflict as a plainly repeated registration.
    let user = state
        .store
        .create_user(NewUser {
            full_name,
            email,
            password_hash: password::hash(&plain)?,
        })
        .await?;

    let token = state.codec.issue(&user)?;

    Ok(Json(json!({
        "error": false,
        "user": UserSnapshot::from(&user),
        "accessToken": token,
        "message": "Account created successfully"
    })))
}

/// POST /login - authenticate and receive an access token
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(body.email, "Email is required")?;
    let plain = required(body.password, "Password is required")?;

    let user = state
        .store
        .user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !password::verify(&plain, &user.password_hash)? {
        return Err(ApiError::bad_request("Invalid Password"));
    }

    let token = state.codec.issue(&user)?;

    Ok(Json(json!({
        "error": false,
        "user": UserSnapshot::from(&user),
        "accessToken": token,
        "message": "Login successful"
    })))
}

/// POST /logout - clear client-held session state
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// issued token stays valid until its expiry. This only clears the cookie
/// for clients that kept the token there.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "job-tracker=; Max-Age=0; Path=/")],
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// GET /get-user - current account profile
///
/// The one call site that re-verifies the identity against the store instead
/// of trusting the token snapshot: a profile fetch should reflect the live
/// record, and a token whose account no longer resolves gets a 401 here.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let user = auth
        .reverified(state.store.as_ref())
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    Ok(Json(json!({
        "user": UserSnapshot::from(&user),
        "message": ""
    })))
}
