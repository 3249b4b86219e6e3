use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serenity_core::account::{PasswordOtpRequest, PasswordResetRequest, SignInRequest, SignUpForm};
use serenity_core::{CoreError, Session};
use serenity_shared::{AccountProfile, Masked};
use tracing::info;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignInBody {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub signed_in: bool,
    pub profile: Option<AccountProfile>,
    /// First letter of the guest's name for the header avatar
    pub initial: Option<char>,
}

impl SessionResponse {
    fn from_profile(profile: Option<AccountProfile>) -> Self {
        Self {
            signed_in: profile.is_some(),
            initial: profile.as_ref().and_then(|p| p.initial()),
            profile,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub email: String,
    pub otp: String,
    pub new_password: Masked<String>,
    pub confirm_password: Masked<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/session", get(current_session))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInBody>,
) -> Result<Json<SessionResponse>, AppError> {
    if body.email.trim().is_empty() || body.password.expose().is_empty() {
        return Err(AppError::ValidationError("Email and password are required".to_string()));
    }

    let request = SignInRequest {
        email: body.email.trim().to_string(),
        password: body.password,
    };
    let response = state.backend.sign_in(&request).await?;

    state.session.sign_in(Session {
        token: response.token,
        profile: response.user.clone(),
    })?;

    Ok(Json(SessionResponse::from_profile(Some(response.user))))
}

/// POST /auth/sign-up
/// Signs the guest in as well when the backend hands out a token
pub async fn sign_up(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let request = form.into_request()?;
    let response = state.backend.sign_up(&request).await?;
    info!("Account created for {}", response.user.email);

    let profile = match response.token {
        Some(token) => {
            state.session.sign_in(Session { token, profile: response.user.clone() })?;
            Some(response.user)
        }
        None => None,
    };

    Ok((StatusCode::CREATED, Json(SessionResponse::from_profile(profile))))
}

/// POST /auth/sign-out
pub async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.sign_out()?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/session
pub async fn current_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from_profile(state.session.profile()))
}

/// POST /auth/forgot-password
/// Ask the backend to email a one-time password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordBody>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = body.email.trim().to_string();
    if email.is_empty() {
        return Err(AppError::ValidationError("Email is required".to_string()));
    }

    let message = state.backend.request_password_otp(&PasswordOtpRequest { email }).await?;
    Ok(Json(MessageResponse {
        message: message.unwrap_or_else(|| "A verification code has been sent to your email".to_string()),
    }))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Json<MessageResponse>, AppError> {
    if body.new_password != body.confirm_password {
        return Err(CoreError::ValidationError("Passwords do not match".to_string()).into());
    }
    if body.otp.trim().is_empty() {
        return Err(AppError::ValidationError("Verification code is required".to_string()));
    }

    let request = PasswordResetRequest {
        email: body.email.trim().to_string(),
        otp: body.otp.trim().to_string(),
        new_password: body.new_password,
    };
    let message = state.backend.reset_password(&request).await?;

    Ok(Json(MessageResponse {
        message: message.unwrap_or_else(|| "Your password has been reset".to_string()),
    }))
}
