use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serenity_catalog::RoomType;
use serenity_core::account::{
    BackendAck, PasswordOtpRequest, PasswordResetRequest, ProfileUpdate, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse,
};
use serenity_core::catalog::{parse_room_types, RoomTypeRecord};
use serenity_core::reservation::{CreateReservationRequest, ReservationCreated, ReservationRecord};
use serenity_core::{decode, BookingBackend, CoreError, CoreResult};
use serenity_shared::{AccountProfile, GuestType};
use std::time::Duration;
use tracing::{instrument, warn};

use crate::app_config::BackendConfig;

pub mod paths {
    pub const ROOM_TYPES: &str = "/roomtypes";
    pub const GUEST_TYPES: &str = "/guesttypes";
    pub const RESERVATIONS: &str = "/reservations";
    pub const SIGN_IN: &str = "/signin";
    pub const SIGN_UP: &str = "/signup";
    pub const PASSWORD_OTP: &str = "/forgot-password/otp";
    pub const PASSWORD_RESET: &str = "/forgot-password/reset";
    pub const PROFILE: &str = "/profile";
    pub const MY_BOOKINGS: &str = "/mybookings";
}

/// REST client for the booking backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::InternalError(e.to_string()))?;

        Ok(Self {
            url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &BackendConfig) -> CoreResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", token))
    }
}

// ============================================================================
// Response handling
// ============================================================================

/// Error bodies carry either `message` or `error`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        text
    }
}

/// Read the whole body, turning non-success statuses into `BackendRejected`.
async fn read_body(sent: Result<Response, reqwest::Error>) -> CoreResult<Vec<u8>> {
    let response = sent.map_err(|e| CoreError::NetworkError(e.to_string()))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| CoreError::NetworkError(e.to_string()))?;

    if !status.is_success() {
        let message = rejection_message(status, &body);
        warn!(status = status.as_u16(), "Backend rejected request: {}", message);
        return Err(CoreError::BackendRejected {
            status: status.as_u16(),
            message,
        });
    }
    Ok(body.to_vec())
}

async fn read_json<T: DeserializeOwned>(sent: Result<Response, reqwest::Error>) -> CoreResult<T> {
    let body = read_body(sent).await?;
    decode(&body)
}

/// Acknowledgement message, tolerating an empty body.
async fn read_ack(sent: Result<Response, reqwest::Error>) -> CoreResult<Option<String>> {
    let body = read_body(sent).await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(decode::<BackendAck>(&body)?.message)
}

/// Profile update answers come back as `{ "user": ... }`, a bare profile or a plain acknowledgement.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileReply {
    Wrapped { user: AccountProfile },
    Bare(AccountProfile),
    Ack(BackendAck),
}

#[async_trait]
impl BookingBackend for ApiClient {
    #[instrument(skip(self), err)]
    async fn room_types(&self) -> CoreResult<Vec<RoomType>> {
        let sent = self.client.get(self.endpoint(paths::ROOM_TYPES)).send().await;
        let records: Vec<RoomTypeRecord> = read_json(sent).await?;
        parse_room_types(records)
    }

    #[instrument(skip(self), err)]
    async fn guest_types(&self) -> CoreResult<Vec<GuestType>> {
        let sent = self.client.get(self.endpoint(paths::GUEST_TYPES)).send().await;
        read_json(sent).await
    }

    #[instrument(skip(self, token, request), fields(room_type_id = %request.room_type_id), err)]
    async fn create_reservation(
        &self,
        token: &str,
        request: &CreateReservationRequest,
    ) -> CoreResult<ReservationCreated> {
        let sent = self
            .authorized(self.client.post(self.endpoint(paths::RESERVATIONS)), token)
            .json(request)
            .send()
            .await;
        read_json(sent).await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn sign_in(&self, request: &SignInRequest) -> CoreResult<SignInResponse> {
        let sent = self.client.post(self.endpoint(paths::SIGN_IN)).json(request).send().await;
        read_json(sent).await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn sign_up(&self, request: &SignUpRequest) -> CoreResult<SignUpResponse> {
        let sent = self.client.post(self.endpoint(paths::SIGN_UP)).json(request).send().await;
        read_json(sent).await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn request_password_otp(&self, request: &PasswordOtpRequest) -> CoreResult<Option<String>> {
        let sent = self.client.post(self.endpoint(paths::PASSWORD_OTP)).json(request).send().await;
        read_ack(sent).await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn reset_password(&self, request: &PasswordResetRequest) -> CoreResult<Option<String>> {
        let sent = self.client.post(self.endpoint(paths::PASSWORD_RESET)).json(request).send().await;
        read_ack(sent).await
    }

    #[instrument(skip(self, token), err)]
    async fn profile(&self, token: &str) -> CoreResult<AccountProfile> {
        let sent = self
            .authorized(self.client.get(self.endpoint(paths::PROFILE)), token)
            .send()
            .await;
        let reply: ProfileReply = read_json(sent).await?;
        match reply {
            ProfileReply::Wrapped { user } | ProfileReply::Bare(user) => Ok(user),
            ProfileReply::Ack(_) => Err(CoreError::MalformedResponse(
                "profile response carries no profile".to_string(),
            )),
        }
    }

    #[instrument(skip(self, token, update), err)]
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> CoreResult<Option<AccountProfile>> {
        let sent = self
            .authorized(self.client.put(self.endpoint(paths::PROFILE)), token)
            .json(update)
            .send()
            .await;
        let body = read_body(sent).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let reply: ProfileReply = decode(&body)?;
        match reply {
            ProfileReply::Wrapped { user } | ProfileReply::Bare(user) => Ok(Some(user)),
            ProfileReply::Ack(_) => Ok(None),
        }
    }

    #[instrument(skip(self, token), err)]
    async fn delete_account(&self, token: &str) -> CoreResult<()> {
        let sent = self
            .authorized(self.client.delete(self.endpoint(paths::PROFILE)), token)
            .send()
            .await;
        read_body(sent).await.map(|_| ())
    }

    #[instrument(skip(self, token), err)]
    async fn my_reservations(&self, token: &str) -> CoreResult<Vec<ReservationRecord>> {
        let sent = self
            .authorized(self.client.get(self.endpoint(paths::MY_BOOKINGS)), token)
            .send()
            .await;
        read_json(sent).await
    }
}
