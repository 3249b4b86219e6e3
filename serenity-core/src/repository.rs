use async_trait::async_trait;
use serenity_catalog::RoomType;
use serenity_shared::{AccountProfile, GuestType};

use crate::account::{
    PasswordOtpRequest, PasswordResetRequest, ProfileUpdate, SignInRequest, SignInResponse,
    SignUpRequest, SignUpResponse,
};
use crate::reservation::{CreateReservationRequest, ReservationCreated, ReservationRecord};
use crate::CoreResult;

/// The external booking REST backend.
///
/// Implementations surface non-success responses as `BackendRejected`,
/// transport failures as `NetworkError` and unparseable bodies as
/// `MalformedResponse`. Nothing is retried.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Room-type catalog, already validated
    async fn room_types(&self) -> CoreResult<Vec<RoomType>>;

    /// Guest classifications for sign-up, profile and booking forms
    async fn guest_types(&self) -> CoreResult<Vec<GuestType>>;

    async fn create_reservation(
        &self,
        token: &str,
        request: &CreateReservationRequest,
    ) -> CoreResult<ReservationCreated>;

    async fn sign_in(&self, request: &SignInRequest) -> CoreResult<SignInResponse>;

    async fn sign_up(&self, request: &SignUpRequest) -> CoreResult<SignUpResponse>;

    /// Send a one-time password to the account's email
    async fn request_password_otp(&self, request: &PasswordOtpRequest) -> CoreResult<Option<String>>;

    /// Verify the OTP and set a new password
    async fn reset_password(&self, request: &PasswordResetRequest) -> CoreResult<Option<String>>;

    async fn profile(&self, token: &str) -> CoreResult<AccountProfile>;

    /// Returns the stored profile when the backend echoes it, `None` for a bare acknowledgement
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> CoreResult<Option<AccountProfile>>;

    async fn delete_account(&self, token: &str) -> CoreResult<()>;

    async fn my_reservations(&self, token: &str) -> CoreResult<Vec<ReservationRecord>>;
}
