use serde::{Deserialize, Serialize};
use serenity_shared::{AccountProfile, Gender, GuestTypeId, Masked};

use crate::{CoreError, CoreResult};

// ============================================================================
// Sign in / sign up
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: Masked<String>,
    pub user: AccountProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub full_name: String,
    pub cccd: String,
    pub guest_type_id: GuestTypeId,
    pub email: String,
    pub phone_number: String,
    pub password: Masked<String>,
}

/// Sign-up may or may not open a session right away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user: AccountProfile,
    #[serde(default)]
    pub token: Option<Masked<String>>,
}

/// Sign-up form as filled in by the guest, before the password confirmation is dropped
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub id_number: String,
    pub guest_type_id: GuestTypeId,
    pub email: String,
    pub phone_number: String,
    pub password: Masked<String>,
    pub confirm_password: Masked<String>,
}

impl SignUpForm {
    pub fn into_request(self) -> CoreResult<SignUpRequest> {
        if self.password != self.confirm_password {
            return Err(CoreError::ValidationError("Passwords do not match".to_string()));
        }
        for (label, value) in [
            ("Full name", &self.full_name),
            ("ID number", &self.id_number),
            ("Email", &self.email),
            ("Phone number", &self.phone_number),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!("{} is required", label)));
            }
        }
        if self.password.expose().is_empty() {
            return Err(CoreError::ValidationError("Password is required".to_string()));
        }

        Ok(SignUpRequest {
            full_name: self.full_name.trim().to_string(),
            cccd: self.id_number.trim().to_string(),
            guest_type_id: self.guest_type_id,
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            password: self.password,
        })
    }
}

// ============================================================================
// Forgot password (OTP)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
    pub otp: String,
    pub new_password: Masked<String>,
}

/// Generic `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendAck {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Profile
// ============================================================================

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cccd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_type_id: Option<GuestTypeId>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }

    /// Apply locally, e.g. when the backend answers with an acknowledgement only.
    pub fn apply_to(&self, profile: &AccountProfile) -> AccountProfile {
        let mut updated = profile.clone();
        if let Some(v) = &self.full_name {
            updated.full_name = v.clone();
        }
        if let Some(v) = &self.cccd {
            updated.id_number = v.clone();
        }
        if let Some(v) = self.gender {
            updated.gender = Some(v);
        }
        if let Some(v) = &self.birthday {
            updated.birthday = Some(v.clone());
        }
        if let Some(v) = &self.address {
            updated.address = Some(v.clone());
        }
        if let Some(v) = &self.email {
            updated.email = v.clone();
        }
        if let Some(v) = &self.phone_number {
            updated.phone_number = v.clone();
        }
        if let Some(v) = self.guest_type_id {
            updated.guest_type_id = Some(v);
        }
        updated
    }
}
