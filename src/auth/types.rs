//! Types for authentication and user profiles

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Account kind, controlling which profile fields apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Farmer,
    Buyer,
}

/// A user profile as owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's email address
    pub email: String,

    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,

    /// Whether this account sells or buys produce
    pub user_type: UserType,

    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    // Farmer-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<String>,

    /// Crops the farmer grows, in the order the user entered them
    #[serde(default)]
    pub primary_crops: Vec<String>,

    // Buyer-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    /// Produce categories the buyer is interested in
    #[serde(default)]
    pub purchase_interests: Vec<String>,
}

/// Resolution of "who is the current user".
///
/// `current_user` never fails: a missing token, a rejected token, and an
/// unreachable backend all resolve to [`AuthState::Guest`], so callers
/// pattern-match instead of handling auth-check errors at every page.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// A valid token resolved to this user
    Authenticated(User),
    /// No token, or the backend did not accept the one we have
    Guest,
}

impl AuthState {
    /// The authenticated user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            AuthState::Guest => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Payload returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The opaque bearer token for subsequent calls
    pub token: String,

    /// The authenticated user
    pub user: User,
}

/// Wrapper payload returned by the who-am-I endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MeResponse {
    pub user: User,
}

/// New-account data posted to the registration endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub user_type: UserType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Any further profile fields the backend accepts at sign-up
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Result of a registration call. The backend's payload varies by
/// deployment, so unrecognized fields are retained in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResult {
    #[serde(default)]
    pub user: Option<User>,

    /// Present when the deployment logs the new account straight in
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Partial profile update for the current user. `None` fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_crops: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_interests: Option<Vec<String>>,
}
