//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! These types mirror the backend's marshmallow schemas field for field
//! (snake_case on the wire) so serde round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated user as returned by `GET /auth/current`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Profile image URL or path.
    pub profile: String,
    /// Whether the user has unrestricted management permissions.
    pub is_superuser: bool,
    /// Assigned role name; absent for users with no role.
    #[serde(default)]
    pub role: Option<String>,
}

/// Token pair returned by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Short-lived credential authorizing API requests.
    pub access_token: String,
    /// Longer-lived credential used solely to mint new access tokens.
    pub refresh_token: String,
}

/// Fresh access token returned by `POST /auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Credentials payload for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
