use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Stand-in printed instead of secrets in `Debug` output.
const REDACTED: &str = "<redacted>";

/// Credentials for `accounts/token/`. The password is wiped on drop.
#[derive(Clone, Default, PartialEq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub clinic_id: Option<i64>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("clinic_id", &self.clinic_id)
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub phone: String,
    pub clinic_id: Option<i64>,
    pub role_id: Option<i64>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("confirm_password", &REDACTED)
            .field("phone", &self.phone)
            .field("clinic_id", &self.clinic_id)
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Payload of a successful login. Tokens are wiped on drop.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginData {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl fmt::Debug for LoginData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginData")
            .field("access", &REDACTED)
            .field("refresh", &self.refresh.as_ref().map(|_| REDACTED))
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

/// Who is signed in, without the tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedIn {
    pub role: Option<String>,
    pub name: Option<String>,
}

/// A staff account waiting for admin approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUser {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub clinic: Option<String>,
}
