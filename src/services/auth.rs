use crate::error::ClientError;
use crate::models::{Ack, LoginRequest, LoginResponse, Registration, SignedIn};
use crate::routes;
use crate::session::TokenStore;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::{validate_login, validate_registration};

/// Authenticate and store the access token for later requests.
pub fn login(
    transport: &dyn Transport,
    tokens: &dyn TokenStore,
    credentials: &LoginRequest,
) -> Result<SignedIn, ClientError> {
    validate_login(credentials)?;
    let request = ApiRequest::post(routes::LOGIN).json(credentials)?;
    let LoginResponse { mut data } = send_json(transport, request)?;
    tokens.set_token(&data.access)?;
    tracing::info!(role = ?data.role, "Signed in");
    Ok(SignedIn {
        role: data.role.take(),
        name: data.name.take(),
    })
}

pub fn register(transport: &dyn Transport, registration: &Registration) -> Result<Ack, ClientError> {
    validate_registration(registration)?;
    let request = ApiRequest::post(routes::REGISTER).json(registration)?;
    send_json(transport, request)
}

/// Forget the stored token. No backend call.
pub fn logout(tokens: &dyn TokenStore) -> Result<(), ClientError> {
    tokens.clear()?;
    tracing::info!("Signed out");
    Ok(())
}
