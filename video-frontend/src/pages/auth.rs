//! Login, registration and logout.

use crate::error::ClientError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::pages::PageContext;
use crate::session::Session;
use validator::{Validate, ValidationErrors};

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";

/// Log in and persist the issued token in the session.
pub async fn login(ctx: &PageContext, request: &LoginRequest) -> Result<Session, ClientError> {
    request.validate().map_err(validation_error)?;

    let users = &ctx.services.users;
    let token = ctx
        .gateway
        .call(|| users.login(request))
        .await
        .map_err(|err| form_error(err, LOGIN_FAILED))?;

    ctx.session.save_token(&token);
    ctx.session.get_session()?.ok_or(ClientError::NotLoggedIn)
}

/// Create an account. The user still has to log in afterwards.
pub async fn register(ctx: &PageContext, request: &RegisterRequest) -> Result<(), ClientError> {
    request.validate().map_err(validation_error)?;

    let users = &ctx.services.users;
    ctx.gateway
        .call(|| users.register(request))
        .await
        .map_err(|err| form_error(err, REGISTRATION_FAILED))
}

pub fn logout(ctx: &PageContext) {
    ctx.session.clear_session();
    tracing::info!("User logged out");
}

/// Form errors show the backend's own message, or `fallback` when it sent none.
fn form_error(err: ClientError, fallback: &str) -> ClientError {
    match err {
        ClientError::Http { message: Some(message), .. } => ClientError::Validation(message),
        ClientError::Http { .. } => ClientError::Validation(fallback.to_string()),
        other => other,
    }
}

fn validation_error(errors: ValidationErrors) -> ClientError {
    let message = errors
        .field_errors()
        .into_values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string());
    ClientError::Validation(message)
}
