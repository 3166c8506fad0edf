use std::str::FromStr;

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use civicdesk_core::{ActorIdentity, ActorRole, AppError};

use crate::error::ApiResult;

const ACTOR_SUBJECT_HEADER: &str = "x-actor-subject";
const ACTOR_ROLE_HEADER: &str = "x-actor-role";
const ACTOR_NAME_HEADER: &str = "x-actor-name";

/// Builds the actor identity from the headers set by the upstream identity
/// gateway.
///
/// The gateway has already resolved the caller's opaque token; this core
/// trusts the forwarded subject and role and never re-derives them. Role
/// casing is normalized here, at the boundary, and nowhere else.
pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = actor_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn actor_from_headers(headers: &HeaderMap) -> Result<ActorIdentity, AppError> {
    let subject = header_value(headers, ACTOR_SUBJECT_HEADER)?.ok_or_else(|| {
        AppError::Unauthorized("actor identity headers are required".to_owned())
    })?;

    let role = header_value(headers, ACTOR_ROLE_HEADER)?.ok_or_else(|| {
        AppError::Unauthorized("actor identity headers are required".to_owned())
    })?;
    let role = ActorRole::from_str(role.trim().to_lowercase().as_str())
        .map_err(|error| AppError::Unauthorized(error.to_string()))?;

    let display_name = header_value(headers, ACTOR_NAME_HEADER)?.unwrap_or_else(|| subject.clone());

    Ok(ActorIdentity::new(subject, display_name, role))
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(|value| value.trim().to_owned())
                .map_err(|_| {
                    AppError::Unauthorized(format!("header '{name}' is not valid UTF-8"))
                })
        })
        .transpose()
        .map(|value| value.filter(|value| !value.is_empty()))
}
