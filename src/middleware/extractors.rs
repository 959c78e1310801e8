//! Handler-side access to the authenticated identity.
//!
//! These extractors only read what [`identity_guard`](super::auth::identity_guard)
//! stored. Using one on a route without the guard is a wiring bug and
//! surfaces as an internal error, never as a 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::BTreeSet;
use std::convert::Infallible;

use teslo_core::AppError;
use teslo_models::{Role, User, UserId};

use crate::middleware::auth::AuthenticatedIdentity;

fn identity_from_parts(parts: &Parts) -> Result<&AuthenticatedIdentity, AppError> {
    parts
        .extensions
        .get::<AuthenticatedIdentity>()
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "identity extractor used on `{}` without the identity guard",
                parts.uri.path()
            ))
        })
}

/// The full authenticated user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_from_parts(parts).map(|identity| Self(identity.user().clone()))
    }
}

/// Extractors that project one field of the authenticated user.
macro_rules! current_user_field {
    ($(#[$meta:meta])* $name:ident, $ty:ty, |$user:ident| $project:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub $ty);

        impl<S> axum::extract::FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = teslo_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                _state: &S,
            ) -> Result<Self, Self::Rejection> {
                let $user = identity_from_parts(parts)?.user();
                Ok(Self($project))
            }
        }
    };
}

current_user_field!(
    /// Id of the authenticated user.
    CurrentUserId,
    UserId,
    |user| user.id
);
current_user_field!(
    /// Email of the authenticated user.
    CurrentUserEmail,
    String,
    |user| user.email.clone()
);
current_user_field!(
    /// Role set of the authenticated user.
    CurrentUserRoles,
    BTreeSet<Role>,
    |user| user.roles.clone()
);

/// Every request header as a flat `[name, value, name, value, ...]` list,
/// in arrival order.
///
/// Values that are not valid UTF-8 are rendered lossily.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHeaders(pub Vec<String>);

impl<S> FromRequestParts<S> for RawHeaders
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = parts
            .headers
            .iter()
            .flat_map(|(name, value)| {
                [
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                ]
            })
            .collect();

        Ok(Self(headers))
    }
}
