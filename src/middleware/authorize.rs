// SPDX-License-Identifier: MIT

//! Declarative role/ownership authorization.
//!
//! Each protected route declares a policy at wiring time; the decision
//! itself is a pure function over the policy, the authenticated identity,
//! and an optional target subject id taken from the `uid` path parameter.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::Role;
use axum::{
    extract::{FromRequestParts, RawPathParams, Request},
    middleware::Next,
    response::Response,
};

/// Authorization policy for a protected operation, fixed at wiring time.
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    /// Roles permitted to perform the operation.
    pub allowed_roles: Vec<Role>,
    /// When true, a requester whose subject id equals the target subject
    /// id is allowed regardless of role.
    pub allow_same_user: bool,
}

impl AuthorizationPolicy {
    pub fn roles(allowed_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: allowed_roles.into_iter().collect(),
            allow_same_user: false,
        }
    }

    /// Any authenticated role is acceptable.
    pub fn any_role() -> Self {
        Self::roles([Role::Lite, Role::Premium, Role::Trainer, Role::Admin])
    }

    pub fn allow_same_user(mut self) -> Self {
        self.allow_same_user = true;
        self
    }
}

/// Decide whether `identity` may perform the operation guarded by `policy`.
///
/// First match wins, in this order:
/// 1. same-subject exception (checked before the role claim is even
///    looked at, so a user with no role can still reach their own
///    resource)
/// 2. absent role → ROLE_NOT_FOUND
/// 3. role in the allowed set → allow
/// 4. otherwise → INSUFFICIENT_ROLE
pub fn decide(
    policy: &AuthorizationPolicy,
    identity: &AuthUser,
    target_subject_id: Option<&str>,
) -> Result<(), AppError> {
    if policy.allow_same_user {
        if let Some(target) = target_subject_id {
            if identity.uid == target {
                return Ok(());
            }
        }
    }

    let Some(role) = identity.role else {
        return Err(AppError::authorization(
            "Forbidden: No role found",
            "ROLE_NOT_FOUND",
        ));
    };

    if policy.allowed_roles.contains(&role) {
        return Ok(());
    }

    Err(AppError::authorization(
        "Forbidden: Insufficient role",
        "INSUFFICIENT_ROLE",
    ))
}

/// Middleware body enforcing a policy on one route.
///
/// The target subject id, when the route carries one, is the `uid` path
/// parameter. Runs after [`crate::middleware::require_auth`], which put
/// the [`AuthUser`] in the request extensions.
pub async fn authorize_request(
    policy: AuthorizationPolicy,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let identity = parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
        AppError::authentication("Unauthorized: No token provided", "TOKEN_NOT_FOUND")
    })?;

    let target = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|params| {
            params
                .iter()
                .find(|(key, _)| *key == "uid")
                .map(|(_, value)| value.to_string())
        });

    decide(&policy, &identity, target.as_deref())?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Wrap a policy as a route-layer middleware function.
///
/// Usage: `.route_layer(middleware::from_fn(guard(policy)))`.
pub fn guard(
    policy: AuthorizationPolicy,
) -> impl Fn(Request, Next) -> futures_util::future::BoxFuture<'static, Result<Response, AppError>>
       + Clone {
    move |req, next| Box::pin(authorize_request(policy.clone(), req, next))
}
