// SPDX-License-Identifier: MIT

//! Middleware modules (authentication, authorization).

pub mod auth;
pub mod authorize;

pub use auth::require_auth;
pub use authorize::AuthorizationPolicy;
