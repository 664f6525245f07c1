//! Router Module Index
//!
//! Routes are grouped by the access check applied to them. Each group gets its
//! layer in `create_router`.

/// Routes open to every caller, signed in or not.
pub mod public;

/// Routes behind the `AuthUser` extractor middleware.
pub mod authenticated;

/// Routes gated by a node of the shared route configuration (`guard::require_role`).
pub mod gated;

/// Routes restricted to the 'admin' role.
pub mod admin;
