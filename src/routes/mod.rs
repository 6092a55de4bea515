/// Router Module Index
///
/// Routes are grouped by the access they require. Access control is applied to a whole
/// group with Axum layers in `create_router`, never inside individual handlers.

/// Routes reachable without a token: login and the payment provider callback.
pub mod public;

/// Routes that need a valid administrator session (`authenticate`).
pub mod authenticated;

/// Routes that additionally need the `super_admin` role (`require_super_admin`).
pub mod superadmin;
