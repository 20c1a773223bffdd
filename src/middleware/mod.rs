pub mod auth;
pub mod require_role;

pub use auth::{verify_token, INVALID_TOKEN};
pub use require_role::{require_admin, require_instructor};
