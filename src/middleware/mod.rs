pub mod auth;

pub use auth::{auth_middleware, verify_jwt, AuthUser, Claims};
