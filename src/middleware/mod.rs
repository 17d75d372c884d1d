//! Custom middleware definitions

mod auth;

pub use auth::AuthLayer;
