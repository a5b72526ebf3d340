//! Auth service library.
//!
//! Exposes the login-or-register flow: look up an identity by phone number,
//! create it on first sight, notify the profile collaborator, mint a JWT.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
