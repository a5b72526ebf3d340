//! Auth domain: identity records, the login-or-register flow, token minting.

pub mod actions;
pub mod errors;
pub mod models;
pub mod store;
pub mod token;

pub use errors::AuthError;
pub use token::{Claims, TokenService};
