mod login;

pub use login::{login, IssuedToken, LoginRequest};
