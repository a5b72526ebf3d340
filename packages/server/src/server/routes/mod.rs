mod health;
mod login;

pub use health::{health_handler, root_handler};
pub use login::login_handler;
