//! Authentication layer: sign-in message verification and session tokens.

pub mod message;
pub mod middleware;
pub mod token;

pub use message::SigninMessage;
pub use middleware::{AppState, AuthSession};
pub use token::{mint_token, verify_token, Claims};
