//! Log-in and bearer token authentication.
//!
//! Users log in with a username and password and receive a signed token.
//! Every other API route is wrapped in [auth_guard], which rejects requests
//! without a valid token.

mod log_in;
mod middleware;
mod token;

pub use log_in::{LogInData, LogInResponse, LoginState, post_log_in};
pub use middleware::{AuthState, auth_guard};
pub use token::{Claims, DEFAULT_TOKEN_DURATION, JwtKeys, create_token, decode_token};
