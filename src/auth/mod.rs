//! Twitch app authentification.
pub mod access;
pub mod creds;
pub mod error;

pub use access::acquire_token;
pub use creds::AppAccessToken;
pub use error::TokenError;
