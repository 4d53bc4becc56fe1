//! Session Config

use clap::Args;

/// Session cookie settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Name of the cookie identifying a shopper's cart
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "cart_session")]
    pub session_cookie_name: String,
}
