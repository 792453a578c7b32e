//! Configuration management for Text Gateway.
//!
//! Settings come from command-line arguments via clap, falling back to
//! environment variables and then to defaults. A `.env` file in the working
//! directory is loaded by the binary before parsing, so its values behave like
//! regular environment variables.
//!
//! # Environment Variables
//!
//! - `API_TOKEN` - Shared secret expected in `Authorization: Bearer <token>`
//!   (default: `SECRET123`)
//! - `TEXT_GATEWAY_HOST` - Server bind address (default: 127.0.0.1)
//! - `TEXT_GATEWAY_PORT` - Server port (default: 5000)
//! - `TEXT_GATEWAY_MAX_BODY_BYTES` - Request body size cap (default: none)

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Token used when `API_TOKEN` is not set.
///
/// Kept for compatibility with existing clients; deployments should always
/// override it.
pub const FALLBACK_API_TOKEN: &str = "SECRET123";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Text Gateway - chat, summarize and extract endpoints behind a bearer token.
#[derive(Parser, Debug, Clone)]
#[command(name = "text-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "TEXT_GATEWAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "TEXT_GATEWAY_PORT")]
    pub port: u16,

    /// Shared secret clients must send as a bearer token.
    #[arg(
        long,
        default_value = FALLBACK_API_TOKEN,
        env = "API_TOKEN",
        hide_env_values = true
    )]
    pub api_token: String,

    /// Maximum request body size in bytes. Unlimited when not set.
    #[arg(long, env = "TEXT_GATEWAY_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    ///
    /// An empty token is allowed: it matches requests that send no
    /// `Authorization` header at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        if self.max_body_bytes == Some(0) {
            return Err("max body bytes must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the token is still the built-in fallback.
    pub fn uses_fallback_token(&self) -> bool {
        self.api_token == FALLBACK_API_TOKEN
    }

    /// Whether the token is empty, leaving the protected endpoints open to
    /// clients that send no credentials.
    pub fn uses_empty_token(&self) -> bool {
        self.api_token.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
