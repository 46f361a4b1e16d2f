//! Authenticator error type

use thiserror::Error;

pub use acme_dns_aliyun_provider::ProviderError;

/// Errors surfaced to the host by an [`Authenticator`](crate::Authenticator).
#[derive(Error, Debug)]
pub enum AuthenticatorError {
    /// Missing or unusable plugin configuration (credentials file, keys)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// DNS provider failure, passed through unchanged
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AuthenticatorError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Authenticator Result type alias
pub type Result<T> = std::result::Result<T, AuthenticatorError>;
