//! # acme-dns-aliyun
//!
//! ACME dns-01 authenticator for domains hosted on Aliyun DNS.
//!
//! [`AliyunAuthenticator`] implements the host-facing [`Authenticator`] trait:
//! `perform` publishes the challenge TXT record, `cleanup` removes it. The
//! record work is delegated to [`acme_dns_aliyun_provider::DnsClient`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acme_dns_aliyun::{Authenticator, AuthenticatorArgs, PluginRegistry};
//!
//! # async fn run() -> acme_dns_aliyun::Result<()> {
//! let args = AuthenticatorArgs {
//!     credentials: Some("/etc/letsencrypt/aliyun.ini".into()),
//!     ..AuthenticatorArgs::default()
//! };
//! let Some(mut auth) = PluginRegistry::with_builtin().create("dns-aliyun", args) else {
//!     return Ok(());
//! };
//!
//! auth.configure_credentials()?;
//! auth.perform("example.com", "_acme-challenge.example.com", "token").await?;
//! // ... ACME validation ...
//! auth.cleanup("example.com", "_acme-challenge.example.com", "token").await?;
//! # Ok(())
//! # }
//! ```

mod args;
mod authenticator;
mod credentials;
mod error;
mod registry;

pub use args::{AuthenticatorArgs, DEFAULT_PROPAGATION_SECONDS};
pub use authenticator::{AliyunAuthenticator, Authenticator, PLUGIN_NAME};
pub use credentials::Credentials;
pub use error::{AuthenticatorError, ProviderError, Result};
pub use registry::{AuthenticatorFactory, PluginRegistry};
