//! # acme-dns-aliyun-provider
//!
//! Aliyun DNS (Alidns) client for ACME dns-01 challenges.
//!
//! The crate has two layers:
//!
//! - [`AliyunProvider`] speaks the Alidns RPC API (ACS3-HMAC-SHA256 signing,
//!   query-string parameters, JSON responses) and implements [`DnsProvider`],
//!   the four primitives a challenge needs: zone search, record search,
//!   record create, record delete.
//! - [`DnsClient`] composes those primitives into "add the challenge TXT
//!   record" and "delete it again", resolving the hosted zone from the domain
//!   by trying successively shorter suffixes.
//!
//! ## TLS Backend
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use acme_dns_aliyun_provider::{AliyunProvider, DnsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AliyunProvider::builder(
//!         "your-access-key-id".to_string(),
//!         "your-access-key-secret".to_string(),
//!     )
//!     .region_id("cn-hangzhou")
//!     .build()?;
//!
//!     let client = DnsClient::new(Arc::new(provider)).with_ttl(600);
//!
//!     client
//!         .add_txt_record("example.com", "_acme-challenge.example.com", "challenge-token")
//!         .await?;
//!     // ... let the ACME server validate ...
//!     client
//!         .del_txt_record("example.com", "_acme-challenge.example.com", "challenge-token")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::ZoneNotFound`]: no zone guess matched a registered zone
//! - [`ProviderError::RecordLookupFailed`]: no record with the exact relative name
//! - [`ProviderError::RecordCreationFailed`]: the API returned no record id
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failures
//!
//! Nothing is retried.

mod client;
mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use client::{DEFAULT_TTL, DnsClient, relative_record_name, zone_name_guesses};
pub use error::{ProviderError, Result};
pub use providers::{AliyunProvider, AliyunProviderBuilder, DEFAULT_REGION_ID};
pub use traits::DnsProvider;
pub use types::{CreateDnsRecordRequest, DnsRecord, DnsRecordType, ProviderZone, RecordQuery};
pub use utils::log_sanitizer::mask_secret;
