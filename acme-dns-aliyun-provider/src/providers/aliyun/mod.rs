//! 阿里云 DNS Provider

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
/// 阿里云 API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;
/// Region used when the credentials do not name one.
pub const DEFAULT_REGION_ID: &str = "cn-hangzhou";

/// Aliyun DNS (Alidns) provider implementation.
///
/// Authenticates via ACS3-HMAC-SHA256 signing with an Access Key ID/Secret.
/// Every call is a single signed POST; nothing is retried.
///
/// # Construction
///
/// ```rust,no_run
/// use acme_dns_aliyun_provider::AliyunProvider;
///
/// # fn main() -> acme_dns_aliyun_provider::Result<()> {
/// let provider = AliyunProvider::builder(
///     "your-access-key-id".to_string(),
///     "your-access-key-secret".to_string(),
/// )
/// .region_id("cn-shanghai")
/// .build()?;
/// # Ok(())
/// # }
/// ```
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    /// Base URL requests are sent to, without a trailing slash.
    pub(crate) endpoint: String,
    /// `host[:port]` of `endpoint`, as signed in the canonical headers.
    pub(crate) host: String,
}

impl std::fmt::Debug for AliyunProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliyunProvider")
            .field("access_key_id", &mask_secret(&self.access_key_id))
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AliyunProvider`].
pub struct AliyunProviderBuilder {
    access_key_id: String,
    access_key_secret: String,
    region_id: String,
    endpoint: Option<String>,
}

impl AliyunProviderBuilder {
    fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
            region_id: DEFAULT_REGION_ID.to_string(),
            endpoint: None,
        }
    }

    /// Set the region whose Alidns endpoint is used (default: `cn-hangzhou`).
    pub fn region_id(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = region_id.into();
        self
    }

    /// Send requests to `endpoint` (e.g. `http://127.0.0.1:8080`) instead of the
    /// regional Alidns endpoint. Takes precedence over [`region_id`](Self::region_id).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the [`AliyunProvider`] instance.
    pub fn build(self) -> Result<AliyunProvider> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| regional_endpoint(&self.region_id));
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let host = endpoint_host(&endpoint)?;

        Ok(AliyunProvider {
            client: create_http_client("aliyun")?,
            access_key_id: self.access_key_id,
            access_key_secret: self.access_key_secret,
            endpoint,
            host,
        })
    }
}

impl AliyunProvider {
    /// Creates a provider for the default region.
    pub fn new(access_key_id: String, access_key_secret: String) -> Result<Self> {
        Self::builder(access_key_id, access_key_secret).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(access_key_id: String, access_key_secret: String) -> AliyunProviderBuilder {
        AliyunProviderBuilder::new(access_key_id, access_key_secret)
    }
}

/// `https://alidns.<region>.aliyuncs.com`
fn regional_endpoint(region_id: &str) -> String {
    format!("https://alidns.{region_id}.aliyuncs.com")
}

fn endpoint_host(endpoint: &str) -> Result<String> {
    let invalid = |detail: String| ProviderError::InvalidParameter {
        provider: "aliyun".to_string(),
        param: "endpoint".to_string(),
        detail,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(format!("{endpoint}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| invalid(format!("{endpoint}: missing host")))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
