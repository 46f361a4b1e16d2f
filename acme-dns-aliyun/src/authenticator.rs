//! Authenticator Trait and the Aliyun implementation

use std::sync::Arc;

use acme_dns_aliyun_provider::{AliyunProvider, DnsClient};
use async_trait::async_trait;

use crate::args::AuthenticatorArgs;
use crate::credentials::Credentials;
use crate::error::{AuthenticatorError, Result};

/// dns-01 authenticator plugin, as seen by an ACME client.
///
/// The host calls [`configure_credentials`](Self::configure_credentials) once,
/// then [`perform`](Self::perform) for each challenge and
/// [`cleanup`](Self::cleanup) after validation, whether it succeeded or not.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Plugin name the host selects it by
    fn name(&self) -> &'static str;

    /// One-line summary for plugin listings
    fn description(&self) -> &'static str;

    /// Human-readable description of what the plugin does
    fn more_info(&self) -> &'static str;

    /// Load credentials from the configured source
    fn configure_credentials(&mut self) -> Result<()>;

    /// Seconds the host should wait after `perform` before validation
    fn propagation_seconds(&self) -> u64;

    /// Publish `validation` as a TXT record at `validation_name`
    async fn perform(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()>;

    /// Remove the TXT record published by `perform`
    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()>;
}

/// Plugin name under which [`AliyunAuthenticator`] registers.
pub const PLUGIN_NAME: &str = "dns-aliyun";

const DESCRIPTION: &str =
    "Obtain certificates using a DNS TXT record (if you are using Aliyun for DNS).";

const MORE_INFO: &str =
    "This plugin configures a DNS TXT record to respond to a dns-01 challenge using the Aliyun API.";

/// Authenticator backed by Aliyun DNS.
///
/// Every `perform`/`cleanup` builds its own [`DnsClient`]; the authenticator
/// itself only holds configuration.
#[derive(Debug, Clone)]
pub struct AliyunAuthenticator {
    args: AuthenticatorArgs,
    credentials: Option<Credentials>,
    endpoint: Option<String>,
}

impl AliyunAuthenticator {
    pub fn new(args: AuthenticatorArgs) -> Self {
        Self {
            args,
            credentials: None,
            endpoint: None,
        }
    }

    /// Use `credentials` directly instead of reading the credentials file.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Send API requests to `endpoint` instead of the regional Alidns endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn args(&self) -> &AuthenticatorArgs {
        &self.args
    }

    /// 构建 DNS 客户端；凭证不完整时在任何网络请求之前失败
    fn dns_client(&self) -> Result<DnsClient> {
        let credentials = self
            .credentials
            .as_ref()
            .filter(|c| c.is_complete())
            .ok_or_else(|| AuthenticatorError::configuration("Aliyun credentials not configured"))?;

        let mut builder = AliyunProvider::builder(
            credentials.access_key_id().to_string(),
            credentials.access_key_secret().to_string(),
        )
        .region_id(credentials.region_id());
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint.as_str());
        }

        Ok(DnsClient::new(Arc::new(builder.build()?)).with_ttl(self.args.ttl))
    }
}

#[async_trait]
impl Authenticator for AliyunAuthenticator {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn more_info(&self) -> &'static str {
        MORE_INFO
    }

    fn configure_credentials(&mut self) -> Result<()> {
        let path = self.args.credentials.as_deref().ok_or_else(|| {
            AuthenticatorError::configuration(
                "Aliyun credentials INI file not specified (--dns-aliyun-credentials)",
            )
        })?;

        self.credentials = Some(Credentials::from_ini_file(path)?);
        Ok(())
    }

    fn propagation_seconds(&self) -> u64 {
        self.args.propagation_seconds
    }

    async fn perform(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()> {
        self.dns_client()?
            .add_txt_record(domain, validation_name, validation)
            .await?;
        Ok(())
    }

    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) -> Result<()> {
        self.dns_client()?
            .del_txt_record(domain, validation_name, validation)
            .await?;
        Ok(())
    }
}
