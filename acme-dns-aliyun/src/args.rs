//! Command-line options registered by the dns-aliyun plugin

use std::path::PathBuf;

use acme_dns_aliyun_provider::DEFAULT_TTL;
use clap::Args;

/// Seconds to wait after `perform` for the record to propagate.
pub const DEFAULT_PROPAGATION_SECONDS: u64 = 10;

/// Plugin options, flattened into the host's own clap parser.
#[derive(Debug, Clone, Args)]
pub struct AuthenticatorArgs {
    /// Aliyun credentials INI file
    #[arg(long = "dns-aliyun-credentials", value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Seconds to wait for DNS changes to propagate before asking the ACME server to verify
    #[arg(
        long = "dns-aliyun-propagation-seconds",
        value_name = "SECS",
        default_value_t = DEFAULT_PROPAGATION_SECONDS
    )]
    pub propagation_seconds: u64,

    /// TTL of the challenge TXT record
    #[arg(long = "dns-aliyun-ttl", value_name = "SECS", default_value_t = DEFAULT_TTL)]
    pub ttl: u32,
}

impl Default for AuthenticatorArgs {
    fn default() -> Self {
        Self {
            credentials: None,
            propagation_seconds: DEFAULT_PROPAGATION_SECONDS,
            ttl: DEFAULT_TTL,
        }
    }
}
