//! acme-dns-aliyun
//!
//! Manual auth/cleanup hooks for ACME clients, backed by Aliyun DNS.
//!
//! # Usage
//! ```bash
//! certbot certonly --manual --preferred-challenges dns \
//!     --manual-auth-hook 'acme-dns-aliyun perform --dns-aliyun-credentials /etc/letsencrypt/aliyun.ini' \
//!     --manual-cleanup-hook 'acme-dns-aliyun cleanup --dns-aliyun-credentials /etc/letsencrypt/aliyun.ini' \
//!     -d example.com
//! ```
//!
//! certbot passes the challenge via `CERTBOT_DOMAIN` / `CERTBOT_VALIDATION`.

use std::process::ExitCode;
use std::time::Duration;

use acme_dns_aliyun::{AuthenticatorArgs, PLUGIN_NAME, PluginRegistry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "acme-dns-aliyun")]
#[command(about = "ACME dns-01 challenge hooks for Aliyun DNS", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the challenge TXT record, then wait for propagation
    Perform(ChallengeArgs),

    /// Delete the challenge TXT record
    Cleanup(ChallengeArgs),
}

#[derive(clap::Args)]
struct ChallengeArgs {
    /// Domain being validated
    #[arg(long, env = "CERTBOT_DOMAIN")]
    domain: String,

    /// Challenge token to publish
    #[arg(long, env = "CERTBOT_VALIDATION")]
    validation: String,

    /// Record name (default: _acme-challenge.<domain>)
    #[arg(long)]
    validation_name: Option<String>,

    #[command(flatten)]
    plugin: AuthenticatorArgs,
}

impl ChallengeArgs {
    fn validation_name(&self) -> String {
        self.validation_name
            .clone()
            .unwrap_or_else(|| format!("_acme-challenge.{}", self.domain))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 日志输出到 stderr，stdout 留给调用方
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    let (is_perform, args) = match command {
        Commands::Perform(args) => (true, args),
        Commands::Cleanup(args) => (false, args),
    };
    let validation_name = args.validation_name();

    let registry = PluginRegistry::with_builtin();
    let mut authenticator = registry
        .create(PLUGIN_NAME, args.plugin)
        .with_context(|| format!("Plugin not registered: {PLUGIN_NAME}"))?;
    authenticator.configure_credentials()?;

    if is_perform {
        authenticator
            .perform(&args.domain, &validation_name, &args.validation)
            .await
            .with_context(|| format!("Failed to create TXT record {validation_name}"))?;

        let wait = authenticator.propagation_seconds();
        if wait > 0 {
            tracing::info!("Waiting {wait} seconds for DNS changes to propagate");
            tokio::time::sleep(Duration::from_secs(wait)).await;
        }
    } else {
        authenticator
            .cleanup(&args.domain, &validation_name, &args.validation)
            .await
            .with_context(|| format!("Failed to delete TXT record {validation_name}"))?;
    }

    Ok(())
}
