//! Aliyun credentials and the INI file they are loaded from
//!
//! 凭证文件是无 section 的 INI:
//!
//! ```ini
//! dns_aliyun_access_key_id = LTAI...
//! dns_aliyun_access_key_secret = ...
//! dns_aliyun_region_id = cn-hangzhou
//! ```
//!
//! 不带 `dns_aliyun_` 前缀的键 (`access_key_id`, `access_key_secret`, `region-id`) 同样有效。

use std::collections::HashMap;
use std::path::Path;

use acme_dns_aliyun_provider::{DEFAULT_REGION_ID, mask_secret};
use config::{Config, File, FileFormat, Value};

use crate::error::{AuthenticatorError, Result};

/// 凭证键的前缀（与插件名一致）
const KEY_PREFIX: &str = "dns_aliyun_";

const ACCESS_KEY_ID: &str = "access_key_id";
const ACCESS_KEY_SECRET: &str = "access_key_secret";

/// Access key pair plus the region whose Alidns endpoint is used.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    access_key_secret: String,
    region_id: String,
}

impl Credentials {
    /// Credentials for the default region (`cn-hangzhou`).
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            region_id: DEFAULT_REGION_ID.to_string(),
        }
    }

    #[must_use]
    pub fn with_region_id(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = region_id.into();
        self
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    /// Both halves of the key pair are present.
    pub fn is_complete(&self) -> bool {
        !self.access_key_id.is_empty() && !self.access_key_secret.is_empty()
    }

    /// Load credentials from a section-less INI file.
    ///
    /// Fails when the file is missing or unparsable, or when either access
    /// key is absent or empty. A file readable by group or others is accepted
    /// with a warning.
    pub fn from_ini_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AuthenticatorError::configuration(format!(
                "File not found: {}",
                path.display()
            )));
        }
        warn_if_world_readable(path);

        let entries = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()
            .and_then(Config::try_deserialize::<HashMap<String, Value>>)
            .map_err(|e| {
                AuthenticatorError::configuration(format!(
                    "Error parsing credentials configuration '{}': {e}",
                    path.display()
                ))
            })?;

        let access_key_id = lookup(&entries, &[&prefixed(ACCESS_KEY_ID), ACCESS_KEY_ID]);
        let access_key_secret =
            lookup(&entries, &[&prefixed(ACCESS_KEY_SECRET), ACCESS_KEY_SECRET]);
        let region_id = lookup(&entries, &[&prefixed("region_id"), "region-id", "region_id"]);

        let missing: Vec<String> = [
            (ACCESS_KEY_ID, &access_key_id),
            (ACCESS_KEY_SECRET, &access_key_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| prefixed(key))
        .collect();

        let (Some(access_key_id), Some(access_key_secret)) = (access_key_id, access_key_secret)
        else {
            return Err(AuthenticatorError::configuration(format!(
                "Missing properties in credentials configuration file {}: {}",
                path.display(),
                missing.join(", ")
            )));
        };

        log::debug!(
            "Loaded Aliyun credentials from {} (access key {})",
            path.display(),
            mask_secret(&access_key_id)
        );

        Ok(Self {
            access_key_id,
            access_key_secret,
            region_id: region_id.unwrap_or_else(|| DEFAULT_REGION_ID.to_string()),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &mask_secret(&self.access_key_id))
            .field("access_key_secret", &"****")
            .field("region_id", &self.region_id)
            .finish()
    }
}

fn prefixed(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// 按顺序取第一个非空的字符串值
fn lookup(entries: &HashMap<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| entries.get(*key))
        .filter_map(|value| value.clone().into_string().ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(unix)]
fn warn_if_world_readable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            log::warn!(
                "Unsafe permissions on credentials configuration file: {} (mode {:o})",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_world_readable(_path: &Path) {}
