use serde::{Deserialize, Serialize};

/// Unified error type for every DNS client operation.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus the identifying parameters of the failed operation (domain, record name/type/value,
/// or the zone guesses tried) so that an operator can diagnose it from the message alone.
///
/// Nothing in this crate retries. Transient variants ([`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout), [`RateLimited`](Self::RateLimited)) are surfaced as-is and the
/// caller decides what to do with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, HTTP 5xx).
    NetworkError {
        provider: String,
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// A DNS record with the same name/type/value already exists.
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// The provider rejected a record id as unknown.
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g., bad TTL value, record name outside the zone).
    InvalidParameter {
        provider: String,
        param: String,
        detail: String,
    },

    /// The provider returned a record type this crate does not know.
    UnsupportedRecordType {
        provider: String,
        record_type: String,
    },

    /// The account's resource quota has been exceeded.
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or a throttling code).
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout {
        provider: String,
        detail: String,
    },

    /// The provider reported the domain as unknown for this account.
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// The domain is locked or disabled and cannot be modified.
    DomainLocked {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// None of the zone-name guesses for a domain is a zone registered with the provider.
    ZoneNotFound {
        provider: String,
        domain: String,
        /// Most specific first.
        guesses: Vec<String>,
    },

    /// A record search returned no entry whose relative name matched exactly.
    RecordLookupFailed {
        provider: String,
        zone: String,
        rr: String,
        record_type: String,
        value: String,
    },

    /// The provider accepted a create request but returned no record id.
    RecordCreationFailed {
        provider: String,
        domain: String,
        record_name: String,
        value: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        provider: String,
        detail: String,
    },

    /// Failed to serialize request parameters.
    SerializationError {
        provider: String,
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        provider: String,
        /// `Code` field of the API error body, if any.
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（配置错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::RecordNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::UnsupportedRecordType { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::DomainLocked { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordLookupFailed { .. }
        )
    }
}

/// 带可选原始消息的错误描述
fn write_with_raw(
    f: &mut std::fmt::Formatter<'_>,
    provider: &str,
    summary: &str,
    raw_message: Option<&str>,
) -> std::fmt::Result {
    match raw_message {
        Some(msg) => write!(f, "[{provider}] {summary}: {msg}"),
        None => write!(f, "[{provider}] {summary}"),
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after: Some(secs),
                ..
            } => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
            Self::RateLimited { provider, .. } => write!(f, "[{provider}] Rate limited"),

            Self::InvalidCredentials {
                provider,
                raw_message,
            } => write_with_raw(f, provider, "Invalid credentials", raw_message.as_deref()),
            Self::PermissionDenied {
                provider,
                raw_message,
            } => write_with_raw(f, provider, "Permission denied", raw_message.as_deref()),
            Self::QuotaExceeded { provider, .. } => write!(f, "[{provider}] Quota exceeded"),
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => write_with_raw(
                f,
                provider,
                &format!("Domain '{domain}' not found"),
                raw_message.as_deref(),
            ),
            Self::DomainLocked {
                provider,
                domain,
                raw_message,
            } => write_with_raw(
                f,
                provider,
                &format!("Domain '{domain}' is locked"),
                raw_message.as_deref(),
            ),
            Self::RecordExists {
                provider,
                record_name,
                ..
            } => write!(f, "[{provider}] Record '{record_name}' already exists"),
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::UnsupportedRecordType {
                provider,
                record_type,
            } => write!(f, "[{provider}] Unsupported record type: {record_type}"),

            Self::ZoneNotFound {
                provider,
                domain,
                guesses,
            } => write!(
                f,
                "[{provider}] Unable to determine zone for '{domain}' using guesses: [{}]",
                guesses.join(", ")
            ),
            Self::RecordLookupFailed {
                provider,
                zone,
                rr,
                record_type,
                value,
            } => write!(
                f,
                "[{provider}] Unable to find {record_type} record '{rr}' in zone '{zone}' with value '{value}'"
            ),
            Self::RecordCreationFailed {
                provider,
                domain,
                record_name,
                value,
            } => write!(
                f,
                "[{provider}] Failed to add TXT record '{record_name}' for '{domain}' with value '{value}': no record id returned"
            ),

            Self::ParseError { provider, detail } => write!(f, "[{provider}] Parse error: {detail}"),
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => write!(f, "[{provider}] {raw_message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
