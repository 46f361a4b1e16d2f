//! Provider trait and the internal error-mapping seam

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateDnsRecordRequest, DnsRecord, ProviderZone, RecordQuery};

/// API 返回的 `Code` / `Message`
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 发生错误的请求涉及的对象，填充到映射后的错误里
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub domain: Option<String>,
}

/// 把提供商错误码翻译成 [`ProviderError`]
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 未识别的错误码
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// The four record-management primitives a DNS provider must expose.
///
/// Each call is a single request/response exchange with the provider. Implementations
/// must not retry, cache, or batch; [`DnsClient`](crate::DnsClient) composes these
/// primitives into the dns-01 add/delete flows.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Zones whose name matches `keyword`.
    ///
    /// This is a keyword search: the result may contain zones that merely contain
    /// the keyword, and callers must check for an exact name match.
    async fn search_zones(&self, keyword: &str) -> Result<Vec<ProviderZone>>;

    /// Records in `query.zone` matching the keyword/type filters.
    async fn search_records(&self, query: &RecordQuery) -> Result<Vec<DnsRecord>>;

    /// Create a record. Returns the new record id, or `None` when the provider
    /// acknowledged the request without one.
    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<Option<String>>;

    /// Delete a record by id.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}
