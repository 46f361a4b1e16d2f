//! 阿里云错误映射
//!
//! 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunProvider;

/// 错误码分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    Auth,
    RecordExists,
    RecordNotFound,
    DomainNotFound,
    Quota,
    Throttled,
    Locked,
    Denied,
    /// 参数无效，附带参数名
    Invalid(&'static str),
}

fn classify(code: &str) -> Option<ErrorKind> {
    let kind = match code {
        "InvalidAccessKeyId.NotFound"
        | "InvalidAccessKeyId.Inactive"
        | "SignatureDoesNotMatch"
        | "IncompleteSignature" => ErrorKind::Auth,

        "DomainRecordDuplicate" | "DomainRecordConflict" => ErrorKind::RecordExists,

        "DomainRecordNotBelongToUser" | "InvalidRecordId.NotFound" | "InvalidRR.NoExist" => {
            ErrorKind::RecordNotFound
        }

        "InvalidDomainName.NoExist" | "DomainNotFound" => ErrorKind::DomainNotFound,

        "QuotaExceeded.Record" | "QuotaExceeded.FreeDnsRecord" | "QuotaExceeded.SubDomain" => {
            ErrorKind::Quota
        }

        "Throttling" | "Throttling.User" | "Throttling.Api" => ErrorKind::Throttled,

        "DomainRecordLocked" | "DomainExpiredDNSForbidden" | "Forbidden.DomainExpired" => {
            ErrorKind::Locked
        }

        "Forbidden"
        | "Forbidden.RAM"
        | "Forbidden.RiskControl"
        | "OperationDomain.NoPermission"
        | "IllegalUser"
        | "IncorrectDomainUser" => ErrorKind::Denied,

        "InvalidRR.RrEmpty" | "InvalidRR.Format" | "InvalidRR.Length" => ErrorKind::Invalid("rr"),
        "InvalidRR.TXTValue" | "InvalidValue.Length" => ErrorKind::Invalid("value"),
        "SubDomainInvalid.TTL" | "QuotaExceeded.TTL" => ErrorKind::Invalid("ttl"),
        "InvalidDomainName.Format" | "InvalidDomainName.Length" | "DomainEmpty" => {
            ErrorKind::Invalid("domain")
        }

        _ => return None,
    };
    Some(kind)
}

impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        "aliyun"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let Some(kind) = raw.code.as_deref().and_then(classify) else {
            return self.unknown_error(raw);
        };

        let provider = self.provider_name().to_string();
        let raw_message = Some(raw.message.clone());

        match kind {
            ErrorKind::Auth => ProviderError::InvalidCredentials {
                provider,
                raw_message,
            },
            ErrorKind::RecordExists => ProviderError::RecordExists {
                provider,
                record_name: context.record_name.unwrap_or_default(),
                raw_message,
            },
            ErrorKind::RecordNotFound => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_default(),
                raw_message,
            },
            ErrorKind::DomainNotFound => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_default(),
                raw_message,
            },
            ErrorKind::Quota => ProviderError::QuotaExceeded {
                provider,
                raw_message,
            },
            ErrorKind::Throttled => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message,
            },
            ErrorKind::Locked => ProviderError::DomainLocked {
                provider,
                domain: context.domain.unwrap_or_default(),
                raw_message,
            },
            ErrorKind::Denied => ProviderError::PermissionDenied {
                provider,
                raw_message,
            },
            ErrorKind::Invalid(param) => ProviderError::InvalidParameter {
                provider,
                param: param.to_string(),
                detail: raw.message,
            },
        }
    }
}
