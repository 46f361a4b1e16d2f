//! 阿里云 HTTP 请求（RPC 风格，参数通过 query string 传递）

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::serialize_to_query_string;
use super::{ALIYUN_DNS_VERSION, AliyunProvider, EMPTY_BODY_SHA256};

impl AliyunProvider {
    /// 执行一次阿里云 API 请求
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let query_string = serialize_to_query_string(params)?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        let authorization = self.sign(action, &query_string, &timestamp, &nonce);

        let url = if query_string.is_empty() {
            format!("{}/", self.endpoint)
        } else {
            format!("{}/?{query_string}", self.endpoint)
        };

        let request = self
            .client
            .post(&url)
            .header("Host", &self.host)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIYUN_DNS_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "POST",
            &format!("{} (Action: {action})", self.endpoint),
        )
        .await?;

        // HTTP 4xx/5xx: 优先解析 JSON 错误体中的 Code/Message
        if status >= 400 {
            if let Some(raw) = extract_api_error(&response_text) {
                return Err(self.log_and_map(raw, ctx));
            }
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: {response_text}"),
            });
        }

        let value: serde_json::Value = HttpUtils::parse_json(&response_text, self.provider_name())?;

        // 2xx 响应中也可能携带错误码
        if let Some(raw) = extract_api_error_value(&value) {
            return Err(self.log_and_map(raw, ctx));
        }

        serde_json::from_value(value).map_err(|e| ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }

    fn log_and_map(&self, raw: RawApiError, ctx: ErrorContext) -> ProviderError {
        let err = self.map_error(raw, ctx);
        if err.is_expected() {
            log::warn!("API error: {err}");
        } else {
            log::error!("API error: {err}");
        }
        err
    }
}

fn extract_api_error(response_text: &str) -> Option<RawApiError> {
    serde_json::from_str::<serde_json::Value>(response_text)
        .ok()
        .as_ref()
        .and_then(extract_api_error_value)
}

fn extract_api_error_value(value: &serde_json::Value) -> Option<RawApiError> {
    let code = value.get("Code").and_then(|v| v.as_str())?;
    let message = value.get("Message").and_then(|v| v.as_str())?;
    Some(RawApiError::with_code(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_code_and_message() {
        let raw = extract_api_error(
            r#"{"RequestId":"r","Code":"InvalidDomainName.NoExist","Message":"gone"}"#,
        );
        let raw = raw.unwrap();
        assert_eq!(raw.code.as_deref(), Some("InvalidDomainName.NoExist"));
        assert_eq!(raw.message, "gone");
    }

    #[test]
    fn ignores_bodies_without_code() {
        assert!(extract_api_error(r#"{"RequestId":"r","RecordId":"1"}"#).is_none());
        assert!(extract_api_error("<html>bad gateway</html>").is_none());
    }
}
