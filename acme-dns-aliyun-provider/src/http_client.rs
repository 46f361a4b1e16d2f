//! Generic HTTP client tools
//!
//! Transport-level request execution. Signing and request construction stay
//! with the provider.
//!
//! Requests are sent exactly once. Transient failures come back as
//! [`ProviderError::NetworkError`], [`ProviderError::Timeout`] or
//! [`ProviderError::RateLimited`] and are never retried here.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP 请求执行与传输层错误映射
pub struct HttpUtils;

impl HttpUtils {
    /// Send `request_builder` once and return `(status, body)`.
    ///
    /// 429 and 502–504 are turned into errors here. Any other status, 4xx
    /// included, is returned with its body so the provider can read its own
    /// error format. `action` only labels the log lines.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(provider_name, &e))?;

        let status = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status}");

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;
        log::debug!("[{provider_name}] Response Body: {}", truncate_for_log(&body));

        match status {
            429 => {
                log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
                Err(ProviderError::RateLimited {
                    provider: provider_name.to_string(),
                    retry_after,
                    raw_message: Some(body),
                })
            }
            502..=504 => {
                log::warn!("[{provider_name}] Upstream unavailable (HTTP {status})");
                Err(ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
                })
            }
            _ => Ok((status, body)),
        }
    }

    /// Deserialize a JSON response body; failures become [`ProviderError::ParseError`].
    pub fn parse_json<T: DeserializeOwned>(
        response_text: &str,
        provider_name: &str,
    ) -> Result<T, ProviderError> {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; body: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider_name: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, ProviderError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(ProviderError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    #[tokio::test]
    async fn http_429_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "7")
                    .set_body_string("slow down"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = reqwest::Client::new().post(server.uri());
        let result = HttpUtils::execute_request(request, "test", "POST", "/").await;

        assert!(
            matches!(
                &result,
                Err(ProviderError::RateLimited {
                    retry_after: Some(7),
                    ..
                })
            ),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn http_503_maps_to_network_error_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let request = reqwest::Client::new().post(server.uri());
        let result = HttpUtils::execute_request(request, "test", "POST", "/").await;

        assert!(
            matches!(&result, Err(ProviderError::NetworkError { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn client_errors_return_body_for_caller() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"Code":"X"}"#))
            .mount(&server)
            .await;

        let request = reqwest::Client::new().post(server.uri());
        let (status, body) = HttpUtils::execute_request(request, "test", "POST", "/")
            .await
            .unwrap();

        assert_eq!(status, 400);
        assert_eq!(body, r#"{"Code":"X"}"#);
    }
}
