//! 阿里云 DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::parse_record_type;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{CreateDnsRecordRequest, DnsRecord, ProviderZone, RecordQuery};

use super::types::{
    AddDomainRecordRequest, AddDomainRecordResponse, AliyunRecord, DeleteDomainRecordRequest,
    DeleteDomainRecordResponse, DescribeDomainRecordsRequest, DescribeDomainRecordsResponse,
    DescribeDomainsRequest, DescribeDomainsResponse,
};
use super::{AliyunProvider, MAX_PAGE_SIZE};

impl AliyunProvider {
    /// 将 API 记录转换为内部记录；缺少必需字段或类型未知的记录被跳过
    fn convert_record(&self, zone: &str, record: AliyunRecord) -> Option<DnsRecord> {
        let (Some(id), Some(rr), Some(record_type), Some(value)) =
            (record.record_id, record.rr, record.record_type, record.value)
        else {
            log::debug!("[{}] Skipping record with missing fields", self.provider_name());
            return None;
        };

        let record_type = match parse_record_type(&record_type, self.provider_name()) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("Skipping record {id}: {e}");
                return None;
            }
        };

        Some(DnsRecord {
            id,
            zone: record.domain_name.unwrap_or_else(|| zone.to_string()),
            rr,
            record_type,
            value,
            ttl: record.ttl,
        })
    }
}

#[async_trait]
impl DnsProvider for AliyunProvider {
    fn id(&self) -> &'static str {
        "aliyun"
    }

    async fn search_zones(&self, keyword: &str) -> Result<Vec<ProviderZone>> {
        let req = DescribeDomainsRequest {
            key_word: keyword.to_string(),
            page_number: 1,
            page_size: MAX_PAGE_SIZE,
        };
        let ctx = ErrorContext {
            domain: Some(keyword.to_string()),
            ..Default::default()
        };

        let response: DescribeDomainsResponse = self.request("DescribeDomains", &req, ctx).await?;

        let zones = response
            .domains
            .and_then(|d| d.domain)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| {
                d.domain_name.map(|name| ProviderZone {
                    id: d.domain_id,
                    name,
                })
            })
            .collect();

        Ok(zones)
    }

    async fn search_records(&self, query: &RecordQuery) -> Result<Vec<DnsRecord>> {
        let req = DescribeDomainRecordsRequest {
            domain_name: query.zone.clone(),
            rr_key_word: query.rr_keyword.clone().filter(|k| !k.is_empty()),
            record_type: query.record_type.map(|t| t.as_str().to_string()),
            value_key_word: query.value_keyword.clone().filter(|k| !k.is_empty()),
            page_number: 1,
            page_size: MAX_PAGE_SIZE,
        };
        let ctx = ErrorContext {
            record_name: query.rr_keyword.clone(),
            domain: Some(query.zone.clone()),
            ..Default::default()
        };

        let response: DescribeDomainRecordsResponse =
            self.request("DescribeDomainRecords", &req, ctx).await?;

        let records = response
            .domain_records
            .and_then(|r| r.record)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| self.convert_record(&query.zone, r))
            .collect();

        Ok(records)
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<Option<String>> {
        let api_req = AddDomainRecordRequest {
            domain_name: req.zone.clone(),
            rr: req.rr.clone(),
            record_type: req.record_type.as_str().to_string(),
            value: req.value.clone(),
            ttl: req.ttl,
        };
        let ctx = ErrorContext {
            record_name: Some(req.rr.clone()),
            domain: Some(req.zone.clone()),
            ..Default::default()
        };

        let response: AddDomainRecordResponse =
            self.request("AddDomainRecord", &api_req, ctx).await?;

        Ok(response.record_id.filter(|id| !id.is_empty()))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let api_req = DeleteDomainRecordRequest {
            record_id: record_id.to_string(),
        };
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            ..Default::default()
        };

        let _response: DeleteDomainRecordResponse =
            self.request("DeleteDomainRecord", &api_req, ctx).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::types::DnsRecordType;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_provider(server: &MockServer) -> AliyunProvider {
        AliyunProvider::builder("test-key-id".to_string(), "test-key-secret".to_string())
            .endpoint(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn search_zones_sends_keyword_and_parses_domains() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-acs-action", "DescribeDomains"))
            .and(header("x-acs-version", "2015-01-09"))
            .and(query_param("KeyWord", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RequestId": "req-1",
                "TotalCount": 2,
                "Domains": {"Domain": [
                    {"DomainName": "example.com", "DomainId": "d-1"},
                    {"DomainName": "myexample.com", "DomainId": "d-2"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let zones = mock_provider(&server)
            .search_zones("example.com")
            .await
            .unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "example.com");
        assert_eq!(zones[0].id.as_deref(), Some("d-1"));
    }

    #[tokio::test]
    async fn requests_are_signed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-acs-content-sha256", super::super::EMPTY_BODY_SHA256))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        mock_provider(&server).search_zones("example.com").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let auth = requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(auth.starts_with("ACS3-HMAC-SHA256 Credential=test-key-id,"));
        assert!(requests[0].headers.get("x-acs-signature-nonce").is_some());
    }

    #[tokio::test]
    async fn search_records_sends_filters_and_skips_incomplete_entries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-acs-action", "DescribeDomainRecords"))
            .and(query_param("DomainName", "example.com"))
            .and(query_param("RRKeyWord", "_acme-challenge"))
            .and(query_param("Type", "TXT"))
            .and(query_param("ValueKeyWord", "token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "TotalCount": 2,
                "DomainRecords": {"Record": [
                    {"RecordId": "1001", "RR": "_acme-challenge", "Type": "TXT",
                     "Value": "token", "TTL": 600, "DomainName": "example.com"},
                    {"RR": "_acme-challenge", "Type": "TXT", "Value": "token"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let query = RecordQuery {
            zone: "example.com".to_string(),
            rr_keyword: Some("_acme-challenge".to_string()),
            record_type: Some(DnsRecordType::Txt),
            value_keyword: Some("token".to_string()),
        };
        let records = mock_provider(&server).search_records(&query).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1001");
        assert_eq!(records[0].record_type, DnsRecordType::Txt);
        assert_eq!(records[0].ttl, Some(600));
    }

    #[tokio::test]
    async fn create_record_returns_record_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-acs-action", "AddDomainRecord"))
            .and(query_param("DomainName", "example.com"))
            .and(query_param("RR", "_acme-challenge.www"))
            .and(query_param("Type", "TXT"))
            .and(query_param("Value", "token"))
            .and(query_param("TTL", "600"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RequestId": "req-2",
                "RecordId": "9001"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let req = CreateDnsRecordRequest {
            zone: "example.com".to_string(),
            rr: "_acme-challenge.www".to_string(),
            record_type: DnsRecordType::Txt,
            value: "token".to_string(),
            ttl: 600,
        };
        let id = mock_provider(&server).create_record(&req).await.unwrap();

        assert_eq!(id.as_deref(), Some("9001"));
    }

    #[tokio::test]
    async fn create_record_without_id_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"RequestId": "r"})),
            )
            .mount(&server)
            .await;

        let req = CreateDnsRecordRequest {
            zone: "example.com".to_string(),
            rr: "_acme-challenge".to_string(),
            record_type: DnsRecordType::Txt,
            value: "token".to_string(),
            ttl: 600,
        };
        let id = mock_provider(&server).create_record(&req).await.unwrap();

        assert!(id.is_none());
    }

    #[tokio::test]
    async fn delete_record_maps_api_error_over_http_4xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-acs-action", "DeleteDomainRecord"))
            .and(query_param("RecordId", "404"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "RequestId": "r",
                "Code": "DomainRecordNotBelongToUser",
                "Message": "The DNS record does not exist."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = mock_provider(&server).delete_record("404").await;

        assert!(
            matches!(&result, Err(ProviderError::RecordNotFound { record_id, .. }) if record_id == "404"),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn invalid_credentials_in_2xx_body_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Code": "InvalidAccessKeyId.NotFound",
                "Message": "Specified access key is not found."
            })))
            .mount(&server)
            .await;

        let result = mock_provider(&server).search_zones("example.com").await;

        assert!(
            matches!(&result, Err(ProviderError::InvalidCredentials { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[tokio::test]
    async fn unstructured_server_error_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let result = mock_provider(&server).delete_record("1").await;

        assert!(
            matches!(&result, Err(ProviderError::NetworkError { detail, .. }) if detail.contains("500")),
            "unexpected result: {result:?}"
        );
    }
}
