//! 阿里云 API 类型定义和辅助函数
//!
//! 响应字段全部为 `Option`，访问前必须先判断是否存在。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::error::{ProviderError, Result};

// ============ RFC3986 URL 编码 ============

/// RFC3986 URL 编码
pub fn url_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                result.push(c);
            }
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    let _ = write!(result, "%{byte:02X}");
                }
            }
        }
    }
    result
}

/// 将扁平的请求参数对象转换为 key-value 对；`null` 字段跳过
fn flatten_params(value: &serde_json::Value, result: &mut BTreeMap<String, String>) {
    let serde_json::Value::Object(map) = value else {
        return;
    };
    for (k, v) in map {
        match v {
            serde_json::Value::String(s) => {
                result.insert(k.clone(), s.clone());
            }
            serde_json::Value::Number(n) => {
                result.insert(k.clone(), n.to_string());
            }
            serde_json::Value::Bool(b) => {
                result.insert(k.clone(), b.to_string());
            }
            // dns-01 用到的 Action 参数都是标量
            serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {}
        }
    }
}

/// 将请求参数序列化为按 key 排序的 query string（同时用于签名和 URL）
pub fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let value = serde_json::to_value(params).map_err(|e| ProviderError::SerializationError {
        provider: "aliyun".to_string(),
        detail: e.to_string(),
    })?;

    let mut flat_map = BTreeMap::new();
    flatten_params(&value, &mut flat_map);

    let query_string = flat_map
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Ok(query_string)
}

// ============ 请求参数 ============

/// `DescribeDomains` 请求参数
#[derive(Debug, Serialize)]
pub struct DescribeDomainsRequest {
    #[serde(rename = "KeyWord")]
    pub key_word: String,
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
}

/// `DescribeDomainRecords` 请求参数
#[derive(Debug, Serialize)]
pub struct DescribeDomainRecordsRequest {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    /// 主机记录关键字（模糊搜索）
    #[serde(rename = "RRKeyWord", skip_serializing_if = "Option::is_none")]
    pub rr_key_word: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// 记录值关键字（模糊搜索）
    #[serde(rename = "ValueKeyWord", skip_serializing_if = "Option::is_none")]
    pub value_key_word: Option<String>,
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
}

/// `AddDomainRecord` 请求参数
#[derive(Debug, Serialize)]
pub struct AddDomainRecordRequest {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "RR")]
    pub rr: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

/// `DeleteDomainRecord` 请求参数
#[derive(Debug, Serialize)]
pub struct DeleteDomainRecordRequest {
    #[serde(rename = "RecordId")]
    pub record_id: String,
}

// ============ 域名相关结构 ============

#[derive(Debug, Deserialize)]
pub struct DescribeDomainsResponse {
    #[serde(rename = "Domains")]
    pub domains: Option<DomainsWrapper>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DomainsWrapper {
    #[serde(rename = "Domain")]
    pub domain: Option<Vec<AliyunDomain>>,
}

#[derive(Debug, Deserialize)]
pub struct AliyunDomain {
    #[serde(rename = "DomainId")]
    pub domain_id: Option<String>,
    #[serde(rename = "DomainName")]
    pub domain_name: Option<String>,
}

// ============ 记录相关结构 ============

#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordsResponse {
    #[serde(rename = "DomainRecords")]
    pub domain_records: Option<DomainRecordsWrapper>,
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordsWrapper {
    #[serde(rename = "Record")]
    pub record: Option<Vec<AliyunRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct AliyunRecord {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
    #[serde(rename = "DomainName")]
    pub domain_name: Option<String>,
    #[serde(rename = "RR")]
    pub rr: Option<String>,
    #[serde(rename = "Type")]
    pub record_type: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "TTL")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AddDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDomainRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
}
