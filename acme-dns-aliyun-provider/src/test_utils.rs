//! 测试辅助模块
//!
//! 提供内存中的 `DnsProvider` mock，模拟阿里云的关键字搜索语义。

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{CreateDnsRecordRequest, DnsRecord, DnsRecordType, ProviderZone, RecordQuery};

// ===== MockProvider =====

pub struct MockProvider {
    zones: Vec<String>,
    records: RwLock<Vec<DnsRecord>>,
    next_id: RwLock<u64>,
    zone_searches: RwLock<Vec<String>>,
    deleted_ids: RwLock<Vec<String>>,
    /// 为 true 时 `create_record` 不返回 record id
    omit_record_id: RwLock<bool>,
    /// 如果 Some，所有调用返回此错误
    fail_with: RwLock<Option<ProviderError>>,
}

impl MockProvider {
    pub fn with_zones(zones: &[&str]) -> Self {
        Self {
            zones: zones.iter().map(ToString::to_string).collect(),
            records: RwLock::new(Vec::new()),
            next_id: RwLock::new(1000),
            zone_searches: RwLock::new(Vec::new()),
            deleted_ids: RwLock::new(Vec::new()),
            omit_record_id: RwLock::new(false),
            fail_with: RwLock::new(None),
        }
    }

    pub async fn set_omit_record_id(&self, omit: bool) {
        *self.omit_record_id.write().await = omit;
    }

    pub async fn set_fail_with(&self, err: Option<ProviderError>) {
        *self.fail_with.write().await = err;
    }

    pub async fn insert_record(&self, zone: &str, rr: &str, record_type: DnsRecordType, value: &str) {
        let id = self.allocate_id().await;
        self.records.write().await.push(DnsRecord {
            id,
            zone: zone.to_string(),
            rr: rr.to_string(),
            record_type,
            value: value.to_string(),
            ttl: None,
        });
    }

    pub async fn records(&self) -> Vec<DnsRecord> {
        self.records.read().await.clone()
    }

    pub async fn zone_searches(&self) -> Vec<String> {
        self.zone_searches.read().await.clone()
    }

    pub async fn deleted_ids(&self) -> Vec<String> {
        self.deleted_ids.read().await.clone()
    }

    async fn allocate_id(&self) -> String {
        let mut next = self.next_id.write().await;
        *next += 1;
        next.to_string()
    }

    async fn check_failure(&self) -> Result<()> {
        match self.fail_with.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DnsProvider for MockProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn search_zones(&self, keyword: &str) -> Result<Vec<ProviderZone>> {
        self.check_failure().await?;
        self.zone_searches.write().await.push(keyword.to_string());

        let keyword = keyword.to_ascii_lowercase();
        Ok(self
            .zones
            .iter()
            .filter(|name| name.to_ascii_lowercase().contains(&keyword))
            .map(|name| ProviderZone {
                id: None,
                name: name.clone(),
            })
            .collect())
    }

    async fn search_records(&self, query: &RecordQuery) -> Result<Vec<DnsRecord>> {
        self.check_failure().await?;

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.zone == query.zone)
            .filter(|r| query.rr_keyword.as_ref().is_none_or(|k| r.rr.contains(k.as_str())))
            .filter(|r| query.record_type.is_none_or(|t| r.record_type == t))
            .filter(|r| {
                query
                    .value_keyword
                    .as_ref()
                    .is_none_or(|k| r.value.contains(k.as_str()))
            })
            .cloned()
            .collect())
    }

    async fn create_record(&self, req: &CreateDnsRecordRequest) -> Result<Option<String>> {
        self.check_failure().await?;
        if *self.omit_record_id.read().await {
            return Ok(None);
        }

        let id = self.allocate_id().await;
        self.records.write().await.push(DnsRecord {
            id: id.clone(),
            zone: req.zone.clone(),
            rr: req.rr.clone(),
            record_type: req.record_type,
            value: req.value.clone(),
            ttl: Some(req.ttl),
        });
        Ok(Some(id))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.check_failure().await?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        self.deleted_ids.write().await.push(record_id.to_string());
        Ok(())
    }
}
