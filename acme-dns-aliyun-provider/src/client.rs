//! dns-01 TXT record management on top of a [`DnsProvider`].
//!
//! [`DnsClient`] turns "add/delete the challenge TXT record" into the provider's
//! zone and record primitives: guess the zone, compute the relative record name,
//! then create, or look up and delete, the record. Nothing is cached; the zone
//! is re-resolved on every call.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::DnsProvider;
use crate::types::{CreateDnsRecordRequest, DnsRecordType, RecordQuery};

/// TTL used for challenge records unless overridden.
pub const DEFAULT_TTL: u32 = 600;

/// Candidate zone names for `domain`, most specific first.
///
/// Every suffix of the name is a candidate, starting with the name itself:
/// `foo.example.com` gives `foo.example.com`, `example.com`, `com`. A name with
/// N labels yields exactly N candidates.
pub fn zone_name_guesses(domain: &str) -> Vec<String> {
    let domain = normalize_domain_name(domain);
    if domain.is_empty() {
        return Vec::new();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    (0..labels.len()).map(|i| labels[i..].join(".")).collect()
}

/// `record_name` relative to `zone`.
///
/// `_acme-challenge.foo.example.com` in `example.com` is `_acme-challenge.foo`.
/// Fails when the record does not sit strictly below the zone.
pub fn relative_record_name(record_name: &str, zone: &str) -> Result<String> {
    let name = normalize_domain_name(record_name);
    let zone = normalize_domain_name(zone);

    match name.strip_suffix(&format!(".{zone}")) {
        Some(rr) if !rr.is_empty() => Ok(rr.to_string()),
        _ => Err(ProviderError::InvalidParameter {
            provider: String::new(),
            param: "record_name".to_string(),
            detail: format!("'{record_name}' is not a record name under zone '{zone}'"),
        }),
    }
}

/// Adds and removes dns-01 challenge TXT records through a [`DnsProvider`].
#[derive(Clone)]
pub struct DnsClient {
    provider: Arc<dyn DnsProvider>,
    ttl: u32,
}

impl DnsClient {
    /// Create a client that writes records with [`DEFAULT_TTL`].
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self {
            provider,
            ttl: DEFAULT_TTL,
        }
    }

    /// Override the TTL of created records.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// TTL of created records, in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Resolve the hosted zone that `domain` belongs to.
    ///
    /// Tries each of [`zone_name_guesses`] in order and returns the first guess
    /// for which the provider's zone search contains an exact name match.
    /// Keyword (substring) matches are never accepted.
    pub async fn resolve_zone(&self, domain: &str) -> Result<String> {
        let guesses = zone_name_guesses(domain);

        for guess in &guesses {
            let zones = self.provider.search_zones(guess).await?;
            if zones
                .iter()
                .any(|zone| normalize_domain_name(&zone.name) == *guess)
            {
                log::debug!("[{}] Resolved zone '{guess}' for '{domain}'", self.provider.id());
                return Ok(guess.clone());
            }
        }

        Err(ProviderError::ZoneNotFound {
            provider: self.provider.id().to_string(),
            domain: domain.to_string(),
            guesses,
        })
    }

    /// Id of the record in `zone` whose relative name is exactly `rr`.
    ///
    /// `rr` and `value` are sent as search keywords along with the type filter;
    /// the result is then narrowed to an exact relative-name match.
    pub async fn find_record_id(
        &self,
        zone: &str,
        rr: &str,
        record_type: DnsRecordType,
        value: &str,
    ) -> Result<String> {
        let query = RecordQuery {
            zone: zone.to_string(),
            rr_keyword: Some(rr.to_string()),
            record_type: Some(record_type),
            value_keyword: Some(value.to_string()),
        };

        let records = self.provider.search_records(&query).await?;

        records
            .into_iter()
            .find(|record| record.rr == rr)
            .map(|record| record.id)
            .ok_or_else(|| ProviderError::RecordLookupFailed {
                provider: self.provider.id().to_string(),
                zone: zone.to_string(),
                rr: rr.to_string(),
                record_type: record_type.to_string(),
                value: value.to_string(),
            })
    }

    /// Create the TXT record `record_name` = `value` for a challenge on `domain`.
    ///
    /// The zone is resolved from `domain`, not from `record_name`.
    pub async fn add_txt_record(&self, domain: &str, record_name: &str, value: &str) -> Result<()> {
        let zone = self.resolve_zone(domain).await?;
        let rr = self.relative_name(record_name, &zone)?;

        let req = CreateDnsRecordRequest {
            zone,
            rr,
            record_type: DnsRecordType::Txt,
            value: value.to_string(),
            ttl: self.ttl,
        };

        match self.provider.create_record(&req).await? {
            Some(record_id) => {
                log::info!(
                    "Successfully added TXT record for {domain} with record name {record_name} \
                     and value {value}. Record ID: {record_id}."
                );
                Ok(())
            }
            None => Err(ProviderError::RecordCreationFailed {
                provider: self.provider.id().to_string(),
                domain: domain.to_string(),
                record_name: record_name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Delete the TXT record `record_name` = `value` created for `domain`.
    pub async fn del_txt_record(&self, domain: &str, record_name: &str, value: &str) -> Result<()> {
        let zone = self.resolve_zone(domain).await?;
        let rr = self.relative_name(record_name, &zone)?;
        let record_id = self
            .find_record_id(&zone, &rr, DnsRecordType::Txt, value)
            .await?;

        self.provider.delete_record(&record_id).await?;

        log::info!(
            "Successfully deleted TXT record for {domain} with record name {record_name}. \
             Record ID: {record_id}."
        );
        Ok(())
    }

    fn relative_name(&self, record_name: &str, zone: &str) -> Result<String> {
        relative_record_name(record_name, zone).map_err(|e| match e {
            ProviderError::InvalidParameter { param, detail, .. } => {
                ProviderError::InvalidParameter {
                    provider: self.provider.id().to_string(),
                    param,
                    detail,
                }
            }
            other => other,
        })
    }
}

impl std::fmt::Debug for DnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsClient")
            .field("provider", &self.provider.id())
            .field("ttl", &self.ttl)
            .finish()
    }
}
