use serde::{Deserialize, Serialize};

// ============ Zones ============

/// A hosted zone registered with the DNS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderZone {
    /// Provider-specific zone identifier, if the API returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
}

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"TXT"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record. The only type dns-01 challenges need.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
        Self::Caa,
    ];

    /// Parse a wire name, ignoring ASCII case.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Wire representation used by the provider API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Records ============

/// A DNS record as returned by a provider record search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Zone the record belongs to.
    pub zone: String,
    /// Record name relative to the zone (e.g., `"_acme-challenge.www"`).
    pub rr: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record value.
    pub value: String,
    /// Time to live in seconds, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Filter for a record search inside a single zone.
///
/// `rr_keyword` and `value_keyword` are provider-side *keyword* filters and may
/// match more than the exact name/value; callers filter the results again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    /// Zone to search in.
    pub zone: String,
    /// Relative record name keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rr_keyword: Option<String>,
    /// Record type filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
    /// Record value keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_keyword: Option<String>,
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDnsRecordRequest {
    /// Zone to create the record in.
    pub zone: String,
    /// Record name relative to the zone.
    pub rr: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record value.
    pub value: String,
    /// Time to live in seconds.
    pub ttl: u32,
}
