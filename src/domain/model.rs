use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever the serialized `ProducerRecord` shape changes; cache
/// entries written by older builds are discarded on load.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Entries older than this suggest a background refresh.
pub const CACHE_FRESH_DAYS: i64 = 1;
/// Entries older than this are evicted on load.
pub const CACHE_EXPIRY_DAYS: i64 = 7;

/// Downtown Chicago, the reference point for synthesized coordinates.
pub const CITY_CENTER_LAT: f64 = 41.8781;
pub const CITY_CENTER_LNG: f64 = -87.6298;

/// Raw record from the business license registry. The upstream is a
/// Socrata-style endpoint: snake_case keys, numerics delivered as strings,
/// and almost everything optional. Bundled fallback entries additionally
/// carry hand-curated capability data that the registry itself never sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLicenseRecord {
    pub license_number: Option<String>,
    pub legal_name: Option<String>,
    pub doing_business_as_name: Option<String>,
    pub license_description: Option<String>,
    pub license_status: Option<String>,
    pub license_start_date: Option<String>,
    pub license_term_end_date: Option<String>,
    pub application_type: Option<String>,
    pub account_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub ward: Option<String>,
    pub naics_code: Option<String>,
    // Coordinates arrive in one of three conventions depending on the
    // dataset vintage: string latitude/longitude columns, a nested
    // location object, or bare lat/lng floats.
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<RawPoint>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub capabilities: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub availability_percent: Option<u8>,
    pub sustainability_score: Option<u8>,
    pub equipment: Option<Vec<String>>,
    pub sustainability_badges: Option<Vec<String>>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub verification_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl RawLicenseRecord {
    /// Trade name when present, legal name otherwise.
    pub fn display_name(&self) -> Option<&str> {
        self.doing_business_as_name
            .as_deref()
            .or(self.legal_name.as_deref())
    }
}

/// Raw point-of-interest record from the open geodata source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGeoRecord {
    pub id: String,
    pub name: String,
    /// Coarse tag in `key=value` form, e.g. `craft=printing`.
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    #[serde(default)]
    pub tags: GeoTags,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoTags {
    pub website: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub operator: Option<String>,
}

/// One source, one variant. Normalization dispatches on this, so a new data
/// source is a new variant plus one match arm.
#[derive(Debug, Clone)]
pub enum RawRecord {
    License(RawLicenseRecord),
    Geo(RawGeoRecord),
}

/// Canonical producer shape; the only thing callers ever see. Serialized
/// camelCase for the UI boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerRecord {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub reviews: u32,
    pub location: Location,
    pub distance: f32,
    pub capabilities: Vec<String>,
    pub specialties: Vec<String>,
    pub turnaround: String,
    pub price_range: String,
    pub availability_percent: u8,
    pub sustainability_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub wifi_enabled: bool,
    pub verification_sources: Vec<String>,
    pub last_verified: NaiveDate,
    pub naics_code: String,
    pub zoning_compliant: bool,
    pub sustainability_badges: Vec<String>,
    pub equipment: Vec<String>,
    pub economic_zones: Vec<String>,
    pub transit_access: TransitAccess,
    pub capacity: Capacity,
    pub scores: ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_data: Option<LicenseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osm_data: Option<OsmData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    pub address: String,
    pub neighborhood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industrial_corridor: Option<String>,
}

impl Location {
    pub fn has_finite_coords(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub trust: u8,
    pub capability: u8,
    pub accessibility: u8,
    pub sustainability: u8,
    pub equity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitAccess {
    pub truck_route: bool,
    pub public_transit: bool,
    pub bikeways: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub available_hours: u8,
    pub lead_time: String,
    pub max_size: String,
}

/// Present only on records that came through the license registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseData {
    pub license_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,
}

/// Present only on records that came through the geodata source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsmData {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub data_source: String,
}

/// The single cache slot. Created whole on every successful aggregation,
/// never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub records: Vec<ProducerRecord>,
}

impl CacheEntry {
    pub fn new(records: Vec<ProducerRecord>) -> Self {
        Self {
            version: CACHE_SCHEMA_VERSION,
            saved_at: Utc::now(),
            records,
        }
    }

    /// Old enough that a background refresh is worth suggesting.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at > Duration::days(CACHE_FRESH_DAYS)
    }

    /// Old enough to be treated as absent.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at > Duration::days(CACHE_EXPIRY_DAYS)
    }
}

/// Simple equality filters accepted by the license registry.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub limit: Option<usize>,
    pub zip_code: Option<String>,
    pub license_type: Option<String>,
    pub ward: Option<String>,
    pub where_clause: Option<String>,
}

impl QueryParams {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_staleness_windows() {
        let mut entry = CacheEntry::new(vec![]);
        let now = Utc::now();

        assert!(!entry.is_stale(now));
        assert!(!entry.is_expired(now));

        entry.saved_at = now - Duration::days(2);
        assert!(entry.is_stale(now));
        assert!(!entry.is_expired(now));

        entry.saved_at = now - Duration::days(8);
        assert!(entry.is_stale(now));
        assert!(entry.is_expired(now));
    }

    #[test]
    fn test_display_name_prefers_trade_name() {
        let record = RawLicenseRecord {
            legal_name: Some("ACME HOLDINGS LLC".to_string()),
            doing_business_as_name: Some("ACME PRINT".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), Some("ACME PRINT"));

        let record = RawLicenseRecord {
            legal_name: Some("ACME HOLDINGS LLC".to_string()),
            ..Default::default()
        };
        assert_eq!(record.display_name(), Some("ACME HOLDINGS LLC"));
    }

    #[test]
    fn test_license_record_deserializes_from_registry_json() {
        let json = r#"{
            "license_number": "2725431",
            "legal_name": "MIDAMERICAN PRINTING SYSTEMS, INC.",
            "doing_business_as_name": "MIDAMERICAN PRINTING SYSTEMS",
            "license_description": "Limited Business License",
            "zip_code": "60634",
            "ward": "38",
            "naics_code": "323111",
            "latitude": "41.9497",
            "longitude": "-87.8336"
        }"#;
        let record: RawLicenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.license_number.as_deref(), Some("2725431"));
        assert_eq!(record.latitude.as_deref(), Some("41.9497"));
        assert!(record.capabilities.is_none());
    }

    #[test]
    fn test_location_serializes_camel_case() {
        let location = Location {
            lat: 41.8781,
            lng: -87.6298,
            city: "Chicago".to_string(),
            address: "123 Main St".to_string(),
            neighborhood: "Downtown".to_string(),
            zip: Some("60601".to_string()),
            ward: Some("42".to_string()),
            industrial_corridor: Some("Central Chicago".to_string()),
        };
        let json = serde_json::to_string(&location).unwrap();
        assert!(json.contains("\"industrialCorridor\""));
        assert!(!json.contains("industrial_corridor"));
    }
}
