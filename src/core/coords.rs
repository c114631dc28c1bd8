use crate::domain::model::{
    ProducerRecord, RawLicenseRecord, CITY_CENTER_LAT, CITY_CENTER_LNG,
};
use rand::Rng;

/// Synthesized points land within this many degrees of the city center.
const JITTER_DEGREES: f64 = 0.05;

/// Pull coordinates out of a raw license record, trying the three
/// conventions the registry has shipped over the years: a nested location
/// object, string latitude/longitude columns, bare lat/lng floats.
pub fn resolve_raw_coords(record: &RawLicenseRecord) -> Option<(f64, f64)> {
    if let Some(point) = &record.location {
        if let (Some(lat), Some(lng)) = (point.lat, point.lng) {
            if lat.is_finite() && lng.is_finite() {
                return Some((lat, lng));
            }
        }
    }

    if let (Some(lat_str), Some(lng_str)) = (&record.latitude, &record.longitude) {
        if let (Ok(lat), Ok(lng)) = (lat_str.parse::<f64>(), lng_str.parse::<f64>()) {
            if lat.is_finite() && lng.is_finite() {
                return Some((lat, lng));
            }
        }
    }

    if let (Some(lat), Some(lng)) = (record.lat, record.lng) {
        if lat.is_finite() && lng.is_finite() {
            return Some((lat, lng));
        }
    }

    None
}

/// A plausible point near the city center.
pub fn synthesize_point<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (
        CITY_CENTER_LAT + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
        CITY_CENTER_LNG + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
    )
}

/// Ensure the record carries finite coordinates, synthesizing a fallback
/// point when it does not. Idempotent; never fails. Repairs are logged,
/// not surfaced.
pub fn repair<R: Rng + ?Sized>(record: &mut ProducerRecord, rng: &mut R) {
    if record.location.has_finite_coords() {
        return;
    }

    tracing::warn!(
        "No valid coordinates for {}, synthesizing near city center",
        record.name
    );
    let (lat, lng) = synthesize_point(rng);
    record.location.lat = lat;
    record.location.lng = lng;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawPoint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_with_strings(lat: &str, lng: &str) -> RawLicenseRecord {
        RawLicenseRecord {
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_prefers_nested_location() {
        let mut record = record_with_strings("41.9497", "-87.8336");
        record.location = Some(RawPoint {
            lat: Some(41.0),
            lng: Some(-87.0),
        });
        assert_eq!(resolve_raw_coords(&record), Some((41.0, -87.0)));
    }

    #[test]
    fn test_resolve_parses_string_columns() {
        let record = record_with_strings("41.9497", "-87.8336");
        assert_eq!(resolve_raw_coords(&record), Some((41.9497, -87.8336)));
    }

    #[test]
    fn test_resolve_falls_back_to_bare_floats() {
        let record = RawLicenseRecord {
            lat: Some(41.88),
            lng: Some(-87.63),
            ..Default::default()
        };
        assert_eq!(resolve_raw_coords(&record), Some((41.88, -87.63)));
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        assert_eq!(resolve_raw_coords(&record_with_strings("n/a", "-87.63")), None);
        assert_eq!(resolve_raw_coords(&RawLicenseRecord::default()), None);
    }

    #[test]
    fn test_synthesized_point_stays_near_center() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (lat, lng) = synthesize_point(&mut rng);
            assert!((lat - CITY_CENTER_LAT).abs() <= JITTER_DEGREES);
            assert!((lng - CITY_CENTER_LNG).abs() <= JITTER_DEGREES);
        }
    }
}
