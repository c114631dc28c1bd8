//! Normalization of raw source records into the canonical producer shape.
//!
//! Each source variant gets its own arm; shared derivations (equipment,
//! badges, scores) live in helpers below. Fields the source does not carry
//! are synthesized from fixed catalogs through the injected RNG so output
//! stays deterministic under a seeded generator.

use crate::core::coords;
use crate::domain::model::{
    Capacity, LicenseData, Location, OsmData, ProducerRecord, RawGeoRecord, RawLicenseRecord,
    RawRecord, ScoreBreakdown, TransitAccess,
};
use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

const EQUIPMENT_CATALOG: &[(&str, &[&str])] = &[
    (
        "Digital Printing",
        &[
            "HP Indigo 12000",
            "Xerox Versant 280",
            "Canon imagePRESS C10000VP",
            "Konica Minolta AccurioPress C14000",
        ],
    ),
    (
        "Offset Printing",
        &[
            "Heidelberg Speedmaster XL 106",
            "Komori Lithrone GL-840",
            "Ryobi 925",
            "Heidelberg GTO 52",
        ],
    ),
    (
        "Large Format Printing",
        &[
            "Roland TrueVIS VG3-640",
            "Epson SureColor S80600",
            "Canon Arizona 1380 GT",
            "HP Latex 800 W",
        ],
    ),
    (
        "Screen Printing",
        &[
            "M&R Sportsman EX",
            "M&R Diamondback",
            "Riley Hopkins 250",
            "Anatol Volt",
        ],
    ),
    (
        "Woodworking",
        &[
            "SawStop Cabinet Saw",
            "Powermatic 719T Mortiser",
            "Jet 1640EVS Wood Lathe",
            "Festool Domino XL DF 700",
        ],
    ),
    (
        "CNC Routing",
        &[
            "ShopBot PRSalpha",
            "Multicam 3000",
            "AXYZ CNC Router",
            "Anderson CNC Router",
        ],
    ),
    (
        "Laser Cutting",
        &[
            "Epilog Fusion Pro 48",
            "Trotec Speedy 400",
            "Universal Laser PLS6.150D",
            "Full Spectrum P-Series",
        ],
    ),
    (
        "3D Printing",
        &[
            "Formlabs Form 3",
            "Ultimaker S5",
            "Markforged Mark Two",
            "Stratasys F370",
        ],
    ),
    (
        "Metal Fabrication",
        &[
            "Miller TIG Welder",
            "OMAX Waterjet",
            "Haas CNC Mill",
            "Mazak INTEGREX",
        ],
    ),
    (
        "CNC Machining",
        &[
            "Haas VF-2",
            "Tormach PCNC 1100",
            "DMG MORI NLX 2500",
            "Mazak QUICK TURN 250MSY",
        ],
    ),
];

// Ward membership tables for city economic programs.
const TIF_WARDS: &[&str] = &["1", "2", "3", "4", "25", "27", "42"];
const ENTERPRISE_WARDS: &[&str] = &["24", "27", "28", "37", "38"];
const OPPORTUNITY_WARDS: &[&str] = &["3", "4", "6", "8", "16", "20", "21", "24"];
const NOF_WARDS: &[&str] = &["6", "8", "20", "21", "28", "34"];

const TURNAROUNDS: &[&str] = &[
    "2-3 business days",
    "3-5 business days",
    "5-7 business days",
];
const PRICE_TIERS: &[&str] = &["$", "$$", "$$$"];
const LEAD_TIMES: &[&str] = &["2-4 days", "3-5 days", "5-7 days"];
const MAX_SIZES: &[&str] = &["11 x 17 inches", "24 x 36 inches", "60 x 100 inches"];

/// Normalize one raw record. Coordinate repair runs last, so the output
/// always carries finite coordinates.
pub fn normalize<R: Rng + ?Sized>(raw: RawRecord, rng: &mut R) -> ProducerRecord {
    let mut record = match raw {
        RawRecord::License(license) => normalize_license(license, rng),
        RawRecord::Geo(geo) => normalize_geo(geo, rng),
    };
    coords::repair(&mut record, rng);
    record
}

fn normalize_license<R: Rng + ?Sized>(raw: RawLicenseRecord, rng: &mut R) -> ProducerRecord {
    let name = raw
        .display_name()
        .unwrap_or("Unnamed Chicago Producer")
        .to_string();

    let (lat, lng) = coords::resolve_raw_coords(&raw).unwrap_or((f64::NAN, f64::NAN));

    let (capabilities, specialties) = match (&raw.capabilities, &raw.specialties) {
        (Some(caps), specs) => (caps.clone(), specs.clone().unwrap_or_default()),
        _ => derive_capabilities(raw.naics_code.as_deref(), rng),
    };

    let availability_percent = raw
        .availability_percent
        .unwrap_or_else(|| rng.gen_range(0..100));
    let sustainability_score = raw
        .sustainability_score
        .unwrap_or_else(|| rng.gen_range(0..100));

    let sustainability_badges = raw
        .sustainability_badges
        .clone()
        .unwrap_or_else(|| badges_for(sustainability_score));

    let equipment = match &raw.equipment {
        Some(equipment) if !equipment.is_empty() => equipment.clone(),
        _ => equipment_for(&capabilities, rng),
    };

    let economic_zones = ward_zones(raw.ward.as_deref(), rng);

    let id = raw
        .license_number
        .clone()
        .unwrap_or_else(|| format!("CHI-{:04}", rng.gen_range(0..10000)));

    let email = raw
        .email
        .clone()
        .unwrap_or_else(|| format!("info@{}.com", mail_slug(&name)));
    let website = raw
        .website
        .clone()
        .or_else(|| Some(format!("https://www.{}.com", mail_slug(&name))));

    let last_verified = raw
        .license_term_end_date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Utc::now().date_naive());

    let license_data = raw.license_number.clone().map(|number| LicenseData {
        license_number: number,
        license_type: raw.license_description.clone(),
        issue_date: raw.license_start_date.clone(),
        expiration_date: raw.license_term_end_date.clone(),
        legal_name: raw.legal_name.clone(),
        state: raw.state.clone(),
        license_status: raw.license_status.clone(),
        application_type: raw.application_type.clone(),
    });

    let street = raw.address.clone().unwrap_or_default();
    let city = raw.city.clone().unwrap_or_else(|| "Chicago".to_string());
    let state = raw.state.clone().unwrap_or_else(|| "IL".to_string());
    let zip = raw.zip_code.clone();
    let address = format!(
        "{}, {}, {} {}",
        street,
        city,
        state,
        zip.as_deref().unwrap_or("")
    )
    .trim()
    .trim_end_matches(',')
    .to_string();

    let neighborhood = raw
        .ward
        .as_deref()
        .map(|ward| format!("Ward {}", ward))
        .unwrap_or_else(|| "Chicago".to_string());
    let industrial_corridor = raw
        .ward
        .as_deref()
        .map(|ward| format!("Chicago Ward {}", ward));

    ProducerRecord {
        id,
        name,
        rating: round1(3.0 + rng.gen::<f32>() * 2.0),
        reviews: rng.gen_range(0..50),
        location: Location {
            lat,
            lng,
            city: "Chicago".to_string(),
            address,
            neighborhood,
            zip,
            ward: raw.ward.clone(),
            industrial_corridor,
        },
        distance: round1(rng.gen::<f32>() * 10.0),
        capabilities,
        specialties,
        turnaround: pick(rng, TURNAROUNDS).to_string(),
        price_range: pick(rng, PRICE_TIERS).to_string(),
        availability_percent,
        sustainability_score,
        website,
        email: Some(email),
        wifi_enabled: rng.gen_bool(0.5),
        verification_sources: raw.verification_sources.clone().unwrap_or_else(|| {
            vec![
                "Chicago Business License".to_string(),
                "City Data Portal".to_string(),
            ]
        }),
        last_verified,
        naics_code: raw
            .naics_code
            .clone()
            .unwrap_or_else(|| "323111".to_string()),
        zoning_compliant: true,
        sustainability_badges,
        equipment,
        economic_zones,
        transit_access: transit_access(rng),
        capacity: capacity(rng),
        scores: scores(sustainability_score, rng),
        license_data,
        osm_data: None,
    }
}

fn normalize_geo<R: Rng + ?Sized>(raw: RawGeoRecord, rng: &mut R) -> ProducerRecord {
    let sustainability_score: u8 = rng.gen_range(60..100);
    let availability_percent: u8 = rng.gen_range(50..95);

    let economic_zones = coordinate_zones(raw.lat, raw.lng);
    let neighborhood = neighborhood_for(raw.lat, raw.lng);

    let zip = format!("606{:02}", rng.gen_range(0..40));
    let ward = rng.gen_range(1..=50).to_string();

    let capabilities = if raw.capabilities.is_empty() {
        vec!["Digital Fabrication".to_string()]
    } else {
        raw.capabilities.clone()
    };
    let specialties = if raw.specialties.is_empty() {
        vec!["Custom Manufacturing".to_string()]
    } else {
        raw.specialties.clone()
    };

    let equipment: Vec<String> = capabilities
        .iter()
        .take(3)
        .map(|capability| {
            format!(
                "{} {} System",
                pick(rng, &["Professional", "Industrial", "Commercial"]),
                capability
            )
        })
        .collect();
    let equipment = if equipment.is_empty() {
        vec!["Equipment information unavailable".to_string()]
    } else {
        equipment
    };

    let industrial_corridor = if neighborhood.contains("West") {
        "West Side Industrial Corridor"
    } else if neighborhood.contains("South") {
        "South Side Industrial Corridor"
    } else if neighborhood.contains("North") {
        "North Side Industrial Corridor"
    } else {
        "Central Chicago"
    };

    let last_verified = (Utc::now() - Duration::days(rng.gen_range(0..30))).date_naive();

    ProducerRecord {
        id: raw.id.clone(),
        name: raw.name.clone(),
        rating: round1(3.5 + rng.gen::<f32>() * 1.5),
        reviews: rng.gen_range(5..50),
        location: Location {
            lat: raw.lat,
            lng: raw.lng,
            city: "Chicago".to_string(),
            address: raw.address.clone(),
            neighborhood: neighborhood.to_string(),
            zip: Some(zip),
            ward: Some(ward),
            industrial_corridor: Some(industrial_corridor.to_string()),
        },
        distance: round1(rng.gen::<f32>() * 10.0),
        capabilities,
        specialties,
        turnaround: pick(rng, TURNAROUNDS).to_string(),
        price_range: pick(rng, PRICE_TIERS).to_string(),
        availability_percent,
        sustainability_score,
        website: raw.tags.website.clone(),
        email: Some(format!("info@{}.com", mail_slug(&raw.name))),
        wifi_enabled: rng.gen_bool(0.5),
        verification_sources: vec![
            "OpenStreetMap".to_string(),
            "Community Verified".to_string(),
        ],
        last_verified,
        naics_code: naics_for_kind(&raw.kind).to_string(),
        zoning_compliant: true,
        sustainability_badges: badges_for(sustainability_score),
        equipment,
        economic_zones,
        transit_access: transit_access(rng),
        capacity: capacity(rng),
        scores: scores(sustainability_score, rng),
        license_data: None,
        osm_data: Some(OsmData {
            kind: raw.kind.clone(),
            opening_hours: raw.tags.opening_hours.clone(),
            phone: raw.tags.phone.clone(),
            data_source: "OpenStreetMap".to_string(),
        }),
    }
}

/// Capability/specialty derivation from the NAICS classification family.
fn derive_capabilities<R: Rng + ?Sized>(
    naics: Option<&str>,
    rng: &mut R,
) -> (Vec<String>, Vec<String>) {
    match naics {
        Some(code) if code.starts_with("323") => (
            sample(
                rng,
                &["Digital Printing", "Offset Printing", "Large Format Printing"],
                0.7,
            ),
            sample(
                rng,
                &[
                    "Business Cards",
                    "Brochures",
                    "Banners",
                    "Flyers",
                    "Posters",
                    "Signs",
                    "Catalogs",
                ],
                0.5,
            ),
        ),
        Some(code) if code.starts_with("321") => (
            to_owned(&["Woodworking", "CNC Routing", "Furniture Production", "Laser Cutting"]),
            to_owned(&[
                "Custom Furniture",
                "Cabinetry",
                "Wood Signage",
                "Architectural Millwork",
                "Small Batch Production",
            ]),
        ),
        Some(code) if code.starts_with("332") => (
            to_owned(&["Metal Fabrication", "Welding", "CNC Machining", "Sheet Metal Work"]),
            to_owned(&[
                "Custom Metal Parts",
                "Structural Components",
                "Metal Signs",
                "Art Installations",
                "Prototypes",
            ]),
        ),
        Some(_) => (
            sample(
                rng,
                &["Digital Printing", "3D Printing", "Laser Cutting", "CNC Machining"],
                0.5,
            ),
            sample(
                rng,
                &["Prototypes", "Small Batch Production", "Custom Products", "Signage"],
                0.5,
            ),
        ),
        None => (
            sample(rng, &["Digital Printing", "Offset Printing"], 0.5),
            sample(
                rng,
                &["Business Cards", "Brochures", "Banners", "Flyers", "Posters"],
                0.4,
            ),
        ),
    }
}

/// One random catalog machine per capability, deduplicated, with a
/// guaranteed single pick when no capability maps.
fn equipment_for<R: Rng + ?Sized>(capabilities: &[String], rng: &mut R) -> Vec<String> {
    let mut equipment: Vec<String> = Vec::new();

    for capability in capabilities {
        if let Some((_, machines)) = EQUIPMENT_CATALOG
            .iter()
            .find(|(name, _)| name == capability)
        {
            let machine = pick(rng, machines).to_string();
            if !equipment.contains(&machine) {
                equipment.push(machine);
            }
        }
    }

    if equipment.is_empty() {
        let (_, machines) = EQUIPMENT_CATALOG[rng.gen_range(0..EQUIPMENT_CATALOG.len())];
        equipment.push(pick(rng, machines).to_string());
    }

    equipment
}

/// Ward-table membership; a coin-flip extra zone keeps wards outside every
/// table from always reading as zone-free.
fn ward_zones<R: Rng + ?Sized>(ward: Option<&str>, rng: &mut R) -> Vec<String> {
    let mut zones = Vec::new();
    if let Some(ward) = ward {
        if TIF_WARDS.contains(&ward) {
            zones.push("TIF District".to_string());
        }
        if ENTERPRISE_WARDS.contains(&ward) {
            zones.push("Enterprise Zone".to_string());
        }
        if OPPORTUNITY_WARDS.contains(&ward) {
            zones.push("Opportunity Zone".to_string());
        }
        if NOF_WARDS.contains(&ward) {
            zones.push("Neighborhood Opportunity Fund".to_string());
        }
    }

    if zones.is_empty() && rng.gen_bool(0.3) {
        zones.push(
            pick(rng, &["TIF District", "Enterprise Zone", "Opportunity Zone"]).to_string(),
        );
    }

    zones
}

/// Zone membership for geodata records, derived from coordinate bands
/// rather than wards.
fn coordinate_zones(lat: f64, lng: f64) -> Vec<String> {
    let mut zones = Vec::new();
    if lat < 41.85 || lng < -87.65 {
        zones.push("Opportunity Zone".to_string());
    }
    if (41.87..41.90).contains(&lat) && (-87.64..-87.62).contains(&lng) {
        zones.push("TIF District".to_string());
    }
    if (lat > 41.91 && lng < -87.69) || lat > 41.95 {
        zones.push("Enterprise Zone".to_string());
    }
    zones
}

fn neighborhood_for(lat: f64, lng: f64) -> &'static str {
    if lat > 41.95 {
        "Rogers Park/Edgewater"
    } else if lat > 41.92 {
        "Lincoln Square/Ravenswood"
    } else if lat > 41.90 && lng < -87.67 {
        "Logan Square/Humboldt Park"
    } else if lat > 41.90 {
        "Lakeview/Lincoln Park"
    } else if lat > 41.87 && lng < -87.65 {
        "West Loop/Near West Side"
    } else if lat > 41.87 {
        "Downtown/River North"
    } else if lat > 41.83 && lng < -87.65 {
        "Pilsen/Bridgeport"
    } else if lat > 41.83 {
        "South Loop/Bronzeville"
    } else {
        "South Side"
    }
}

fn naics_for_kind(kind: &str) -> &'static str {
    if kind.contains("printing") {
        "323111"
    } else if kind.contains("metal") {
        "332000"
    } else if kind.contains("makerspace") {
        "541990"
    } else if kind.contains("workshop") {
        "339999"
    } else {
        "323999"
    }
}

/// Badge bands over the sustainability score.
fn badges_for(score: u8) -> Vec<String> {
    if score > 90 {
        vec!["Green Certified".to_string(), "Carbon Neutral".to_string()]
    } else if score > 80 {
        vec!["Recycled Materials".to_string()]
    } else if score > 70 {
        vec!["Energy Efficient".to_string()]
    } else {
        vec![]
    }
}

fn scores<R: Rng + ?Sized>(sustainability: u8, rng: &mut R) -> ScoreBreakdown {
    ScoreBreakdown {
        trust: rng.gen_range(70..100),
        capability: rng.gen_range(60..100),
        accessibility: rng.gen_range(60..100),
        sustainability,
        equity: rng.gen_range(60..100),
    }
}

fn transit_access<R: Rng + ?Sized>(rng: &mut R) -> TransitAccess {
    TransitAccess {
        truck_route: rng.gen_bool(0.5),
        public_transit: rng.gen_bool(0.7),
        bikeways: rng.gen_bool(0.4),
    }
}

fn capacity<R: Rng + ?Sized>(rng: &mut R) -> Capacity {
    Capacity {
        available_hours: rng.gen_range(0..40),
        lead_time: pick(rng, LEAD_TIMES).to_string(),
        max_size: pick(rng, MAX_SIZES).to_string(),
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn sample<R: Rng + ?Sized>(rng: &mut R, items: &[&str], keep_probability: f64) -> Vec<String> {
    items
        .iter()
        .filter(|_| rng.gen_bool(keep_probability))
        .map(|s| s.to_string())
        .collect()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mail_slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if slug.is_empty() {
        "chicagoprinting".to_string()
    } else {
        slug
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
