//! Open geodata source: a curated point-of-interest set standing in for an
//! Overpass-style query of maker spaces, workshops, and craft producers.
//! In-process and infallible; a production deployment would swap the body
//! of `sites()` for a network call behind the same signature.

use crate::domain::model::{GeoTags, RawGeoRecord, RawRecord};
use crate::domain::ports::ProducerSource;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeoCatalog;

impl GeoCatalog {
    pub fn new() -> Self {
        Self
    }

    /// The curated site list. Always succeeds.
    pub fn sites(&self) -> Vec<RawGeoRecord> {
        curated_sites()
    }
}

#[async_trait]
impl ProducerSource for GeoCatalog {
    fn name(&self) -> &'static str {
        "open-geodata"
    }

    async fn fetch(&self, limit: usize) -> Vec<RawRecord> {
        self.sites()
            .into_iter()
            .take(limit)
            .map(RawRecord::Geo)
            .collect()
    }
}

fn site(
    id: &str,
    name: &str,
    kind: &str,
    lat: f64,
    lng: f64,
    address: &str,
    capabilities: &[&str],
    specialties: &[&str],
) -> RawGeoRecord {
    RawGeoRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        lat,
        lng,
        address: address.to_string(),
        tags: GeoTags::default(),
        capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
    }
}

fn tags(website: Option<&str>, phone: Option<&str>, opening_hours: Option<&str>) -> GeoTags {
    GeoTags {
        website: website.map(|s| s.to_string()),
        phone: phone.map(|s| s.to_string()),
        opening_hours: opening_hours.map(|s| s.to_string()),
        operator: None,
    }
}

fn curated_sites() -> Vec<RawGeoRecord> {
    vec![
        RawGeoRecord {
            tags: tags(
                Some("https://www.spudnikpress.org"),
                Some("+1-312-563-0302"),
                Some("Mo-Fr 12:00-17:00; Sa 12:00-16:00"),
            ),
            ..site(
                "osm-1",
                "Spudnik Press Cooperative",
                "craft=printing",
                41.8898,
                -87.6726,
                "1821 W Hubbard St, Suite 302, Chicago, IL 60622",
                &["Letterpress", "Screen Printing", "Relief Printing", "Intaglio", "Risograph"],
                &["Art Prints", "Limited Editions", "Teaching", "Artist Residencies", "Print Publishing"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://mhubchicago.com"), Some("+1-312-248-8701"), None),
            ..site(
                "osm-2",
                "mHUB Chicago",
                "amenity=makerspace",
                41.8962,
                -87.6519,
                "965 W Chicago Ave, Chicago, IL 60642",
                &["3D Printing", "CNC Machining", "Metal Fabrication", "Laser Cutting", "Electronics Prototyping"],
                &["Hardware Prototyping", "Product Development", "Small Batch Manufacturing", "Startup Incubation"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://www.chicagoprintmakers.com"),
                Some("+1-773-293-2070"),
                None,
            ),
            ..site(
                "osm-3",
                "Chicago Printmakers Collaborative",
                "craft=printing",
                41.9309,
                -87.7006,
                "4912 N Western Ave, Chicago, IL 60625",
                &["Letterpress", "Screen Printing", "Relief Printing", "Lithography", "Monotype"],
                &["Fine Art Prints", "Printmaking Classes", "Artist Studio Space", "Print Exhibitions"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://pumpingstationone.org"),
                None,
                Some("Mo-Su 00:00-24:00"),
            ),
            ..site(
                "osm-4",
                "Pumping Station: One",
                "amenity=makerspace",
                41.9456,
                -87.7039,
                "3519 N Elston Ave, Chicago, IL 60618",
                &["Woodworking", "Metal Shop", "Laser Cutting", "3D Printing", "Electronics"],
                &["Member Workshop", "Skill Sharing", "Community Projects", "Classes", "Rapid Prototyping"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://www.thewasteshed.com"),
                Some("+1-773-666-0450"),
                Some("We-Su 12:00-18:00"),
            ),
            ..site(
                "osm-5",
                "The WasteShed",
                "shop=art",
                41.9401,
                -87.7094,
                "2842 W Chicago Ave, Chicago, IL 60622",
                &["Material Reuse", "Art Supplies", "Sustainable Materials", "Creative Reuse"],
                &["Reclaimed Materials", "Sustainable Art Supplies", "Education", "Artist Resources"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://www.ciadc.org"), Some("+1-773-961-8498"), None),
            ..site(
                "osm-6",
                "Chicago Industrial Arts & Design Center",
                "amenity=workshop",
                42.0020,
                -87.6743,
                "6433 N Ravenswood Ave, Chicago, IL 60626",
                &["Metal Casting", "Woodworking", "Metalworking", "Ceramics", "Jewelry Making"],
                &["Fine Arts", "Industrial Design", "Sculpture", "Classes", "Studio Access"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://werkflowchicago.com"), Some("+1-312-846-6425"), None),
            ..site(
                "osm-7",
                "Werkflow Chicago",
                "craft=fabrication",
                41.8920,
                -87.6534,
                "444 N Wabash Ave, Chicago, IL 60611",
                &["CNC Machining", "Laser Cutting", "3D Printing", "Digital Fabrication", "Wood Fabrication"],
                &["Architectural Models", "Custom Furniture", "Signage", "Commercial Fabrication", "Product Design"],
            )
        },
        RawGeoRecord {
            tags: GeoTags {
                website: Some("https://polsky.uchicago.edu/fab-lab/".to_string()),
                operator: Some("University of Chicago".to_string()),
                ..Default::default()
            },
            ..site(
                "osm-8",
                "Polsky Fab Lab - University of Chicago",
                "amenity=makerspace",
                41.7993,
                -87.5900,
                "1452 E 53rd St, Chicago, IL 60615",
                &["3D Printing", "Laser Cutting", "CNC Milling", "Electronics Prototyping", "Design Software"],
                &["Academic Research", "Entrepreneurship", "Rapid Prototyping", "Product Development", "Education"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://chicagowoodworking.com"),
                Some("+1-773-945-1976"),
                None,
            ),
            ..site(
                "osm-9",
                "Chicago School of Woodworking",
                "craft=carpenter",
                41.9262,
                -87.7074,
                "3110 N Kedzie Ave, Chicago, IL 60618",
                &["Woodworking", "Furniture Making", "Wood Turning", "Cabinet Making", "Finishing"],
                &["Woodworking Classes", "Furniture Design", "Custom Furniture", "Small Batch Production"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://sshchicago.org"),
                None,
                Some("Mo-Su 00:00-24:00; members only"),
            ),
            ..site(
                "osm-10",
                "South Side Hackerspace Chicago",
                "amenity=hackerspace",
                41.7644,
                -87.5914,
                "7231 S Dorchester Ave, Chicago, IL 60619",
                &["3D Printing", "Laser Cutting", "Electronics", "Woodworking", "Computer Programming"],
                &["Community Projects", "Skill Sharing", "STEM Education", "Rapid Prototyping"],
            )
        },
        RawGeoRecord {
            tags: tags(None, Some("+1-773-384-2995"), None),
            ..site(
                "osm-12",
                "Metal Magic Inc",
                "craft=metal_construction",
                41.9095,
                -87.7139,
                "2107 N Pulaski Rd, Chicago, IL 60639",
                &["Metal Fabrication", "Welding", "CNC Plasma Cutting", "Sheet Metal", "Steel Fabrication"],
                &["Custom Metal Products", "Architectural Metals", "Ornamental Iron", "Structural Steel"],
            )
        },
        RawGeoRecord {
            tags: GeoTags {
                website: Some("https://www.chipublib.org/maker-lab/".to_string()),
                operator: Some("Chicago Public Library".to_string()),
                ..Default::default()
            },
            ..site(
                "osm-13",
                "Chicago Public Library Maker Lab",
                "amenity=library;makerspace",
                41.8769,
                -87.6285,
                "400 S State St, Chicago, IL 60605",
                &["3D Printing", "Laser Cutting", "Digital Design", "Electronics", "Vinyl Cutting"],
                &["Public Access", "Educational Workshops", "Free Programs", "Community Making"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://methodmill.com"), Some("+1-312-243-1155"), None),
            ..site(
                "osm-14",
                "Method Mill Chicago",
                "craft=fabrication",
                41.8835,
                -87.6564,
                "1407 W Carroll Ave, Chicago, IL 60607",
                &["CNC Machining", "Wood Fabrication", "Custom Millwork", "Digital Fabrication", "Design Services"],
                &["Architectural Millwork", "Commercial Interiors", "Custom Furniture", "Retail Fixtures"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://lillstreet.com"), Some("+1-773-769-4226"), None),
            ..site(
                "osm-15",
                "Lillstreet Art Center",
                "amenity=arts_centre",
                41.9761,
                -87.6690,
                "4401 N Ravenswood Ave, Chicago, IL 60640",
                &["Ceramics", "Metalsmithing", "Textiles", "Printmaking", "Glass Working"],
                &["Art Classes", "Studio Space", "Artist Residencies", "Exhibitions", "Handmade Products"],
            )
        },
        RawGeoRecord {
            tags: tags(
                Some("https://www.rebuildingexchange.org"),
                Some("+1-773-252-2234"),
                None,
            ),
            ..site(
                "osm-16",
                "Rebuilding Exchange",
                "shop=second_hand",
                41.9218,
                -87.6714,
                "1740 W Webster Ave, Chicago, IL 60614",
                &["Woodworking", "Furniture Making", "Material Reuse", "Salvaged Materials", "Building Materials"],
                &["Reclaimed Furniture", "Sustainable Design", "DIY Workshops", "Green Building Materials"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://www.inventables.com"), Some("+1-312-775-7009"), None),
            ..site(
                "osm-17",
                "Inventables",
                "shop=tools",
                41.9051,
                -87.6346,
                "600 W Chicago Ave, Chicago, IL 60654",
                &["CNC Routing", "Laser Cutting", "3D Printing", "Digital Fabrication", "CAD/CAM Software"],
                &["DIY CNC Machines", "Maker Tools", "Fabrication Materials", "Design Software"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://lasercutchicago.com"), Some("+1-312-469-0059"), None),
            ..site(
                "osm-19",
                "Lasercut Chicago",
                "craft=laser_cutting",
                41.8849,
                -87.6527,
                "1000 N Milwaukee Ave, Chicago, IL 60642",
                &["Laser Cutting", "Laser Engraving", "CNC Routing", "Digital Fabrication", "Material Sourcing"],
                &["Custom Signage", "Architectural Models", "Product Prototypes", "Acrylic Fabrication", "Wood Products"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://thirdcoasttoolworks.com"), None, None),
            ..site(
                "osm-20",
                "Third Coast Toolworks",
                "craft=carpenter",
                41.9191,
                -87.7072,
                "3031 N Rockwell St, Chicago, IL 60618",
                &["Woodworking", "Custom Furniture", "Wood Turning", "Cabinet Making", "Woodworking Tools"],
                &["Fine Furniture", "Custom Cabinetry", "Woodworking Classes", "Tool Development"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://metropolissigns.com"), Some("+1-773-661-0433"), None),
            ..site(
                "osm-24",
                "Metropolis Signs",
                "craft=signmaker",
                41.9211,
                -87.7044,
                "2841 N Western Ave, Chicago, IL 60618",
                &["Sign Manufacturing", "LED Signage", "Channel Letters", "Vinyl Graphics", "Metal Fabrication"],
                &["Commercial Signage", "Custom Signs", "Architectural Signage", "Indoor/Outdoor Signs"],
            )
        },
        RawGeoRecord {
            tags: tags(Some("https://sculpturalglass.com"), Some("+1-312-265-1434"), None),
            ..site(
                "osm-30",
                "Sculptural Glass Chicago",
                "craft=glass",
                41.8804,
                -87.6608,
                "1050 N Kingsbury St, Chicago, IL 60642",
                &["Glass Blowing", "Glass Casting", "Kiln Forming", "Glass Cutting", "Cold Working"],
                &["Architectural Glass", "Art Glass", "Custom Lighting", "Glass Sculpture", "Installation Art"],
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_are_well_formed() {
        let sites = GeoCatalog::new().sites();
        assert!(sites.len() >= 15);
        for s in &sites {
            assert!(!s.name.is_empty());
            assert!(s.lat.is_finite() && s.lng.is_finite());
            assert!(s.kind.contains('='));
            assert!(!s.capabilities.is_empty());
        }
    }

    #[test]
    fn test_site_ids_are_unique() {
        let sites = GeoCatalog::new().sites();
        let mut ids: Vec<_> = sites.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), sites.len());
    }

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let catalog = GeoCatalog::new();
        let records = ProducerSource::fetch(&catalog, 3).await;
        assert_eq!(records.len(), 3);
    }
}
