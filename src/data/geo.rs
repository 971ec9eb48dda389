use serde::Deserialize;

// ---------------------------------------------------------------------------
// GeoJSON model – only the pieces the choropleth needs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<serde_json::Value>,
    // Some exports carry `"properties": null`.
    #[serde(default)]
    properties: Option<Properties>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default, alias = "ISO_A3", alias = "iso_a3", alias = "ADM0_A3")]
    code: Option<String>,
    #[serde(default, alias = "NAME", alias = "ADMIN", alias = "admin")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// One country reduced to its outer polygon rings ([lon, lat] vertices).
#[derive(Debug, Clone)]
pub struct CountryShape {
    pub code: String,
    pub name: String,
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// Parse a GeoJSON feature collection into country shapes. Features without
/// an ISO code or a polygonal geometry are skipped without error.
pub fn parse_countries(text: &str) -> Result<Vec<CountryShape>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(text)?;

    let mut shapes = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let properties = feature.properties.unwrap_or_default();
        let code = properties
            .code
            .or_else(|| match feature.id {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let Some(code) = code else { continue };

        let rings = match feature.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                // First ring is the exterior; holes are not drawn.
                coordinates.into_iter().take(1).collect()
            }
            Some(Geometry::MultiPolygon { coordinates }) => coordinates
                .into_iter()
                .filter_map(|poly| poly.into_iter().next())
                .collect(),
            _ => continue,
        };

        let name = properties.name.unwrap_or_else(|| code.clone());
        shapes.push(CountryShape { code, name, rings });
    }
    Ok(shapes)
}

/// Ray-casting point-in-polygon test over a country's rings.
pub fn contains(shape: &CountryShape, lon: f64, lat: f64) -> bool {
    shape.rings.iter().any(|ring| ring_contains(ring, lon, lat))
}

fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "KWT",
                "properties": { "name": "Kuwait" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[46.5, 28.5], [48.5, 28.5], [48.5, 30.0], [46.5, 30.0], [46.5, 28.5]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "ISO_A3": "NZL", "NAME": "New Zealand" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[166.0, -47.0], [174.0, -47.0], [174.0, -40.0], [166.0, -40.0], [166.0, -47.0]]],
                        [[[172.0, -41.0], [179.0, -41.0], [179.0, -34.0], [172.0, -34.0], [172.0, -41.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }
        ]
    }"#;

    #[test]
    fn parses_polygons_and_skips_featureless_entries() {
        let shapes = parse_countries(SAMPLE).unwrap();
        assert_eq!(shapes.len(), 2);

        let kwt = &shapes[0];
        assert_eq!(kwt.code, "KWT");
        assert_eq!(kwt.name, "Kuwait");
        assert_eq!(kwt.rings.len(), 1);

        let nzl = &shapes[1];
        assert_eq!(nzl.code, "NZL");
        assert_eq!(nzl.rings.len(), 2);
    }

    #[test]
    fn point_in_polygon() {
        let shapes = parse_countries(SAMPLE).unwrap();
        let kwt = &shapes[0];
        assert!(contains(kwt, 47.5, 29.2));
        assert!(!contains(kwt, 44.0, 29.2));
        let nzl = &shapes[1];
        assert!(contains(nzl, 170.0, -43.0));
        assert!(contains(nzl, 175.0, -38.0));
        assert!(!contains(nzl, 160.0, -43.0));
    }

    #[test]
    fn malformed_geojson_is_an_error() {
        assert!(parse_countries("{ not json").is_err());
    }
}
