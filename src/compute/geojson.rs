//! GeoJSON conversion for cluster input and cell output.

use crate::cell::bounds;
use crate::compute::validation::validate_polygon;
use crate::error::{Result, UnlError};
use geo::{Coord, LineString, MapCoords, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::Map;

/// Polygon accepted by the cluster engine.
///
/// Raw rings and GeoJSON geometries and features are `[lon, lat]`.
/// FeatureCollection positions are `[lat, lon]` and get swapped.
#[derive(Debug, Clone)]
pub enum PolygonInput {
    /// Exterior ring of `[lon, lat]` positions, closed or open
    Ring(Vec<[f64; 2]>),
    Polygon(Polygon<f64>),
    /// Every part is decomposed on its own and the results merged
    MultiPolygon(MultiPolygon<f64>),
    /// Polygon or MultiPolygon geometry, a Feature wrapping one, or a
    /// FeatureCollection of which only the first feature is used, with its
    /// positions read as `[lat, lon]`
    GeoJson(GeoJson),
}

impl From<Vec<[f64; 2]>> for PolygonInput {
    fn from(ring: Vec<[f64; 2]>) -> Self {
        PolygonInput::Ring(ring)
    }
}

impl From<Polygon<f64>> for PolygonInput {
    fn from(polygon: Polygon<f64>) -> Self {
        PolygonInput::Polygon(polygon)
    }
}

impl From<MultiPolygon<f64>> for PolygonInput {
    fn from(polygons: MultiPolygon<f64>) -> Self {
        PolygonInput::MultiPolygon(polygons)
    }
}

impl From<GeoJson> for PolygonInput {
    fn from(geojson: GeoJson) -> Self {
        PolygonInput::GeoJson(geojson)
    }
}

impl PolygonInput {
    /// Parses a GeoJSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use unl_core::compute::geojson::PolygonInput;
    ///
    /// let json = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;
    /// let polygons = PolygonInput::from_geojson_str(json)?.into_polygons()?;
    /// assert_eq!(polygons.len(), 1);
    /// # Ok::<(), unl_core::UnlError>(())
    /// ```
    pub fn from_geojson_str(geojson: &str) -> Result<Self> {
        let parsed: GeoJson = geojson
            .parse()
            .map_err(|e| UnlError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;
        Ok(PolygonInput::GeoJson(parsed))
    }

    /// Normalises the input into validated simple polygons.
    pub fn into_polygons(self) -> Result<Vec<Polygon<f64>>> {
        let polygons = match self {
            PolygonInput::Ring(ring) => {
                if ring.len() < 3 {
                    return Err(UnlError::InvalidInput(format!(
                        "Ring must have at least 3 positions, got {}",
                        ring.len()
                    )));
                }
                let coords: Vec<Coord<f64>> =
                    ring.iter().map(|p| Coord { x: p[0], y: p[1] }).collect();
                vec![Polygon::new(LineString::from(coords), vec![])]
            }
            PolygonInput::Polygon(polygon) => vec![polygon],
            PolygonInput::MultiPolygon(polygons) => polygons.0,
            PolygonInput::GeoJson(geojson) => polygons_from_geojson(geojson)?,
        };

        for (index, polygon) in polygons.iter().enumerate() {
            if let Err(e) = validate_polygon(polygon) {
                log::warn!("Rejecting polygon {} of cluster input: {}", index, e);
                return Err(e);
            }
        }
        Ok(polygons)
    }
}

fn polygons_from_geojson(geojson: GeoJson) -> Result<Vec<Polygon<f64>>> {
    match geojson {
        GeoJson::Geometry(geometry) => polygons_from_geometry(geometry),
        GeoJson::Feature(feature) => polygons_from_feature(feature),
        GeoJson::FeatureCollection(collection) => match collection.features.into_iter().next() {
            Some(feature) => Ok(polygons_from_feature(feature)?
                .iter()
                .map(|polygon| polygon.map_coords(|Coord { x, y }| Coord { x: y, y: x }))
                .collect()),
            None => Ok(Vec::new()),
        },
    }
}

fn polygons_from_feature(feature: Feature) -> Result<Vec<Polygon<f64>>> {
    let geometry = feature
        .geometry
        .ok_or_else(|| UnlError::InvalidInput("Feature has no geometry".to_string()))?;
    polygons_from_geometry(geometry)
}

fn polygons_from_geometry(geometry: Geometry) -> Result<Vec<Polygon<f64>>> {
    match geometry.value {
        Value::Polygon(rings) => Ok(vec![polygon_from_rings(&rings)?]),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| polygon_from_rings(rings))
            .collect(),
        other => Err(UnlError::InvalidInput(format!(
            "GeoJSON geometry is not a Polygon or MultiPolygon: {}",
            geometry_name(&other)
        ))),
    }
}

fn geometry_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn ring_from_positions(positions: &[Vec<f64>]) -> Result<LineString<f64>> {
    if positions.len() < 3 {
        return Err(UnlError::InvalidInput(format!(
            "Ring must have at least 3 positions, got {}",
            positions.len()
        )));
    }
    positions
        .iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(UnlError::InvalidInput(
                    "Coordinate must have at least 2 values".to_string(),
                ));
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::from)
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
    let Some((exterior, interiors)) = rings.split_first() else {
        return Err(UnlError::InvalidInput(
            "Polygon must have at least one ring".to_string(),
        ));
    };
    let exterior = ring_from_positions(exterior)?;
    let interiors = interiors
        .iter()
        .map(|ring| ring_from_positions(ring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn cell_feature(cell_id: &str) -> Result<Feature> {
    let cell_bounds = bounds(cell_id)?;
    let polygon = cell_bounds.to_polygon();
    let ring: Vec<Vec<f64>> = polygon
        .exterior()
        .coords()
        .map(|coord| vec![coord.x, coord.y])
        .collect();

    let mut props = Map::new();
    props.insert("cellId".to_string(), cell_id.into());
    props.insert(
        "elevation".to_string(),
        cell_bounds.elevation.value.into(),
    );
    props.insert(
        "elevationType".to_string(),
        cell_bounds.elevation.kind.as_str().into(),
    );

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}

/// Converts a cell to a GeoJSON Feature of its bounds.
///
/// The feature carries `cellId`, `elevation` and `elevationType` properties.
pub fn cell_to_geojson(cell_id: &str) -> Result<String> {
    let feature = cell_feature(cell_id)?;
    serde_json::to_string(&feature)
        .map_err(|e| UnlError::InvalidFormat(format!("Failed to serialize feature: {}", e)))
}

/// Converts cells (a cluster, say) to a GeoJSON FeatureCollection.
pub fn cells_to_feature_collection<S: AsRef<str>>(cells: &[S]) -> Result<String> {
    let features = cells
        .iter()
        .map(|cell| cell_feature(cell.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    serde_json::to_string(&collection).map_err(|e| {
        UnlError::InvalidFormat(format!("Failed to serialize feature collection: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{"type":"Polygon","coordinates":[[[-80.0,35.0],[-70.0,35.0],[-70.0,45.0],[-80.0,45.0],[-80.0,35.0]]]}"#;

    #[test]
    fn test_ring_input_is_lon_lat() {
        let polygons = PolygonInput::from(vec![[10.0, 50.0], [11.0, 50.0], [11.0, 51.0]])
            .into_polygons()
            .unwrap();
        assert_eq!(polygons.len(), 1);
        let first = polygons[0].exterior().0[0];
        assert_eq!((first.x, first.y), (10.0, 50.0));
        // Polygon::new closes the ring
        assert_eq!(polygons[0].exterior().0.len(), 4);
    }

    #[test]
    fn test_ring_too_short() {
        let result = PolygonInput::from(vec![[10.0, 50.0], [11.0, 50.0]]).into_polygons();
        assert!(matches!(result, Err(UnlError::InvalidInput(_))));
    }

    #[test]
    fn test_polygon_geometry() {
        let polygons = PolygonInput::from_geojson_str(SQUARE)
            .unwrap()
            .into_polygons()
            .unwrap();
        assert_eq!(polygons[0].exterior().coords().count(), 5);
    }

    #[test]
    fn test_feature_and_collection() {
        let feature = format!(
            r#"{{"type":"Feature","properties":{{}},"geometry":{}}}"#,
            SQUARE
        );
        let from_feature = PolygonInput::from_geojson_str(&feature)
            .unwrap()
            .into_polygons()
            .unwrap();

        let collection = format!(
            r#"{{"type":"FeatureCollection","features":[{},{}]}}"#,
            feature, feature
        );
        let from_collection = PolygonInput::from_geojson_str(&collection)
            .unwrap()
            .into_polygons()
            .unwrap();

        // only the first feature of a collection is used, read as [lat, lon]
        assert_eq!(from_collection.len(), 1);
        let first = from_collection[0].exterior().0[0];
        assert_eq!((first.x, first.y), (35.0, -80.0));
        let swapped: Vec<_> = from_collection[0]
            .exterior()
            .coords()
            .map(|c| (c.y, c.x))
            .collect();
        let direct: Vec<_> = from_feature[0].exterior().coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(swapped, direct);
    }

    #[test]
    fn test_empty_collection() {
        let polygons = PolygonInput::from_geojson_str(r#"{"type":"FeatureCollection","features":[]}"#)
            .unwrap()
            .into_polygons()
            .unwrap();
        assert!(polygons.is_empty());
    }

    #[test]
    fn test_multi_polygon_geometry() {
        let json = r#"{"type":"MultiPolygon","coordinates":[
            [[[0,0],[1,0],[1,1],[0,0]]],
            [[[5,5],[6,5],[6,6],[5,5]],[[5.2,5.1],[5.8,5.1],[5.8,5.7],[5.2,5.1]]]
        ]}"#;
        let polygons = PolygonInput::from_geojson_str(json)
            .unwrap()
            .into_polygons()
            .unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].interiors().len(), 1);
    }

    #[test]
    fn test_rejects_other_geometries() {
        for json in [
            r#"{"type":"Point","coordinates":[1.0,2.0]}"#,
            r#"{"type":"LineString","coordinates":[[0,0],[1,1]]}"#,
            r#"{"type":"Feature","properties":null,"geometry":null}"#,
            r#"{"type":"Polygon","coordinates":[[[0,0],[1],[1,1],[0,0]]]}"#,
            r#"{"type":"Polygon","coordinates":[]}"#,
        ] {
            let result = PolygonInput::from_geojson_str(json).and_then(|i| i.into_polygons());
            assert!(
                matches!(result, Err(UnlError::InvalidInput(_))),
                "{} -> {:?}",
                json,
                result
            );
        }
    }

    #[test]
    fn test_invalid_geojson() {
        assert!(matches!(
            PolygonInput::from_geojson_str("not valid json"),
            Err(UnlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_polygon() {
        let json = r#"{"type":"Polygon","coordinates":[[[0,0],[200,0],[1,1],[0,0]]]}"#;
        let result = PolygonInput::from_geojson_str(json)
            .unwrap()
            .into_polygons();
        assert!(matches!(result, Err(UnlError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_cell_to_geojson() {
        let json = cell_to_geojson("u4pruy@5").unwrap();
        let parsed: GeoJson = json.parse().unwrap();
        let GeoJson::Feature(feature) = parsed else {
            panic!("expected a feature");
        };
        let props = feature.properties.unwrap();
        assert_eq!(props["cellId"], "u4pruy@5");
        assert_eq!(props["elevation"], 5);
        assert_eq!(props["elevationType"], "floor");

        let Some(Geometry {
            value: Value::Polygon(rings),
            ..
        }) = feature.geometry
        else {
            panic!("expected a polygon");
        };
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn test_cells_to_feature_collection() {
        let json = cells_to_feature_collection(&["u4pruy", "u4pruz"]).unwrap();
        assert!(json.contains("FeatureCollection"));
        assert!(json.contains("u4pruz"));
        assert!(cells_to_feature_collection(&["u4pa"]).is_err());
    }
}
