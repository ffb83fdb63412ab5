//! TopoJSON decoding.
//!
//! Arcs are shared between neighbouring shapes and, when the topology is
//! quantized, delta-encoded. Decoding expands each geometry's arc references
//! back into coordinate rings.

use crate::error::TopologyError;
use crate::geometry::{Country, Geometry, Position};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    fn apply(&self, q: [f64; 2]) -> Position {
        [
            q[0] * self.scale[0] + self.translate[0],
            q[1] * self.scale[1] + self.translate[1],
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TopoObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    coordinates: Option<Value>,
    #[serde(default)]
    geometries: Vec<TopoObject>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, TopoObject>,
    arcs: Vec<Vec<Vec<f64>>>,
}

/// A decoded topology with its arcs already expanded to positions.
#[derive(Debug, Clone)]
pub struct Topology {
    transform: Option<Transform>,
    objects: HashMap<String, TopoObject>,
    arcs: Vec<Vec<Position>>,
}

impl Topology {
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        let raw: RawTopology = serde_json::from_str(json)?;
        let arcs = raw
            .arcs
            .iter()
            .map(|arc| decode_arc(arc, raw.transform.as_ref()))
            .collect();
        Ok(Self {
            transform: raw.transform,
            objects: raw.objects,
            arcs,
        })
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Expand a geometry collection into countries. Null geometries are skipped.
    pub fn countries(&self, object: &str) -> Result<Vec<Country>, TopologyError> {
        let collection = self
            .objects
            .get(object)
            .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;
        if collection.kind.as_deref() != Some("GeometryCollection") {
            return Err(TopologyError::NotACollection(object.to_string()));
        }

        let mut countries = Vec::with_capacity(collection.geometries.len());
        for member in &collection.geometries {
            let Some(geometry) = self.geometry(member)? else {
                continue;
            };
            countries.push(Country {
                id: member.id.as_ref().map(value_to_string).unwrap_or_default(),
                name: member
                    .properties
                    .as_ref()
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                geometry,
            });
        }
        Ok(countries)
    }

    fn geometry(&self, object: &TopoObject) -> Result<Option<Geometry>, TopologyError> {
        let Some(kind) = object.kind.as_deref() else {
            return Ok(None);
        };
        let geometry = match kind {
            "Point" => Geometry::Point {
                coordinates: self.point(from_field::<[f64; 2]>(&object.coordinates)?),
            },
            "MultiPoint" => Geometry::MultiPoint {
                coordinates: from_field::<Vec<[f64; 2]>>(&object.coordinates)?
                    .into_iter()
                    .map(|p| self.point(p))
                    .collect(),
            },
            "LineString" => Geometry::LineString {
                coordinates: self.line(&from_field::<Vec<i64>>(&object.arcs)?)?,
            },
            "MultiLineString" => Geometry::MultiLineString {
                coordinates: from_field::<Vec<Vec<i64>>>(&object.arcs)?
                    .iter()
                    .map(|arcs| self.line(arcs))
                    .collect::<Result<_, _>>()?,
            },
            "Polygon" => Geometry::Polygon {
                coordinates: self.polygon(&from_field::<Vec<Vec<i64>>>(&object.arcs)?)?,
            },
            "MultiPolygon" => Geometry::MultiPolygon {
                coordinates: from_field::<Vec<Vec<Vec<i64>>>>(&object.arcs)?
                    .iter()
                    .map(|rings| self.polygon(rings))
                    .collect::<Result<_, _>>()?,
            },
            other => return Err(TopologyError::UnsupportedGeometry(other.to_string())),
        };
        Ok(Some(geometry))
    }

    fn point(&self, p: [f64; 2]) -> Position {
        match &self.transform {
            Some(t) => t.apply(p),
            None => p,
        }
    }

    /// Append arc `index` to `points`, dropping the shared joint point.
    /// Negative indices (`!i`) walk arc `i` backwards.
    fn append_arc(&self, index: i64, points: &mut Vec<Position>) -> Result<(), TopologyError> {
        let (arc_index, reversed) = if index < 0 {
            (!index, true)
        } else {
            (index, false)
        };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| self.arcs.get(i))
            .ok_or(TopologyError::ArcOutOfRange(index))?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
        Ok(())
    }

    fn line(&self, arcs: &[i64]) -> Result<Vec<Position>, TopologyError> {
        let mut points = Vec::new();
        for &index in arcs {
            self.append_arc(index, &mut points)?;
        }
        if points.len() == 1 {
            points.push(points[0]);
        }
        Ok(points)
    }

    fn ring(&self, arcs: &[i64]) -> Result<Vec<Position>, TopologyError> {
        let mut points = self.line(arcs)?;
        if let Some(&first) = points.first() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(points)
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Vec<Vec<Position>>, TopologyError> {
        rings.iter().map(|arcs| self.ring(arcs)).collect()
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<&Transform>) -> Vec<Position> {
    let mut acc = [0.0, 0.0];
    arc.iter()
        .filter(|p| p.len() >= 2)
        .map(|p| match transform {
            Some(t) => {
                acc[0] += p[0];
                acc[1] += p[1];
                t.apply(acc)
            }
            None => [p[0], p[1]],
        })
        .collect()
}

fn from_field<T: serde::de::DeserializeOwned>(field: &Option<Value>) -> Result<T, TopologyError> {
    let value = field.clone().unwrap_or(Value::Null);
    Ok(serde_json::from_value(value)?)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode the named collection of a TopoJSON document.
pub fn countries_from_str(json: &str, object: &str) -> Result<Vec<Country>, TopologyError> {
    Topology::from_json(json)?.countries(object)
}

/// Country id to display name.
pub fn name_index(countries: &[Country]) -> HashMap<String, String> {
    countries
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two squares sharing the arc x = 1: arc 0 is the shared edge going up,
    // arcs 1 and 2 are the outer edges of the left and right squares.
    const QUANTIZED: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [1, 1], "translate": [0, 0]},
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "arcs": [[0, 1]], "id": "010", "properties": {"name": "Left"}},
                    {"type": "Polygon", "arcs": [[2, -1]], "id": 20, "properties": {"name": "Right"}},
                    {"type": null, "id": "999"}
                ]
            },
            "border": {"type": "LineString", "arcs": [0]}
        },
        "arcs": [
            [[1, 0], [0, 1]],
            [[1, 1], [-1, 0], [0, -1], [1, 0]],
            [[1, 0], [1, 0], [0, 1], [-1, 0]]
        ]
    }"#;

    #[test]
    fn decodes_delta_encoded_arcs_and_stitches_rings() {
        let countries = countries_from_str(QUANTIZED, "countries").unwrap();
        assert_eq!(countries.len(), 2);

        let left = &countries[0];
        assert_eq!(left.id, "010");
        assert_eq!(left.name, "Left");
        assert_eq!(
            left.geometry,
            Geometry::Polygon {
                coordinates: vec![vec![
                    [1.0, 0.0],
                    [1.0, 1.0],
                    [0.0, 1.0],
                    [0.0, 0.0],
                    [1.0, 0.0]
                ]]
            }
        );
    }

    #[test]
    fn reversed_arc_references_walk_backwards() {
        let countries = countries_from_str(QUANTIZED, "countries").unwrap();
        let right = &countries[1];
        assert_eq!(right.id, "20");
        assert_eq!(
            right.geometry,
            Geometry::Polygon {
                coordinates: vec![vec![
                    [1.0, 0.0],
                    [2.0, 0.0],
                    [2.0, 1.0],
                    [1.0, 1.0],
                    [1.0, 0.0]
                ]]
            }
        );
    }

    #[test]
    fn name_index_maps_ids() {
        let countries = countries_from_str(QUANTIZED, "countries").unwrap();
        let index = name_index(&countries);
        assert_eq!(index.get("010").map(String::as_str), Some("Left"));
        assert_eq!(index.get("20").map(String::as_str), Some("Right"));
        assert!(!index.contains_key("999"));
    }

    #[test]
    fn unquantized_arcs_are_absolute() {
        let json = r#"{
            "type": "Topology",
            "objects": {"c": {"type": "GeometryCollection", "geometries": [
                {"type": "LineString", "arcs": [0, 1]}
            ]}},
            "arcs": [[[10.5, 20.0], [11.5, 21.0]], [[11.5, 21.0], [12.0, 22.0]]]
        }"#;
        let countries = countries_from_str(json, "c").unwrap();
        assert_eq!(
            countries[0].geometry,
            Geometry::LineString {
                coordinates: vec![[10.5, 20.0], [11.5, 21.0], [12.0, 22.0]]
            }
        );
        assert_eq!(countries[0].id, "");
        assert_eq!(countries[0].name, "");
    }

    #[test]
    fn missing_object_is_reported() {
        let err = countries_from_str(QUANTIZED, "land").unwrap_err();
        assert!(matches!(err, TopologyError::MissingObject(name) if name == "land"));
    }

    #[test]
    fn non_collection_object_is_reported() {
        let err = countries_from_str(QUANTIZED, "border").unwrap_err();
        assert!(matches!(err, TopologyError::NotACollection(_)));
    }

    #[test]
    fn arc_out_of_range_is_reported() {
        let json = r#"{
            "type": "Topology",
            "objects": {"c": {"type": "GeometryCollection", "geometries": [
                {"type": "Polygon", "arcs": [[0, -6]]}
            ]}},
            "arcs": [[[0, 0], [1, 1]]]
        }"#;
        let err = countries_from_str(json, "c").unwrap_err();
        assert!(matches!(err, TopologyError::ArcOutOfRange(-6)));
    }

    #[test]
    fn unsupported_geometry_is_reported() {
        let json = r#"{
            "type": "Topology",
            "objects": {"c": {"type": "GeometryCollection", "geometries": [
                {"type": "Circle", "arcs": []}
            ]}},
            "arcs": []
        }"#;
        let err = countries_from_str(json, "c").unwrap_err();
        assert!(matches!(err, TopologyError::UnsupportedGeometry(kind) if kind == "Circle"));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            countries_from_str("{not json", "countries"),
            Err(TopologyError::Json(_))
        ));
    }
}
