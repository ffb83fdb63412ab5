use worldmap_core::{countries_from_str, name_index, Geometry, MapError, TopologyError, WorldMap};

const FIXTURE: &str = include_str!("fixtures/mini-countries.json");

#[test]
fn fixture_decodes_named_countries() {
    let countries = countries_from_str(FIXTURE, "countries").unwrap();
    let names: Vec<_> = countries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Westland", "Eastland", "Dateline"]);

    let index = name_index(&countries);
    assert_eq!(index.get("002").map(String::as_str), Some("Eastland"));
    assert!(!index.contains_key("-99"));
}

#[test]
fn neighbours_share_their_border() {
    let countries = countries_from_str(FIXTURE, "countries").unwrap();
    let ring = |i: usize| match &countries[i].geometry {
        Geometry::Polygon { coordinates } => coordinates[0].clone(),
        other => panic!("unexpected {other:?}"),
    };
    let west = ring(0);
    let east = ring(1);

    // Westland walks the shared edge northwards, Eastland walks it back south
    let near = |a: [f64; 2], b: [f64; 2]| (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9;
    assert!(near(west[0], [10.0, 0.0]));
    assert!(near(west[1], [10.0, 10.0]));
    assert!(near(east[3], [10.0, 10.0]));
    assert!(near(east[4], [10.0, 0.0]));
    assert_eq!(west.first(), west.last());
    assert_eq!(east.first(), east.last());
}

#[test]
fn empty_collection_loads_no_countries() {
    assert!(countries_from_str(FIXTURE, "land").unwrap().is_empty());
}

#[test]
fn map_reports_topology_errors() {
    let mut map = WorldMap::default();
    let err = map.load_topology(r#"{"type":"Topology","objects":{},"arcs":[]}"#);
    assert!(matches!(
        err,
        Err(MapError::Topology(TopologyError::MissingObject(ref name))) if name == "countries"
    ));
    assert!(map.countries().is_empty());

    assert_eq!(map.load_topology(FIXTURE).unwrap(), 3);
    assert_eq!(map.country_name("001"), Some("Westland"));
}
