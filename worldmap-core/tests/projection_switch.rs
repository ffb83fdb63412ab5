use worldmap_core::{Geometry, MapConfig, PathGenerator, Projection, ProjectionKind, WorldMap};

const FIXTURE: &str = include_str!("fixtures/mini-countries.json");

fn loaded_map(config: MapConfig) -> WorldMap {
    let mut map = WorldMap::new(config);
    map.load_topology(FIXTURE).unwrap();
    map
}

#[test]
fn every_path_matches_the_new_projection_after_a_switch() {
    let mut map = loaded_map(MapConfig {
        include_graticule: true,
        ..MapConfig::default()
    });

    for kind in ProjectionKind::ALL {
        map.set_projection(kind);
        let projection = Projection::new(kind, (480.0, 250.0));
        let generator = PathGenerator::new(&projection);
        let paths = map.paths();

        assert_eq!(paths.projection, kind);
        assert_eq!(paths.sphere, generator.path(&Geometry::Sphere), "{kind:?}");
        for (rendered, country) in paths.countries.iter().zip(map.countries()) {
            assert_eq!(rendered.id, country.id);
            assert_eq!(rendered.d, generator.path(&country.geometry), "{kind:?}");
        }
        assert_eq!(paths.graticule.len(), 53);
    }
}

#[test]
fn antimeridian_country_is_cut_in_two_on_flat_maps() {
    let mut map = loaded_map(MapConfig::default());
    let dateline = |map: &WorldMap| {
        map.paths()
            .countries
            .iter()
            .find(|c| c.name == "Dateline")
            .map(|c| c.d.clone())
            .unwrap()
    };

    // Behind the globe on the default orthographic view
    assert!(dateline(&map).is_empty());

    map.set_projection(ProjectionKind::NaturalEarth1);
    let d = dateline(&map);
    assert_eq!(d.matches('M').count(), 2, "{d}");
    assert_eq!(d.matches('Z').count(), 2, "{d}");
}

#[test]
fn unknown_projection_keeps_previous_paths() {
    let mut map = loaded_map(MapConfig::default());
    map.set_projection(ProjectionKind::Boggs);
    let before = map.paths().clone();

    assert!(map.set_projection_by_name("Waterman Butterfly").is_err());
    assert_eq!(map.projection_kind(), ProjectionKind::Boggs);
    assert_eq!(map.paths(), &before);
}
