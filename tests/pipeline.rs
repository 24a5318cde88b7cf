// End-to-end: feeds -> load -> join -> project -> classify -> draw -> interact.

use std::io::Write;

use choropleth::{
    load_regions, Choropleth, ChoroplethConfig, DelimitedMetricSource, Feed, GeoJsonSource, Hover,
    LoadError, MetricRecord, MetricSource, RenderError, Repaint, Surface, GREENS_7,
};
use futures::executor::block_on;

fn square(lon: f64, lat: f64) -> String {
    format!(
        "[[[{lon},{lat}],[{lon1},{lat}],[{lon1},{lat1}],[{lon},{lat1}],[{lon},{lat}]]]",
        lon1 = lon + 1.0,
        lat1 = lat + 1.0,
    )
}

fn geojson() -> String {
    let feature = |name: &str, lon: f64| format!(
        r#"{{"type":"Feature","properties":{{"Name":"{name}"}},"geometry":{{"type":"Polygon","coordinates":{}}}}}"#,
        square(lon, 20.0),
    );
    format!(
        r#"{{"type":"FeatureCollection","features":[{},{},{}]}}"#,
        feature("A", 107.0),
        feature("B", 108.0),
        feature("C", 109.0),
    )
}

const METRICS: &str = "Province\tInfected\nA\t42\nB\tbad\n";

fn config() -> ChoroplethConfig {
    ChoroplethConfig::from_json_str(r#"{
        "title": "Cases by province",
        "footer": "Last updated: August 9, 2021",
        "geometry": {"name_property": "Name"},
        "metrics": {"name_column": "Province", "value_column": "Infected"}
    }"#).unwrap()
}

fn sources(config: &ChoroplethConfig) -> (GeoJsonSource, DelimitedMetricSource) {
    (
        config.geometry_source(Feed::from_bytes(geojson())),
        config.metric_source(Feed::from_bytes(METRICS)).unwrap(),
    )
}

struct Offline;

impl MetricSource for Offline {
    async fn load(&self) -> anyhow::Result<Vec<MetricRecord>> {
        anyhow::bail!("connection refused")
    }
}

#[test]
fn join_defaults_unmatched_and_invalid_values_to_zero() {
    let (geometry, metrics) = sources(&config());
    let regions = block_on(load_regions(&geometry, &metrics)).unwrap();

    let values = regions.iter()
        .map(|r| (r.name.to_string(), r.value(), r.is_matched()))
        .collect::<Vec<_>>();
    assert_eq!(values, [
        ("A".to_string(), 42.0, true),
        ("B".to_string(), 0.0, false),
        ("C".to_string(), 0.0, false),
    ]);
}

#[test]
fn load_and_render_draws_and_interacts() {
    let config = config();
    let (geometry, metrics) = sources(&config);
    let mut map = Choropleth::new(Surface::new("map", 960.0, 600.0), &config).unwrap();

    let report = block_on(map.load_and_render(&geometry, &metrics)).unwrap();
    assert_eq!(report.drawn, 3);
    assert!(report.skipped.is_empty());

    let scene = map.renderer().scene().unwrap();
    assert_eq!(scene.shape("A").unwrap().fill, GREENS_7[1]);
    assert_eq!(scene.shape("C").unwrap().fill, GREENS_7[0]);
    assert_eq!(scene.title.text, "Cases by province");

    let renderer = map.renderer_mut();
    assert_eq!(renderer.pointer_enter("B", 100.0, 100.0), Repaint::Highlight);
    assert_eq!(renderer.state().hover(), &Hover::Hovering("B".into()));
    assert_eq!(renderer.state().tooltip().content, "B: 0");

    let svg = renderer.to_svg_string().unwrap();
    assert!(svg.contains("Last updated: August 9, 2021"));
    assert!(svg.contains("<text>B: 0</text>"));

    assert_eq!(renderer.pointer_leave(), Repaint::Highlight);
    assert!(renderer.scene().unwrap().shapes.iter().all(|s| s.opacity == 1.0));
}

#[test]
fn reload_produces_identical_scene() {
    let config = config();
    let (geometry, metrics) = sources(&config);
    let mut map = Choropleth::new(Surface::new("map", 960.0, 600.0), &config).unwrap();

    block_on(map.load_and_render(&geometry, &metrics)).unwrap();
    let first = map.renderer().scene().unwrap().clone();
    block_on(map.load_and_render(&geometry, &metrics)).unwrap();

    assert_eq!(map.renderer().scene().unwrap(), &first);
    assert_eq!(first.shapes.len(), 3);
}

#[test]
fn failing_metric_feed_leaves_surface_empty() {
    let config = config();
    let (geometry, metrics) = sources(&config);
    let mut map = Choropleth::new(Surface::new("map", 960.0, 600.0), &config).unwrap();
    block_on(map.load_and_render(&geometry, &metrics)).unwrap();

    let err = block_on(map.load_and_render(&geometry, &Offline)).unwrap_err();
    assert!(matches!(err, RenderError::Load(LoadError::Metrics(_))));
    assert!(map.renderer().surface().is_empty());
}

#[test]
fn failing_geometry_feed_reports_geometry() {
    let config = config();
    let geometry = config.geometry_source(Feed::from_bytes("not json"));
    let metrics = config.metric_source(Feed::from_bytes(METRICS)).unwrap();

    let err = block_on(load_regions(&geometry, &metrics)).unwrap_err();
    assert!(matches!(err, LoadError::Geometry(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn feeds_from_files() {
    let mut geo_file = tempfile::NamedTempFile::new().unwrap();
    geo_file.write_all(geojson().as_bytes()).unwrap();
    let mut tsv_file = tempfile::NamedTempFile::new().unwrap();
    tsv_file.write_all(METRICS.as_bytes()).unwrap();

    let config = config();
    let geometry = config.geometry_source(Feed::Path(geo_file.path().to_path_buf()));
    let metrics = config.metric_source(Feed::Path(tsv_file.path().to_path_buf())).unwrap();

    let regions = block_on(load_regions(&geometry, &metrics)).unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0].value(), 42.0);
}

#[test]
fn resize_takes_effect_on_next_render() {
    let config = config();
    let (geometry, metrics) = sources(&config);
    let mut map = Choropleth::new(Surface::new("map", 960.0, 600.0), &config).unwrap();
    let regions = block_on(load_regions(&geometry, &metrics)).unwrap();
    map.render(&regions).unwrap();

    map.renderer_mut().resize(480.0, 300.0);
    assert_eq!(map.renderer().scene().unwrap().viewport.width, 960.0);

    map.render(&regions).unwrap();
    let scene = map.renderer().scene().unwrap();
    assert_eq!(scene.viewport.width, 480.0);
    assert_eq!(scene.title.x, (480.0 - 120.0) / 2.0);
}
