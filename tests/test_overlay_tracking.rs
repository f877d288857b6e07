use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;

use scenario_builder::domain::builder::ScenarioBuilder;
use scenario_builder::domain::geo::LatLng;
use scenario_builder::domain::global_config::global_config::AuthoringMode;
use scenario_builder::domain::overlay::{OverlayOutcome, OverlaySource, OverlayTracker, load_overlay};
use scenario_builder::error::{Error, Result};

/// Serves overlays from memory. Names listed in `broken` fail with a
/// transport error.
#[derive(Default)]
struct MockOverlaySource {
    documents: HashMap<String, Value>,
    broken: Vec<String>,
}

impl MockOverlaySource {
    fn with(mut self, file_name: &str, document: Value) -> Self {
        self.documents.insert(file_name.to_string(), document);
        self
    }
}

#[async_trait]
impl OverlaySource for MockOverlaySource {
    async fn fetch_overlay(&self, file_name: &str) -> Result<Option<Value>> {
        if self.broken.iter().any(|name| name == file_name) {
            return Err(Error::Transport(format!("connection refused for {}", file_name)));
        }
        Ok(self.documents.get(file_name).cloned())
    }
}

fn line(from: [f64; 2], to: [f64; 2]) -> Value {
    json!({ "type": "FeatureCollection", "features": [ { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [from, to] } } ] })
}

#[tokio::test]
async fn overlay_of_selected_map_is_applied() {
    let source = MockOverlaySource::default().with("grid.geojson", line([13.0, 52.0], [13.5, 52.5]));
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("grid.net.xml");

    let outcome = builder.load_pending_overlay(&source).await;

    let Some(OverlayOutcome::Applied(Some(bounds))) = outcome else {
        panic!("expected bounds, got {:?}", outcome);
    };
    assert_eq!(bounds.south_west, LatLng::new(52.0, 13.0));
    assert_eq!(bounds.north_east, LatLng::new(52.5, 13.5));
    assert!(builder.overlay().in_flight().is_none());
}

#[tokio::test]
async fn late_response_for_previous_map_is_discarded() {
    let source = MockOverlaySource::default().with("a.geojson", line([1.0, 1.0], [2.0, 2.0])).with("b.geojson", line([5.0, 5.0], [6.0, 6.0]));
    let mut tracker = OverlayTracker::new();

    let first = tracker.begin("a.net.xml").unwrap();
    let second = tracker.begin("b.net.xml").unwrap();

    // The second request resolves first, the first one arrives late.
    let second_result = load_overlay(&source, &second).await;
    let first_result = load_overlay(&source, &first).await;

    assert!(matches!(tracker.resolve(&second, second_result), OverlayOutcome::Applied(Some(_))));
    assert_eq!(tracker.resolve(&first, first_result), OverlayOutcome::Stale);
    assert_eq!(tracker.current().map(|overlay| overlay.map_name.as_str()), Some("b.net.xml"));
}

#[tokio::test]
async fn missing_and_failing_overlays_leave_no_backdrop() {
    let source = MockOverlaySource { broken: vec!["town.geojson".to_string()], ..Default::default() };
    let mut builder = ScenarioBuilder::new(AuthoringMode::Granular);

    builder.select_map("grid.net.xml");
    assert_eq!(builder.load_pending_overlay(&source).await, Some(OverlayOutcome::Missing));

    builder.select_map("town.net.xml");
    assert_eq!(builder.load_pending_overlay(&source).await, Some(OverlayOutcome::Failed));
    assert!(builder.overlay().current().is_none());
}

#[tokio::test]
async fn non_network_map_requests_nothing() {
    let source = MockOverlaySource::default();
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);

    assert!(builder.select_map("grid.osm").is_none());
    assert_eq!(builder.load_pending_overlay(&source).await, None);
}

#[tokio::test]
async fn overlay_without_positions_has_no_bounds() {
    let source = MockOverlaySource::default().with("empty.geojson", json!({ "type": "FeatureCollection", "features": [] }));
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("empty.net.xml");

    assert_eq!(builder.load_pending_overlay(&source).await, Some(OverlayOutcome::Applied(None)));
    assert!(builder.overlay().current().is_some());
}
