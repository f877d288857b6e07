use async_trait::async_trait;
use serde_json::Value;

use crate::domain::geo::{BoundingBox, LatLng};
use crate::domain::utils::id::{IdSequence, OverlayRequestId, OverlayRequestTag};
use crate::error::Result;

pub const NETWORK_EXTENSION: &str = ".net.xml";
pub const OVERLAY_EXTENSION: &str = ".geojson";

/// Anything that can produce the GeoJSON backdrop for a map.
#[async_trait]
pub trait OverlaySource: Send + Sync {
    /// `Ok(None)` means the resource does not exist.
    async fn fetch_overlay(&self, file_name: &str) -> Result<Option<Value>>;
}

/// Name of the overlay resource belonging to a network file. Only network
/// files have a sibling overlay.
pub fn overlay_file_name(map_name: &str) -> Option<String> {
    let stem = map_name.strip_suffix(NETWORK_EXTENSION)?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}{}", stem, OVERLAY_EXTENSION))
}

/// Extent of every position in a GeoJSON document. Positions are
/// `[lng, lat, ...]`. Returns `None` if the document holds no position.
pub fn bounding_box(document: &Value) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;
    collect_positions(document, &mut |point| {
        bounds = Some(match bounds {
            Some(mut existing) => {
                existing.extend(point);
                existing
            }
            None => BoundingBox::from_point(point),
        });
    });
    bounds
}

fn collect_positions(value: &Value, visit: &mut dyn FnMut(LatLng)) {
    match value {
        Value::Object(object) => {
            if let Some(coordinates) = object.get("coordinates") {
                collect_coordinates(coordinates, visit);
            }
            for key in ["features", "geometry", "geometries"] {
                if let Some(child) = object.get(key) {
                    collect_positions(child, visit);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_positions(item, visit);
            }
        }
        _ => {}
    }
}

fn collect_coordinates(value: &Value, visit: &mut dyn FnMut(LatLng)) {
    let Value::Array(items) = value else {
        return;
    };

    match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
        (Some(lng), Some(lat)) => {
            let point = LatLng::new(lat, lng);
            if point.is_valid() {
                visit(point);
            }
        }
        _ => {
            for item in items {
                collect_coordinates(item, visit);
            }
        }
    }
}

/// A loaded backdrop and the bounds the map should fit to.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOverlay {
    pub map_name: String,
    pub document: Value,
    pub bounds: Option<BoundingBox>,
}

/// Identifies one overlay request. Responses are matched against the most
/// recent ticket only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayTicket {
    pub id: OverlayRequestId,
    pub map_name: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayOutcome {
    /// Overlay installed; the map should fit to these bounds if present.
    Applied(Option<BoundingBox>),
    /// The resource does not exist; the builder continues without backdrop.
    Missing,
    /// Fetch failed; the builder continues without backdrop.
    Failed,
    /// A newer map selection superseded this request.
    Stale,
}

/// Tracks the overlay request in flight so that responses arriving after
/// the selection changed are dropped instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct OverlayTracker {
    ids: IdSequence<OverlayRequestTag>,
    in_flight: Option<OverlayTicket>,
    current: Option<GeometryOverlay>,
}

impl OverlayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for `map_name`. The previous overlay is cleared
    /// immediately. Returns `None` when the map has no overlay resource.
    pub fn begin(&mut self, map_name: &str) -> Option<OverlayTicket> {
        self.current = None;

        let Some(file_name) = overlay_file_name(map_name) else {
            self.in_flight = None;
            return None;
        };

        let ticket = OverlayTicket { id: self.ids.next_id(), map_name: map_name.to_string(), file_name };
        log::debug!("Overlay request {} for '{}'.", ticket.id, ticket.map_name);
        self.in_flight = Some(ticket.clone());
        Some(ticket)
    }

    pub fn resolve(&mut self, ticket: &OverlayTicket, result: Result<Option<Value>>) -> OverlayOutcome {
        if self.in_flight.as_ref() != Some(ticket) {
            log::debug!("Discarding stale overlay response {} for '{}'.", ticket.id, ticket.map_name);
            return OverlayOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(Some(document)) => {
                let bounds = bounding_box(&document);
                log::info!("Loaded overlay '{}' (bounds: {:?}).", ticket.file_name, bounds);
                self.current = Some(GeometryOverlay { map_name: ticket.map_name.clone(), document, bounds });
                OverlayOutcome::Applied(bounds)
            }
            Ok(None) => {
                log::info!("No overlay available for '{}'.", ticket.map_name);
                OverlayOutcome::Missing
            }
            Err(e) => {
                log::warn!("Overlay for '{}' could not be loaded: {}", ticket.map_name, e);
                OverlayOutcome::Failed
            }
        }
    }

    pub fn current(&self) -> Option<&GeometryOverlay> {
        self.current.as_ref()
    }

    pub fn in_flight(&self) -> Option<&OverlayTicket> {
        self.in_flight.as_ref()
    }
}

/// Fetches the resource named by `ticket` from `source`.
pub async fn load_overlay<S: OverlaySource + ?Sized>(source: &S, ticket: &OverlayTicket) -> Result<Option<Value>> {
    source.fetch_overlay(&ticket.file_name).await
}
