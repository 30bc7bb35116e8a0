use serde::Serialize;

use crate::error::AppError;
use crate::model::{CleanupEvent, Coordinate};
use crate::surface::{SurfaceId, Surfaces};

/// Zoom applied when the map is first created.
pub const INITIAL_ZOOM: u8 = 12;

/// Zoom applied when the recenter control brings the map home.
pub const FOCUS_ZOOM: u8 = 14;

/// One entry of the static map style sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub feature_type: &'static str,
    pub element_type: &'static str,
    pub stylers: &'static [Styler],
}

#[derive(Debug, Clone, Serialize)]
pub struct Styler {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lightness: Option<i8>,
}

/// Style sheet tuned to highlight water and park features.
pub const BEACH_STYLE: &[StyleRule] = &[
    StyleRule {
        feature_type: "water",
        element_type: "geometry",
        stylers: &[
            Styler { color: Some("#e9e9e9"), lightness: None },
            Styler { color: None, lightness: Some(17) },
        ],
    },
    StyleRule {
        feature_type: "landscape",
        element_type: "geometry",
        stylers: &[
            Styler { color: Some("#f5f5f5"), lightness: None },
            Styler { color: None, lightness: Some(20) },
        ],
    },
    StyleRule {
        feature_type: "poi.park",
        element_type: "geometry",
        stylers: &[
            Styler { color: Some("#dedede"), lightness: None },
            Styler { color: None, lightness: Some(21) },
        ],
    },
    StyleRule {
        feature_type: "water",
        element_type: "labels.text.stroke",
        stylers: &[Styler { color: Some("#ffffff"), lightness: None }],
    },
    StyleRule {
        feature_type: "water",
        element_type: "labels.text.fill",
        stylers: &[Styler { color: Some("#3d3d3d"), lightness: None }],
    },
];

/// Marker placed for one cleanup event. Activating it surfaces the event's
/// details through the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarker {
    pub event_id: String,
    pub title: String,
    pub position: Coordinate,
}

/// Custom controls injected into the map chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapControl {
    /// Button that recenters on the resolved coordinate at [`FOCUS_ZOOM`].
    Recenter,
}

/// Owns the map view state: center, zoom, style, markers, controls.
#[derive(Debug, Clone)]
pub struct MapController {
    api_key: String,
    center: Coordinate,
    zoom: u8,
    home: Coordinate,
    markers: Vec<EventMarker>,
    controls: Vec<MapControl>,
}

impl MapController {
    /// Create the map centered on `center`.
    ///
    /// Returns `Ok(None)` (a no-op, not an error) when the map surface is
    /// absent from the page. Fails when the external map provider cannot be
    /// set up, which the orchestrator reports without aborting its siblings.
    pub fn initialize(
        surfaces: &Surfaces,
        api_key: Option<&str>,
        center: Coordinate,
    ) -> Result<Option<Self>, AppError> {
        if !surfaces.has(SurfaceId::CleanupMap) {
            return Ok(None);
        }

        let api_key = api_key
            .ok_or_else(|| AppError::Map("no map provider API key configured".to_string()))?;

        Ok(Some(Self {
            api_key: api_key.to_string(),
            center,
            zoom: INITIAL_ZOOM,
            home: center,
            markers: Vec::new(),
            controls: vec![MapControl::Recenter],
        }))
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    pub fn markers(&self) -> &[EventMarker] {
        &self.markers
    }

    /// Place a marker for a cleanup event.
    pub fn add_event_marker(&mut self, event: &CleanupEvent) {
        self.markers.push(EventMarker {
            event_id: event.id.clone(),
            title: event.title.clone(),
            position: event.location,
        });
    }

    /// Marker lookup for click handling.
    pub fn marker(&self, event_id: &str) -> Option<&EventMarker> {
        self.markers.iter().find(|m| m.event_id == event_id)
    }

    /// The recenter control's action: back to the resolved coordinate,
    /// zoomed in closer.
    pub fn recenter(&mut self) {
        self.center = self.home;
        self.zoom = FOCUS_ZOOM;
    }

    /// Embed URL for the current view, for static hosting of the map frame.
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.google.com/maps/embed/v1/view?key={}&center={}&zoom={}",
            self.api_key,
            self.center.as_query(),
            self.zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{StaticSurfaces, Surfaces};

    const CENTER: Coordinate = Coordinate { latitude: -33.8688, longitude: 151.2093 };

    fn full_surfaces() -> Surfaces {
        Surfaces::probe(&StaticSurfaces::full(&[]))
    }

    fn event(id: &str) -> CleanupEvent {
        CleanupEvent {
            id: id.to_string(),
            title: "Bondi Beach Cleanup".to_string(),
            date: "2026-08-15".to_string(),
            description: String::new(),
            location: Coordinate { latitude: -33.89, longitude: 151.27 },
            joined: false,
        }
    }

    #[test]
    fn absent_surface_is_a_no_op() {
        let surfaces = Surfaces::probe(&StaticSurfaces::default());

        let map = MapController::initialize(&surfaces, Some("KEY"), CENTER)
            .expect("no-op must not be an error");

        assert!(map.is_none());
    }

    #[test]
    fn missing_provider_key_is_an_error() {
        let err = MapController::initialize(&full_surfaces(), None, CENTER).unwrap_err();
        assert!(matches!(err, AppError::Map(_)));
    }

    #[test]
    fn starts_at_the_initial_zoom_with_a_recenter_control() {
        let map = MapController::initialize(&full_surfaces(), Some("KEY"), CENTER)
            .expect("init")
            .expect("surface present");

        assert_eq!(map.center(), CENTER);
        assert_eq!(map.zoom(), INITIAL_ZOOM);
        assert_eq!(map.controls(), [MapControl::Recenter]);
    }

    #[test]
    fn recenter_returns_home_at_the_focus_zoom() {
        let mut map = MapController::initialize(&full_surfaces(), Some("KEY"), CENTER)
            .expect("init")
            .expect("surface present");

        map.recenter();

        assert_eq!(map.center(), CENTER);
        assert_eq!(map.zoom(), FOCUS_ZOOM);
    }

    #[test]
    fn markers_are_placed_and_found_by_event_id() {
        let mut map = MapController::initialize(&full_surfaces(), Some("KEY"), CENTER)
            .expect("init")
            .expect("surface present");

        map.add_event_marker(&event("ev-1"));
        map.add_event_marker(&event("ev-2"));

        assert_eq!(map.markers().len(), 2);
        let marker = map.marker("ev-2").expect("marker present");
        assert_eq!(marker.title, "Bondi Beach Cleanup");
        assert!(map.marker("ev-9").is_none());
    }

    #[test]
    fn embed_url_carries_key_center_and_zoom() {
        let map = MapController::initialize(&full_surfaces(), Some("KEY"), CENTER)
            .expect("init")
            .expect("surface present");

        let url = map.embed_url();
        assert!(url.contains("key=KEY"));
        assert!(url.contains("center=-33.8688,151.2093"));
        assert!(url.contains("zoom=12"));
    }

    #[test]
    fn beach_style_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(BEACH_STYLE).expect("style must serialize");
        assert!(json.contains("\"featureType\":\"water\""));
        assert!(json.contains("\"poi.park\""));
        assert!(!json.contains("lightness\":null"));
    }
}
