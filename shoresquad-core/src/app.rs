use crate::error::AppError;
use crate::events::{EventsClient, EventsStore};
use crate::geo::{self, FALLBACK_COORDINATE, PositionSource};
use crate::map::MapController;
use crate::model::{CleanupEvent, Coordinate, ForecastDay};
use crate::notify::ToastTray;
use crate::render;
use crate::reveal::RevealObserver;
use crate::surface::{SurfaceId, Surfaces};
use crate::weather::WeatherClient;

/// Startup lifecycle. `Ready` is not observable beyond listeners being
/// attached; nothing external waits on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Idle,
    LocationResolving,
    ParallelInit,
    ListenersAttached,
    Ready,
}

/// The orchestrator. Constructed exactly once and handed to whatever
/// UI-binding layer needs it; components never reach for it ambiently.
pub struct App {
    surfaces: Surfaces,
    position_source: Box<dyn PositionSource>,
    weather_client: WeatherClient,
    events_client: EventsClient,
    maps_api_key: Option<String>,

    phase: AppPhase,
    location: Coordinate,
    weather: Option<Vec<ForecastDay>>,
    map: Option<MapController>,
    events: EventsStore,
    toasts: ToastTray,
    reveal: RevealObserver,
    primary_action_bound: bool,
}

impl App {
    pub fn new(
        surfaces: Surfaces,
        position_source: Box<dyn PositionSource>,
        weather_client: WeatherClient,
        events_client: EventsClient,
        maps_api_key: Option<String>,
    ) -> Self {
        Self {
            surfaces,
            position_source,
            weather_client,
            events_client,
            maps_api_key,
            phase: AppPhase::Idle,
            location: FALLBACK_COORDINATE,
            weather: None,
            map: None,
            events: EventsStore::new(),
            toasts: ToastTray::new(),
            reveal: RevealObserver::new(),
            primary_action_bound: false,
        }
    }

    /// Run the startup sequence.
    ///
    /// Location resolution cannot fail (it falls back), so it never gates
    /// the fan-out. The three init branches run concurrently; each returns
    /// the typed error channel, and a failing branch becomes a toast without
    /// cancelling its siblings. `start` itself never fails.
    pub async fn start(&mut self) {
        self.phase = AppPhase::LocationResolving;
        self.location = geo::resolve(self.position_source.as_ref()).await;
        tracing::info!("Resolved location: {}", self.location);

        self.phase = AppPhase::ParallelInit;
        let location = self.location;
        let surfaces = &self.surfaces;
        let maps_api_key = self.maps_api_key.as_deref();
        let weather_client = &self.weather_client;
        let events_client = &self.events_client;
        let events = &mut self.events;

        let (map_res, weather_res, events_res) = tokio::join!(
            async { MapController::initialize(surfaces, maps_api_key, location) },
            async { weather_client.forecast(location).await.map_err(AppError::Weather) },
            async { events.load(events_client).await },
        );

        match map_res {
            Ok(map) => self.map = map,
            Err(err) => self.toasts.push(err.to_string()),
        }
        match weather_res {
            Ok(days) => self.weather = Some(days),
            Err(err) => self.toasts.push(err.to_string()),
        }
        match events_res {
            Ok(count) => tracing::info!("Loaded {count} cleanup events"),
            Err(err) => self.toasts.push(err.to_string()),
        }

        // Markers go down only after both branches have settled.
        if let Some(map) = self.map.as_mut() {
            for event in self.events.as_slice() {
                map.add_event_marker(event);
            }
        }

        self.attach_listeners();
        self.phase = AppPhase::ListenersAttached;

        let sections = self.surfaces.sections().to_vec();
        self.reveal.observe_sections(&sections);
        self.phase = AppPhase::Ready;
    }

    fn attach_listeners(&mut self) {
        self.primary_action_bound = self.surfaces.has(SurfaceId::PrimaryAction);
    }

    /// Handler for the primary call-to-action: recenter the map on the
    /// resolved coordinate.
    pub fn on_primary_action(&mut self) {
        if !self.primary_action_bound {
            return;
        }
        if let Some(map) = self.map.as_mut() {
            map.recenter();
        }
    }

    /// Join an event by id. Failures (unknown id, network, server
    /// rejection) become toasts; the list re-renders from local state
    /// either way. Returns whether the join was confirmed.
    pub async fn join_event(&mut self, id: &str) -> bool {
        match self.events.join(&self.events_client, id).await {
            Ok(()) => true,
            Err(err) => {
                self.toasts.push(err.to_string());
                false
            }
        }
    }

    /// Visibility report for one section; true exactly once, when the
    /// section first crosses the reveal threshold.
    pub fn on_section_visible(&mut self, section: &str, visible_ratio: f64) -> bool {
        self.reveal.on_intersection(section, visible_ratio)
    }

    /// Event details behind a map marker, for the marker's click handler.
    pub fn event_details(&self, event_id: &str) -> Option<&CleanupEvent> {
        let marker = self.map.as_ref()?.marker(event_id)?;
        self.events.get(&marker.event_id)
    }

    /// Weather panel markup, when the surface exists and a forecast loaded.
    pub fn weather_markup(&self) -> Option<String> {
        if !self.surfaces.has(SurfaceId::WeatherDisplay) {
            return None;
        }
        self.weather.as_ref().map(|days| render::weather_cards(days))
    }

    /// Events list markup, when the surface exists.
    pub fn events_markup(&self) -> Option<String> {
        if !self.surfaces.has(SurfaceId::EventsList) {
            return None;
        }
        Some(render::event_cards(self.events.as_slice()))
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn forecast(&self) -> Option<&[ForecastDay]> {
        self.weather.as_deref()
    }

    pub fn map(&self) -> Option<&MapController> {
        self.map.as_ref()
    }

    pub fn events(&self) -> &EventsStore {
        &self.events
    }

    pub fn toasts(&self) -> &ToastTray {
        &self.toasts
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }
}
