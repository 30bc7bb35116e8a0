use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::AppError;
use crate::model::{CleanupEvent, Coordinate};

/// Client for the cleanup-events backend.
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    base_url: String,
}

impl EventsClient {
    pub fn new(base_url: &str) -> Self {
        Self { http: Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Fetch the current event collection.
    pub async fn fetch_events(&self) -> Result<Vec<CleanupEvent>> {
        let url = format!("{}/api/events", self.base_url);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to the events backend")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Events request failed with status {status}"));
        }

        let parsed: Vec<ApiEvent> =
            res.json().await.context("Failed to parse events JSON")?;

        Ok(parsed.into_iter().map(CleanupEvent::from).collect())
    }

    /// Issue the join request for one event and report the server's verdict.
    pub async fn join(&self, event_id: &str) -> Result<StatusCode> {
        let url = format!("{}/api/events/{}/join", self.base_url, event_id);

        let res = self
            .http
            .post(&url)
            .send()
            .await
            .context("Failed to send join request to the events backend")?;

        Ok(res.status())
    }
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    id: String,
    title: String,
    date: String,
    description: String,
    location: ApiLocation,
}

impl From<ApiEvent> for CleanupEvent {
    fn from(api: ApiEvent) -> Self {
        CleanupEvent {
            id: api.id,
            title: api.title,
            date: api.date,
            description: api.description,
            location: Coordinate { latitude: api.location.lat, longitude: api.location.lng },
            joined: false,
        }
    }
}

/// Session store of cleanup events, keyed by id.
///
/// Iteration order is insertion order (the server's response order); an
/// upsert with a known id replaces the record at its existing position.
#[derive(Debug, Default)]
pub struct EventsStore {
    events: Vec<CleanupEvent>,
}

impl EventsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CleanupEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn as_slice(&self) -> &[CleanupEvent] {
        &self.events
    }

    /// Insert an event, overwriting any prior entry with the same id.
    pub fn upsert(&mut self, event: CleanupEvent) {
        match self.events.iter().position(|e| e.id == event.id) {
            Some(idx) => self.events[idx] = event,
            None => self.events.push(event),
        }
    }

    /// Fetch the event collection and populate the store.
    ///
    /// On failure the store keeps whatever state existed before the call;
    /// there is no rollback.
    pub async fn load(&mut self, client: &EventsClient) -> Result<usize, AppError> {
        let fetched = client.fetch_events().await.map_err(AppError::Events)?;

        let count = fetched.len();
        for event in fetched {
            self.upsert(event);
        }

        Ok(count)
    }

    /// Join one event by id.
    ///
    /// An unknown id is an error and issues no network call. The server's
    /// status is inspected: only a success response marks the local record
    /// as joined.
    pub async fn join(&mut self, client: &EventsClient, id: &str) -> Result<(), AppError> {
        if self.get(id).is_none() {
            return Err(AppError::EventNotFound(id.to_string()));
        }

        let status = client.join(id).await.map_err(AppError::Events)?;

        if !status.is_success() {
            return Err(AppError::JoinRejected { id: id.to_string(), status: status.as_u16() });
        }

        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.joined = true;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_event(id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "date": "2026-08-15",
            "description": "Bring gloves and a bag",
            "location": { "lat": -33.89, "lng": 151.27 }
        })
    }

    fn stored_event(id: &str, title: &str) -> CleanupEvent {
        CleanupEvent {
            id: id.to_string(),
            title: title.to_string(),
            date: "2026-08-15".to_string(),
            description: String::new(),
            location: Coordinate { latitude: -33.89, longitude: 151.27 },
            joined: false,
        }
    }

    #[tokio::test]
    async fn load_populates_the_store_in_response_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                api_event("ev-1", "Bondi Beach Cleanup"),
                api_event("ev-2", "Manly Cove Sweep"),
            ])))
            .mount(&server)
            .await;

        let client = EventsClient::new(&server.uri());
        let mut store = EventsStore::new();

        let count = store.load(&client).await.expect("load should succeed");

        assert_eq!(count, 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].id, "ev-1");
        assert_eq!(store.as_slice()[1].id, "ev-2");
        assert_eq!(store.get("ev-2").expect("present").title, "Manly Cove Sweep");
    }

    #[tokio::test]
    async fn load_failure_keeps_prior_state() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = EventsClient::new(&server.uri());
        let mut store = EventsStore::new();
        store.upsert(stored_event("ev-1", "Existing"));

        let err = store.load(&client).await.unwrap_err();

        assert!(matches!(err, AppError::Events(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ev-1").expect("present").title, "Existing");
    }

    #[test]
    fn upsert_overwrites_in_place_rather_than_duplicating() {
        let mut store = EventsStore::new();

        store.upsert(stored_event("ev-1", "First"));
        store.upsert(stored_event("ev-2", "Second"));
        store.upsert(stored_event("ev-1", "First, renamed"));

        assert_eq!(store.len(), 2);
        // The overwritten record keeps its original position.
        assert_eq!(store.as_slice()[0].title, "First, renamed");
        assert_eq!(store.as_slice()[1].title, "Second");
    }

    #[tokio::test]
    async fn join_unknown_id_is_not_found_and_issues_no_request() {
        // Unroutable backend: any network call would fail loudly, proving
        // the lookup short-circuits first.
        let client = EventsClient::new("http://127.0.0.1:9");
        let mut store = EventsStore::new();

        let err = store.join(&client, "missing").await.unwrap_err();

        assert!(matches!(err, AppError::EventNotFound(ref id) if id == "missing"));
    }

    #[tokio::test]
    async fn join_success_marks_the_event_joined() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/events/ev-1/join"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = EventsClient::new(&server.uri());
        let mut store = EventsStore::new();
        store.upsert(stored_event("ev-1", "Bondi Beach Cleanup"));

        store.join(&client, "ev-1").await.expect("join should succeed");

        assert!(store.get("ev-1").expect("present").joined);
    }

    #[tokio::test]
    async fn join_rejection_is_surfaced_and_leaves_the_event_unjoined() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/events/ev-1/join"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = EventsClient::new(&server.uri());
        let mut store = EventsStore::new();
        store.upsert(stored_event("ev-1", "Bondi Beach Cleanup"));

        let err = store.join(&client, "ev-1").await.unwrap_err();

        assert!(matches!(err, AppError::JoinRejected { status: 403, .. }));
        assert!(!store.get("ev-1").expect("present").joined);
    }
}
