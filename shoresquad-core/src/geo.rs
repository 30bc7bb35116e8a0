use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::Coordinate;

/// Where the map centers when no position can be resolved: Sydney's beaches.
pub const FALLBACK_COORDINATE: Coordinate =
    Coordinate { latitude: -33.8688, longitude: 151.2093 };

/// One-shot position query. Implementations may fail; callers go through
/// [`resolve`], which never does.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinate>;
}

/// Resolve the user's position, falling back to [`FALLBACK_COORDINATE`] on
/// any error (denied, timed out, service unreachable). No retry; the result
/// is resolved exactly once at startup.
pub async fn resolve(source: &dyn PositionSource) -> Coordinate {
    match source.current_position().await {
        Ok(position) => position,
        Err(err) => {
            tracing::warn!("Position lookup failed, using fallback location: {err:#}");
            FALLBACK_COORDINATE
        }
    }
}

/// Position source backed by the ip-api.com JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpPositionSource {
    http: Client,
    base_url: String,
}

impl IpPositionSource {
    pub fn new() -> Self {
        Self::new_with_base_url("http://ip-api.com")
    }

    pub fn new_with_base_url(base_url: &str) -> Self {
        Self { http: Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl Default for IpPositionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

#[async_trait]
impl PositionSource for IpPositionSource {
    async fn current_position(&self) -> Result<Coordinate> {
        let url = format!("{}/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to the IP geolocation service")?;

        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("IP geolocation request failed with status {status}"));
        }

        let parsed: IpApiResponse =
            res.json().await.context("Failed to parse IP geolocation JSON")?;

        if parsed.status != "success" {
            return Err(anyhow!(
                "IP geolocation lookup failed: {}",
                parsed.message.unwrap_or_else(|| "no reason given".to_string())
            ));
        }

        match (parsed.lat, parsed.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate { latitude, longitude }),
            _ => Err(anyhow!("IP geolocation response contained no coordinates")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// A platform with no position capability at all.
    #[derive(Debug)]
    struct Unsupported;

    #[async_trait]
    impl PositionSource for Unsupported {
        async fn current_position(&self) -> Result<Coordinate> {
            Err(anyhow!("Geolocation is not supported"))
        }
    }

    /// A platform where the user denied the position prompt.
    #[derive(Debug)]
    struct Denied;

    #[async_trait]
    impl PositionSource for Denied {
        async fn current_position(&self) -> Result<Coordinate> {
            Err(anyhow!("User denied the position request"))
        }
    }

    #[tokio::test]
    async fn resolve_passes_through_a_successful_lookup() {
        #[derive(Debug)]
        struct Fixed;

        #[async_trait]
        impl PositionSource for Fixed {
            async fn current_position(&self) -> Result<Coordinate> {
                Ok(Coordinate { latitude: 1.25, longitude: 103.83 })
            }
        }

        let position = resolve(&Fixed).await;
        assert_eq!(position, Coordinate { latitude: 1.25, longitude: 103.83 });
    }

    #[tokio::test]
    async fn resolve_falls_back_when_unsupported() {
        assert_eq!(resolve(&Unsupported).await, FALLBACK_COORDINATE);
    }

    #[tokio::test]
    async fn resolve_falls_back_when_denied() {
        assert_eq!(resolve(&Denied).await, FALLBACK_COORDINATE);
    }

    #[tokio::test]
    async fn ip_source_parses_a_successful_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "lat": 1.2905,
                "lon": 103.852
            })))
            .mount(&server)
            .await;

        let source = IpPositionSource::new_with_base_url(&server.uri());
        let position = source.current_position().await.expect("lookup should succeed");

        assert_eq!(position, Coordinate { latitude: 1.2905, longitude: 103.852 });
    }

    #[tokio::test]
    async fn ip_source_reports_a_failed_lookup() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "private range"
            })))
            .mount(&server)
            .await;

        let source = IpPositionSource::new_with_base_url(&server.uri());
        let err = source.current_position().await.unwrap_err();

        assert!(err.to_string().contains("private range"));
    }

    #[tokio::test]
    async fn ip_source_failure_still_resolves_to_fallback() {
        // Unreachable endpoint: the resolver absorbs the error.
        let source = IpPositionSource::new_with_base_url("http://127.0.0.1:9");
        assert_eq!(resolve(&source).await, FALLBACK_COORDINATE);
    }
}
