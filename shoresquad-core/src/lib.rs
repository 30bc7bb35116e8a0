//! Core library for the ShoreSquad beach cleanup client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Geolocation resolution with a fixed fallback
//! - The weather forecast client and beach-suitability classifier
//! - The cleanup-events client, store, and join flow
//! - The map view model, page surfaces, progressive reveal, and toasts
//! - The startup orchestrator tying the above together
//!
//! It is used by `shoresquad-cli`, but can also be reused by other binaries
//! or embeddings.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod map;
pub mod model;
pub mod notify;
pub mod render;
pub mod reveal;
pub mod suitability;
pub mod surface;
pub mod weather;

pub use app::{App, AppPhase};
pub use config::Config;
pub use error::AppError;
pub use events::{EventsClient, EventsStore};
pub use geo::{FALLBACK_COORDINATE, IpPositionSource, PositionSource};
pub use map::MapController;
pub use model::{CleanupEvent, Coordinate, ForecastDay};
pub use suitability::{Suitability, classify};
pub use surface::{StaticSurfaces, SurfaceId, Surfaces};
pub use weather::{FORECAST_DAYS, WeatherClient};
