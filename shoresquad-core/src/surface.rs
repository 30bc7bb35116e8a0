use std::collections::HashSet;

/// The optional external surfaces this client renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    CleanupMap,
    WeatherDisplay,
    EventsList,
    PrimaryAction,
}

impl SurfaceId {
    /// Identifier of the surface on the host page.
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceId::CleanupMap => "cleanup-map",
            SurfaceId::WeatherDisplay => "weather-display",
            SurfaceId::EventsList => "events-list",
            SurfaceId::PrimaryAction => "cta-primary",
        }
    }

    pub const fn all() -> &'static [SurfaceId] {
        &[
            SurfaceId::CleanupMap,
            SurfaceId::WeatherDisplay,
            SurfaceId::EventsList,
            SurfaceId::PrimaryAction,
        ]
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe for the host page: which surfaces exist, and which top-level
/// sections are candidates for progressive reveal.
pub trait SurfaceResolver {
    fn has(&self, id: SurfaceId) -> bool;
    fn sections(&self) -> Vec<String>;
}

/// Resolver over a fixed, declared layout. The common case for an embedding
/// that knows its page up front, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSurfaces {
    pub present: Vec<SurfaceId>,
    pub sections: Vec<String>,
}

impl StaticSurfaces {
    /// A layout with every surface present and the given sections.
    pub fn full(sections: &[&str]) -> Self {
        Self {
            present: SurfaceId::all().to_vec(),
            sections: sections.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SurfaceResolver for StaticSurfaces {
    fn has(&self, id: SurfaceId) -> bool {
        self.present.contains(&id)
    }

    fn sections(&self) -> Vec<String> {
        self.sections.clone()
    }
}

/// Present/absent state of every surface, resolved once at startup.
///
/// A missing surface is never an error; components consult this instead of
/// probing the page themselves.
#[derive(Debug, Clone)]
pub struct Surfaces {
    present: HashSet<SurfaceId>,
    sections: Vec<String>,
}

impl Surfaces {
    pub fn probe(resolver: &dyn SurfaceResolver) -> Self {
        let present =
            SurfaceId::all().iter().copied().filter(|id| resolver.has(*id)).collect();

        Self { present, sections: resolver.sections() }
    }

    pub fn has(&self, id: SurfaceId) -> bool {
        self.present.contains(&id)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }
}
