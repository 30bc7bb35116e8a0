use std::collections::HashSet;

/// Fraction of a section that must become visible to trigger its reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// One-shot progressive reveal over the page's top-level sections.
///
/// Each observed section is marked for fade-in; the first time it crosses
/// the visibility threshold it is marked visible and unobserved, so
/// scrolling away and back never re-triggers the transition.
#[derive(Debug, Default)]
pub struct RevealObserver {
    observed: Vec<String>,
    revealed: HashSet<String>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark sections for fade-in and start observing them.
    pub fn observe_sections(&mut self, sections: &[String]) {
        for section in sections {
            if !self.observed.contains(section) && !self.revealed.contains(section) {
                self.observed.push(section.clone());
            }
        }
    }

    /// Report a visibility change. Returns `true` exactly once per section,
    /// when it first reaches [`REVEAL_THRESHOLD`].
    pub fn on_intersection(&mut self, section: &str, visible_ratio: f64) -> bool {
        if visible_ratio < REVEAL_THRESHOLD {
            return false;
        }

        let Some(idx) = self.observed.iter().position(|s| s == section) else {
            return false;
        };

        self.observed.remove(idx);
        self.revealed.insert(section.to_string());
        true
    }

    /// Sections still waiting to be revealed (i.e. carrying the fade-in mark).
    pub fn pending(&self) -> &[String] {
        &self.observed
    }

    pub fn is_revealed(&self, section: &str) -> bool {
        self.revealed.contains(section)
    }
}
