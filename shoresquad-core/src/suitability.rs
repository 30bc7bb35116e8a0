use crate::model::ForecastDay;

/// Three-tier beach-cleanup verdict for one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suitability {
    Good,
    Windy,
    Bad,
}

impl Suitability {
    /// Display string shown on the weather card.
    pub fn label(&self) -> &'static str {
        match self {
            Suitability::Good => "Good for Beach Cleanup!",
            Suitability::Windy => "Windy - Use Caution",
            Suitability::Bad => "Not Ideal for Beach Cleanup",
        }
    }

    /// Style tag applied to the weather card.
    pub fn style_class(&self) -> &'static str {
        match self {
            Suitability::Good => "condition-good",
            Suitability::Windy => "condition-warning",
            Suitability::Bad => "condition-bad",
        }
    }

    pub const fn all() -> &'static [Suitability] {
        &[Suitability::Good, Suitability::Windy, Suitability::Bad]
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify one forecast day. Pure and total; first match wins:
/// heavy precipitation or any rain/storm condition beats wind.
pub fn classify(day: &ForecastDay) -> Suitability {
    let condition = day.condition_text.to_lowercase();

    if day.total_precip_mm > 5.0 || condition.contains("rain") || condition.contains("storm") {
        return Suitability::Bad;
    }

    if day.max_wind_kph > 30.0 {
        return Suitability::Windy;
    }

    Suitability::Good
}
