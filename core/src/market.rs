//! Market events: the random modifier drawn once per journey month.

use crate::{
    error::{CoreError, CoreResult},
    rng::RandomSource,
};
use serde::{Deserialize, Serialize};

/// Tolerance for the "probabilities sum to 1" startup check.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub name:          String,
    pub description:   String,
    /// Added to the base investment return for the month.
    pub invest_impact: f64,
    /// Added to the base savings return for the month.
    pub save_impact:   f64,
    pub probability:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCatalog {
    pub events: Vec<MarketEvent>,
}

impl MarketCatalog {
    /// The shipped four-event catalog.
    pub fn builtin() -> Self {
        let event = |name: &str, description: &str, invest: f64, save: f64, p: f64| MarketEvent {
            name:          name.into(),
            description:   description.into(),
            invest_impact: invest,
            save_impact:   save,
            probability:   p,
        };
        Self {
            events: vec![
                event("📈 Bull Run", "Markets rally and deposit rates tick up.", 0.10, 0.01, 0.30),
                event("📉 Market Crash", "Equities slump; banks trim savings rates.", -0.30, -0.01, 0.20),
                event("🧊 Stagnation", "Flat markets. Investments earn nothing this month.", -0.15, 0.0, 0.30),
                event("🔥 Inflation Spike", "Prices jump and erode real returns.", -0.05, -0.03, 0.20),
            ],
        }
    }

    /// Startup invariant check.
    pub fn validate(&self) -> CoreResult<()> {
        if self.events.is_empty() {
            return Err(CoreError::Config("market catalog is empty".into()));
        }
        for event in &self.events {
            if event.name.trim().is_empty() {
                return Err(CoreError::Config("market event with empty name".into()));
            }
            if !(event.probability > 0.0 && event.probability < 1.0) {
                return Err(CoreError::Config(format!(
                    "market event '{}' has probability {} outside (0, 1)",
                    event.name, event.probability
                )));
            }
            if !event.invest_impact.is_finite() || !event.save_impact.is_finite() {
                return Err(CoreError::Config(format!(
                    "market event '{}' has a non-finite impact",
                    event.name
                )));
            }
        }
        let total = self.total_weight();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(CoreError::Config(format!(
                "market event probabilities sum to {total}, expected 1"
            )));
        }
        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.events.iter().map(|e| e.probability).sum()
    }

    pub fn find(&self, name: &str) -> Option<&MarketEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Weighted draw. Probabilities are treated as relative weights.
    /// `None` only for an empty catalog.
    pub fn draw(&self, rng: &mut impl RandomSource) -> Option<&MarketEvent> {
        let roll = rng.next_f64() * self.total_weight();
        let mut cumulative = 0.0;
        for event in &self.events {
            cumulative += event.probability;
            if roll < cumulative {
                return Some(event);
            }
        }
        // Float residue at the top of the range lands on the last entry.
        self.events.last()
    }
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 { self.0 }
        fn next_u64_below(&mut self, _n: u64) -> u64 { 0 }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        MarketCatalog::builtin().validate().unwrap();
    }

    #[test]
    fn draw_walks_cumulative_weights() {
        let catalog = MarketCatalog::builtin();
        assert_eq!(catalog.draw(&mut Fixed(0.0)).unwrap().name, "📈 Bull Run");
        assert_eq!(catalog.draw(&mut Fixed(0.35)).unwrap().name, "📉 Market Crash");
        assert_eq!(catalog.draw(&mut Fixed(0.55)).unwrap().name, "🧊 Stagnation");
        assert_eq!(catalog.draw(&mut Fixed(0.9999)).unwrap().name, "🔥 Inflation Spike");
    }

    #[test]
    fn unnormalized_weights_are_relative() {
        let mut catalog = MarketCatalog::builtin();
        for e in &mut catalog.events {
            e.probability *= 0.5;
        }
        assert!(catalog.validate().is_err());
        // Same relative weights, same outcome for the same roll.
        assert_eq!(catalog.draw(&mut Fixed(0.55)).unwrap().name, "🧊 Stagnation");
    }

    #[test]
    fn empty_catalog_draws_nothing() {
        let catalog = MarketCatalog { events: vec![] };
        assert!(catalog.draw(&mut Fixed(0.5)).is_none());
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn bad_probability_rejected() {
        let mut catalog = MarketCatalog::builtin();
        catalog.events[0].probability = 1.0;
        assert!(matches!(catalog.validate(), Err(CoreError::Config(_))));
    }
}
