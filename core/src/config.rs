use crate::{
    error::{CoreError, CoreResult},
    market::MarketCatalog,
    schemes::SchemeCatalog,
    types::{Money, Month},
};
use serde::{Deserialize, Serialize};

/// Numeric rules of the financial journey game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyConfig {
    pub starting_savings:   Money,
    pub months:             Month,
    pub invest_base_return: f64,
    pub save_base_return:   f64,
    pub borrow_amount:      Money,
    /// Flat annual rate charged on each borrow, repaid over `borrow_term_months`.
    pub borrow_flat_rate:   f64,
    pub borrow_term_months: u32,
    /// Share of each EMI payment that reduces the outstanding balance.
    pub principal_share:    f64,
    pub min_invest_percent: f64,
    pub max_invest_percent: f64,
    pub personality:        PersonalityThresholds,
    pub risk:               RiskWeights,
}

/// Decision counts above which a player earns a personality label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityThresholds {
    pub bold_investor:  u32,
    pub safe_saver:     u32,
    pub leverage_lover: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub invest:    f64,
    pub borrow:    f64,
    pub max_score: f64,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            starting_savings:   100_000.0,
            months:             24,
            invest_base_return: 0.15,
            save_base_return:   0.04,
            borrow_amount:      10_000.0,
            borrow_flat_rate:   0.12,
            borrow_term_months: 12,
            principal_share:    0.8,
            min_invest_percent: 10.0,
            max_invest_percent: 100.0,
            personality: PersonalityThresholds {
                bold_investor:  15,
                safe_saver:     15,
                leverage_lover: 10,
            },
            risk: RiskWeights {
                invest:    4.0,
                borrow:    5.0,
                max_score: 100.0,
            },
        }
    }
}

impl JourneyConfig {
    /// Monthly installment added by one borrow decision.
    pub fn borrow_emi_increment(&self) -> Money {
        self.borrow_amount * (1.0 + self.borrow_flat_rate) / self.borrow_term_months as f64
    }

    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("starting_savings", self.starting_savings),
            ("borrow_amount", self.borrow_amount),
            ("min_invest_percent", self.min_invest_percent),
            ("max_invest_percent", self.max_invest_percent),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::Config(format!("journey.{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("invest_base_return", self.invest_base_return),
            ("save_base_return", self.save_base_return),
            ("borrow_flat_rate", self.borrow_flat_rate),
            ("risk.invest", self.risk.invest),
            ("risk.borrow", self.risk.borrow),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!(
                    "journey.{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.risk.max_score.is_finite() || self.risk.max_score <= 0.0 {
            return Err(CoreError::Config(format!(
                "journey.risk.max_score must be positive, got {}",
                self.risk.max_score
            )));
        }
        if self.months == 0 {
            return Err(CoreError::Config("journey.months must be at least 1".into()));
        }
        if self.borrow_term_months == 0 {
            return Err(CoreError::Config("journey.borrow_term_months must be at least 1".into()));
        }
        if self.min_invest_percent > self.max_invest_percent || self.max_invest_percent > 100.0 {
            return Err(CoreError::Config(format!(
                "journey invest range [{}, {}] must lie within (0, 100]",
                self.min_invest_percent, self.max_invest_percent
            )));
        }
        let thresholds = [
            ("bold_investor", self.personality.bold_investor),
            ("safe_saver", self.personality.safe_saver),
            ("leverage_lover", self.personality.leverage_lover),
        ];
        for (name, threshold) in thresholds {
            // A label is only reachable when its count can exceed the threshold.
            if threshold >= self.months {
                return Err(CoreError::Config(format!(
                    "journey.personality.{name} = {threshold} is unreachable in {} months",
                    self.months
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.principal_share) {
            return Err(CoreError::Config(format!(
                "journey.principal_share must be in [0, 1], got {}",
                self.principal_share
            )));
        }
        Ok(())
    }
}

/// Everything loaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub journey: JourneyConfig,
    pub market:  MarketCatalog,
    pub schemes: SchemeCatalog,
}

impl GameConfig {
    /// Load from the data/ directory and run the startup invariant checks.
    /// In tests, use GameConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let journey_path = format!("{data_dir}/journey/journey_rules.json");
        let journey_content = std::fs::read_to_string(&journey_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {journey_path}: {e}"))?;
        let journey: JourneyConfig = serde_json::from_str(&journey_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {journey_path}: {e}"))?;

        let market_path = format!("{data_dir}/market/market_events.json");
        let market_content = std::fs::read_to_string(&market_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {market_path}: {e}"))?;
        let market: MarketCatalog = serde_json::from_str(&market_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {market_path}: {e}"))?;

        let schemes_path = format!("{data_dir}/schemes/scheme_catalog.json");
        let schemes_content = std::fs::read_to_string(&schemes_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {schemes_path}: {e}"))?;
        let schemes: SchemeCatalog = serde_json::from_str(&schemes_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {schemes_path}: {e}"))?;

        let config = Self { journey, market, schemes };
        config.validate()?;
        log::info!(
            "config: loaded {} market events, {} scheme lists from {data_dir}",
            config.market.events.len(),
            config.schemes.schemes.len()
        );
        Ok(config)
    }

    /// Hardcoded canonical rules and catalogs, identical to data/.
    pub fn builtin() -> Self {
        Self {
            journey: JourneyConfig::default(),
            market:  MarketCatalog::builtin(),
            schemes: SchemeCatalog::builtin(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.journey.validate()?;
        self.market.validate()?;
        self.schemes.validate()?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
