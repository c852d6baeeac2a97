//! The financial journey: a 24-month decision game.
//!
//! LIFECYCLE: NotStarted -> InProgress -> Completed.
//!   - `start()` resets to the initial portfolio from any phase.
//!   - `advance_month()` is only valid while InProgress.
//!   - `summarize()` is only valid once Completed.
//!
//! STEP ORDER inside `advance_month()` (fixed, never reordered):
//!   1. Draw one market event (weighted).
//!   2. Apply the player's decision.
//!   3. Charge the accumulated loan EMI.
//!   4. Record net worth, event and decision; advance the month.
//!   5. Complete the journey on the final month.
//!
//! RULE: the three histories are only appended together, so
//! `net_worth_history.len() == month_index + 1` and
//! `event_history.len() == choice_history.len() == month_index` hold
//! in every reachable state.
//!
//! Balances are never floored. Savings and the outstanding loan may go
//! negative; that is a game outcome, not an error.

use crate::{
    config::{GameConfig, JourneyConfig},
    error::{CoreError, CoreResult},
    event::JourneyEvent,
    market::MarketCatalog,
    rng::RandomSource,
    types::{Money, Month},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyPhase {
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for JourneyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed  => "completed",
        })
    }
}

/// A player's move for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Move `percent` of current savings into investments.
    Invest { percent: f64 },
    Save,
    Borrow,
}

impl Decision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::Invest { .. } => DecisionKind::Invest,
            Self::Save          => DecisionKind::Save,
            Self::Borrow        => DecisionKind::Borrow,
        }
    }
}

/// The decision as recorded in the choice history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    Invest,
    Save,
    Borrow,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Invest => "Invest",
            Self::Save   => "Save",
            Self::Borrow => "Borrow",
        })
    }
}

/// Portfolio and history for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    phase:                    JourneyPhase,
    month_index:              Month,
    net_worth_history:        Vec<Money>,
    event_history:            Vec<String>,
    choice_history:           Vec<DecisionKind>,
    investment_balance:       Money,
    savings_balance:          Money,
    outstanding_loan_balance: Money,
    loan_monthly_emi:         Money,
}

impl GameState {
    fn initial(starting_savings: Money, phase: JourneyPhase) -> Self {
        Self {
            phase,
            month_index: 0,
            net_worth_history: vec![starting_savings],
            event_history: Vec::new(),
            choice_history: Vec::new(),
            investment_balance: 0.0,
            savings_balance: starting_savings,
            outstanding_loan_balance: 0.0,
            loan_monthly_emi: 0.0,
        }
    }

    pub fn phase(&self) -> JourneyPhase { self.phase }
    pub fn month_index(&self) -> Month { self.month_index }
    pub fn net_worth_history(&self) -> &[Money] { &self.net_worth_history }
    pub fn event_history(&self) -> &[String] { &self.event_history }
    pub fn choice_history(&self) -> &[DecisionKind] { &self.choice_history }
    pub fn investment_balance(&self) -> Money { self.investment_balance }
    pub fn savings_balance(&self) -> Money { self.savings_balance }
    pub fn outstanding_loan_balance(&self) -> Money { self.outstanding_loan_balance }
    pub fn loan_monthly_emi(&self) -> Money { self.loan_monthly_emi }

    pub fn net_worth(&self) -> Money {
        self.investment_balance + self.savings_balance - self.outstanding_loan_balance
    }

    pub fn latest_net_worth(&self) -> Money {
        self.net_worth_history.last().copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecisionCounts {
    pub invest: u32,
    pub save:   u32,
    pub borrow: u32,
}

impl DecisionCounts {
    pub fn tally(choices: &[DecisionKind]) -> Self {
        choices.iter().fold(Self::default(), |mut counts, choice| {
            match choice {
                DecisionKind::Invest => counts.invest += 1,
                DecisionKind::Save   => counts.save += 1,
                DecisionKind::Borrow => counts.borrow += 1,
            }
            counts
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    BoldInvestor,
    SafeSaver,
    LeverageLover,
    BalancedPlanner,
}

impl Personality {
    /// First matching threshold wins, in this priority order.
    pub fn classify(counts: &DecisionCounts, config: &JourneyConfig) -> Self {
        let t = &config.personality;
        if counts.invest > t.bold_investor {
            Self::BoldInvestor
        } else if counts.save > t.safe_saver {
            Self::SafeSaver
        } else if counts.borrow > t.leverage_lover {
            Self::LeverageLover
        } else {
            Self::BalancedPlanner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BoldInvestor    => "Bold Investor",
            Self::SafeSaver       => "Safe Saver",
            Self::LeverageLover   => "Leverage Lover",
            Self::BalancedPlanner => "Balanced Planner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub initial_net_worth:    Money,
    pub final_net_worth:      Money,
    pub total_growth_percent: f64,
    pub decision_counts:      DecisionCounts,
    pub personality:          Personality,
    pub risk_score:           f64,
}

/// One session's journey: rules, market catalog and owned state.
/// Sessions are independent values; there is no shared global game.
#[derive(Debug, Clone)]
pub struct Journey {
    config: JourneyConfig,
    market: MarketCatalog,
    state:  GameState,
}

impl Journey {
    pub fn new(config: &GameConfig) -> CoreResult<Self> {
        Self::with_rules(config.journey.clone(), config.market.clone())
    }

    /// Rules and catalog are checked here, so an invalid catalog never
    /// reaches the weighted draw.
    pub fn with_rules(config: JourneyConfig, market: MarketCatalog) -> CoreResult<Self> {
        config.validate()?;
        market.validate()?;
        let state = GameState::initial(config.starting_savings, JourneyPhase::NotStarted);
        Ok(Self { config, market, state })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> JourneyPhase {
        self.state.phase
    }

    pub fn config(&self) -> &JourneyConfig {
        &self.config
    }

    pub fn market(&self) -> &MarketCatalog {
        &self.market
    }

    pub fn months_remaining(&self) -> Month {
        self.config.months.saturating_sub(self.state.month_index)
    }

    /// Reset to the initial portfolio. Discards any game in flight.
    pub fn start(&mut self) -> JourneyEvent {
        if self.state.phase == JourneyPhase::InProgress {
            log::info!(
                "journey: restart discards game at month {}",
                self.state.month_index
            );
        }
        self.state = GameState::initial(self.config.starting_savings, JourneyPhase::InProgress);
        log::info!(
            "journey: started with savings={:.2} over {} months",
            self.config.starting_savings,
            self.config.months
        );
        JourneyEvent::JourneyStarted {
            starting_savings: self.config.starting_savings,
            months: self.config.months,
        }
    }

    fn validate_decision(&self, decision: &Decision) -> CoreResult<()> {
        if let Decision::Invest { percent } = *decision {
            let (lo, hi) = (self.config.min_invest_percent, self.config.max_invest_percent);
            if !percent.is_finite() || percent < lo || percent > hi {
                return Err(CoreError::invalid_input(
                    "invest_percent",
                    format!("must be between {lo} and {hi}, got {percent}"),
                ));
            }
        }
        Ok(())
    }

    /// Play one month.
    pub fn advance_month(
        &mut self,
        decision: Decision,
        rng: &mut impl RandomSource,
    ) -> CoreResult<Vec<JourneyEvent>> {
        if self.state.phase != JourneyPhase::InProgress {
            log::warn!("journey: advance_month rejected in phase {}", self.state.phase);
            return Err(CoreError::InvalidState {
                operation: "advance month",
                phase: self.state.phase.to_string(),
            });
        }
        if let Err(e) = self.validate_decision(&decision) {
            log::warn!("journey: {e}");
            return Err(e);
        }

        let month = self.state.month_index + 1;
        let mut events = Vec::with_capacity(5);

        // 1. Market event.
        let market_event = self
            .market
            .draw(rng)
            .cloned()
            .ok_or_else(|| CoreError::Config("market catalog is empty".into()))?;
        events.push(JourneyEvent::MarketEventDrawn {
            month,
            name: market_event.name.clone(),
            invest_impact: market_event.invest_impact,
            save_impact: market_event.save_impact,
        });

        // 2. Decision.
        let state = &mut self.state;
        let (amount, growth) = match decision {
            Decision::Invest { percent } => {
                let amount = percent / 100.0 * state.savings_balance;
                state.savings_balance -= amount;
                state.investment_balance += amount;
                // Growth applies to the post-transfer balance.
                let growth = state.investment_balance
                    * (self.config.invest_base_return + market_event.invest_impact);
                state.investment_balance += growth;
                (amount, growth)
            }
            Decision::Save => {
                let growth = state.savings_balance
                    * (self.config.save_base_return + market_event.save_impact);
                state.savings_balance += growth;
                (0.0, growth)
            }
            Decision::Borrow => {
                let amount = self.config.borrow_amount;
                state.savings_balance += amount;
                state.outstanding_loan_balance += amount;
                // Each borrow adds its own flat installment; loans are
                // never amortized jointly.
                state.loan_monthly_emi += self.config.borrow_emi_increment();
                (amount, 0.0)
            }
        };
        events.push(JourneyEvent::DecisionApplied {
            month,
            decision: decision.kind(),
            amount,
            growth,
        });

        // 3. EMI.
        if state.loan_monthly_emi > 0.0 {
            let emi = state.loan_monthly_emi;
            let principal_repaid = self.config.principal_share * emi;
            state.savings_balance -= emi;
            state.outstanding_loan_balance -= principal_repaid;
            events.push(JourneyEvent::EmiCharged { month, emi, principal_repaid });
        }

        // 4. Record.
        let net_worth = state.net_worth();
        state.net_worth_history.push(net_worth);
        state.event_history.push(market_event.name.clone());
        state.choice_history.push(decision.kind());
        state.month_index = month;
        events.push(JourneyEvent::MonthClosed { month, net_worth });

        log::debug!(
            "month={month} event={} decision={} invest={:.2} savings={:.2} loan={:.2} emi={:.2} net_worth={:.2}",
            market_event.name,
            decision.kind(),
            state.investment_balance,
            state.savings_balance,
            state.outstanding_loan_balance,
            state.loan_monthly_emi,
            net_worth
        );

        // 5. Completion.
        if month >= self.config.months {
            state.phase = JourneyPhase::Completed;
            log::info!("journey: completed after {month} months, net worth {net_worth:.2}");
            events.push(JourneyEvent::JourneyCompleted { month, final_net_worth: net_worth });
        }

        Ok(events)
    }

    pub fn summarize(&self) -> CoreResult<JourneySummary> {
        if self.state.phase != JourneyPhase::Completed {
            log::warn!("journey: summarize rejected in phase {}", self.state.phase);
            return Err(CoreError::InvalidState {
                operation: "summarize",
                phase: self.state.phase.to_string(),
            });
        }

        let history = &self.state.net_worth_history;
        let initial = history.first().copied().unwrap_or_default();
        let final_net_worth = self.state.latest_net_worth();
        let total_growth_percent = if initial == 0.0 {
            0.0
        } else {
            (final_net_worth - initial) / initial * 100.0
        };

        let counts = DecisionCounts::tally(&self.state.choice_history);
        let weights = &self.config.risk;
        let raw_risk = (counts.invest as f64 * weights.invest + counts.borrow as f64 * weights.borrow)
            / self.config.months as f64
            * 10.0;

        Ok(JourneySummary {
            initial_net_worth: initial,
            final_net_worth,
            total_growth_percent,
            decision_counts: counts,
            personality: Personality::classify(&counts, &self.config),
            risk_score: raw_risk.min(weights.max_score),
        })
    }
}
