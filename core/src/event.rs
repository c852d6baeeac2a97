//! The journey event log.
//!
//! `Journey::advance_month` returns the events it produced, in the
//! order the steps ran. The presentation layer renders them; the core
//! never reads them back.

use crate::{
    journey::DecisionKind,
    types::{Money, Month},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during a journey.
/// Variants are append-only so that serialized logs stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JourneyEvent {
    JourneyStarted {
        starting_savings: Money,
        months:           Month,
    },
    MarketEventDrawn {
        month:         Month,
        name:          String,
        invest_impact: f64,
        save_impact:   f64,
    },
    DecisionApplied {
        month:    Month,
        decision: DecisionKind,
        /// Amount moved (invest) or borrowed (borrow); 0 for save.
        amount:   Money,
        /// Return credited this month; 0 for borrow.
        growth:   Money,
    },
    EmiCharged {
        month:            Month,
        emi:              Money,
        principal_repaid: Money,
    },
    MonthClosed {
        month:     Month,
        net_worth: Money,
    },
    JourneyCompleted {
        month:           Month,
        final_net_worth: Money,
    },
}

impl JourneyEvent {
    /// Stable name for log lines and the IPC stream.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::JourneyStarted { .. }   => "journey_started",
            Self::MarketEventDrawn { .. } => "market_event_drawn",
            Self::DecisionApplied { .. }  => "decision_applied",
            Self::EmiCharged { .. }       => "emi_charged",
            Self::MonthClosed { .. }      => "month_closed",
            Self::JourneyCompleted { .. } => "journey_completed",
        }
    }
}
