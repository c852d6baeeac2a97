//! Loan eligibility calculator and financial journey simulator.
//!
//! Everything here is synchronous and free of I/O apart from
//! `GameConfig::load`. Randomness is always injected by the caller.

pub mod amortization;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod journey;
pub mod literacy;
pub mod market;
pub mod rng;
pub mod schemes;
pub mod types;

pub use amortization::{
    compute_debt_ratio, compute_emi, compute_net_savings, compute_term_series, Affordability,
    LoanImpact, SimulationParameters, TermPoint,
};
pub use config::{GameConfig, JourneyConfig};
pub use eligibility::{
    estimate_loan, heatmap_grid, sensitivity_curve, ApplicantProfile, EmploymentStatus,
    LoanEstimate, LoanType, Occupation, RiskBand,
};
pub use error::{CoreError, CoreResult};
pub use event::JourneyEvent;
pub use journey::{
    Decision, DecisionCounts, DecisionKind, GameState, Journey, JourneyPhase, JourneySummary,
    Personality,
};
pub use literacy::{LiteracyQuiz, QuizLevel, QuizOutcome};
pub use market::{MarketCatalog, MarketEvent};
pub use rng::{RandomSource, RngBank, RngSlot, SimRng};
pub use schemes::{recommend_schemes, suggested_documents, SchemeCatalog};
