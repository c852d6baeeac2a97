//! Shared primitive types used across the calculator and the journey.

/// A monetary amount. All formulas are illustrative heuristics in f64.
pub type Money = f64;

/// One simulated journey month. Month 0 is the starting position.
pub type Month = u32;

/// Credit score bounds accepted by the eligibility estimator.
pub const MIN_CREDIT_SCORE: u32 = 300;
pub const MAX_CREDIT_SCORE: u32 = 850;

/// Loan terms (years) offered to applicants.
pub const LOAN_TERMS_YEARS: [u32; 6] = [5, 10, 15, 20, 25, 30];
