//! Amortization calculator: EMI, debt ratio and net savings queries.
//!
//! All functions are pure. Degenerate denominators (zero rate, zero
//! term, zero income) resolve to 0 by explicit branch; nothing here
//! returns an error for arithmetic reasons. Payment counts are `u64`
//! and exponents are taken in `f64`, so any `u32` term is accepted.

use crate::{
    eligibility::{ApplicantProfile, LoanEstimate},
    types::Money,
};
use serde::{Deserialize, Serialize};

/// Interest rate the decision simulator starts from.
pub const DEFAULT_ANNUAL_INTEREST_PERCENT: f64 = 8.0;

/// Longest term shown in the term sensitivity series.
pub const MAX_SERIES_TERM_YEARS: u32 = 30;

/// Debt-ratio bands for the affordability verdict (percent).
pub const COMFORTABLE_DEBT_RATIO: f64 = 30.0;
pub const STRETCHED_DEBT_RATIO: f64 = 50.0;

/// Longest cumulative savings schedule produced, in months.
pub const MAX_SCHEDULE_MONTHS: u64 = MAX_SERIES_TERM_YEARS as u64 * 12;

/// Monthly installments in a term of `term_years` years.
pub fn payment_count(term_years: u32) -> u64 {
    u64::from(term_years) * 12
}

/// Fixed-payment annuity installment.
///
/// Returns 0 when the monthly rate or the payment count is zero. When
/// the compound factor overflows, the installment is its limit
/// `principal * monthly_rate`.
pub fn compute_emi(principal: Money, annual_interest_percent: f64, term_years: u32) -> Money {
    let monthly_rate = annual_interest_percent / 1200.0;
    let n = payment_count(term_years);
    if monthly_rate == 0.0 || n == 0 {
        return 0.0;
    }

    let growth = (1.0 + monthly_rate).powf(n as f64);
    if growth == f64::INFINITY {
        return principal * monthly_rate;
    }
    let denominator = growth - 1.0;
    if !growth.is_finite() || denominator == 0.0 {
        return 0.0;
    }
    principal * monthly_rate * growth / denominator
}

/// EMI as a percentage of monthly income. 0 when income is 0.
pub fn compute_debt_ratio(emi: Money, income: Money) -> f64 {
    if income == 0.0 {
        return 0.0;
    }
    emi / income * 100.0
}

/// Income left over after `n_payments` installments. Not clamped:
/// a negative value means the loan is unaffordable.
pub fn compute_net_savings(income: Money, emi: Money, n_payments: u64) -> Money {
    (income - emi) * n_payments as f64
}

/// Running total of (income - emi) for months 1..=n_payments, cut off
/// after `MAX_SCHEDULE_MONTHS`.
pub fn cumulative_savings_schedule(income: Money, emi: Money, n_payments: u64) -> Vec<Money> {
    let monthly = income - emi;
    (1..=n_payments.min(MAX_SCHEDULE_MONTHS))
        .map(|m| monthly * m as f64)
        .collect()
}

/// Upper bound of the term sensitivity series for a selected term.
pub fn sensitivity_max_term(selected_term_years: u32) -> u32 {
    selected_term_years.saturating_add(5).min(MAX_SERIES_TERM_YEARS)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermPoint {
    pub term_years:  u32,
    pub emi:         Money,
    pub debt_ratio:  f64,
    pub net_savings: Money,
}

/// Affordability of each term from 1 to `max_term_years` inclusive.
pub fn compute_term_series(
    principal: Money,
    annual_interest_percent: f64,
    income: Money,
    max_term_years: u32,
) -> Vec<TermPoint> {
    (1..=max_term_years)
        .map(|term_years| {
            let emi = compute_emi(principal, annual_interest_percent, term_years);
            TermPoint {
                term_years,
                emi,
                debt_ratio: compute_debt_ratio(emi, income),
                net_savings: compute_net_savings(income, emi, payment_count(term_years)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordability {
    Comfortable,
    Stretched,
    HighRisk,
}

impl Affordability {
    pub fn from_debt_ratio(debt_ratio: f64) -> Self {
        if debt_ratio < COMFORTABLE_DEBT_RATIO {
            Self::Comfortable
        } else if debt_ratio < STRETCHED_DEBT_RATIO {
            Self::Stretched
        } else {
            Self::HighRisk
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Comfortable => "You can comfortably afford this loan.",
            Self::Stretched   => "Think carefully. This loan might stretch your finances.",
            Self::HighRisk    => "High debt risk! Consider reducing the loan amount or increasing the term.",
        }
    }
}

/// Inputs to the "should I take this loan" simulator.
/// Independent of the applicant profile once seeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub loan_amount:             Money,
    pub income:                  Money,
    pub term_years:              u32,
    pub annual_interest_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanImpact {
    pub emi:           Money,
    pub debt_ratio:    f64,
    pub net_savings:   Money,
    pub affordability: Affordability,
}

impl SimulationParameters {
    /// Start the simulator from a prediction, at the default rate.
    pub fn seeded_from(profile: &ApplicantProfile, estimate: &LoanEstimate) -> Self {
        Self {
            loan_amount: estimate.amount,
            income: profile.monthly_income,
            term_years: profile.loan_term_years,
            annual_interest_percent: DEFAULT_ANNUAL_INTEREST_PERCENT,
        }
    }

    pub fn n_payments(&self) -> u64 {
        payment_count(self.term_years)
    }

    pub fn emi(&self) -> Money {
        compute_emi(self.loan_amount, self.annual_interest_percent, self.term_years)
    }

    pub fn analyze(&self) -> LoanImpact {
        let emi = self.emi();
        let debt_ratio = compute_debt_ratio(emi, self.income);
        LoanImpact {
            emi,
            debt_ratio,
            net_savings: compute_net_savings(self.income, emi, self.n_payments()),
            affordability: Affordability::from_debt_ratio(debt_ratio),
        }
    }

    pub fn savings_schedule(&self) -> Vec<Money> {
        cumulative_savings_schedule(self.income, self.emi(), self.n_payments())
    }

    pub fn term_series(&self) -> Vec<TermPoint> {
        compute_term_series(
            self.loan_amount,
            self.annual_interest_percent,
            self.income,
            sensitivity_max_term(self.term_years),
        )
    }
}
